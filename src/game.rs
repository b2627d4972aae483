//! Multi-round typing games. Every round is a `TypingSession`; the game only
//! chains rounds, keeps score and runs its clock off the session's tick.

use std::time::Duration;

use clap::ValueEnum;
use log::{debug, info, warn};
use rand::seq::SliceRandom;

use crate::engine::{InputReport, TypingSession};
use crate::error::SessionError;
use crate::metrics::{self, word_count};
use crate::scheduler::TimerId;
use crate::scoring::{BombDefuser, PunctuationPro, RoundScore, ScoringPolicy, TimeAttack, WordMaster};
use crate::session::{FinishReason, Status};
use crate::texts::{self, Difficulty, TextPool};
use crate::typing_policy::Keystroke;

/// Bombs that may go off before the game is lost
pub const MAX_EXPLOSIONS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum GameKind {
    WordMaster,
    TimeAttack,
    BombDefuser,
    PunctuationPro,
}

impl GameKind {
    pub fn title(&self) -> &'static str {
        match self {
            GameKind::WordMaster => "Word Master",
            GameKind::TimeAttack => "Time Attack",
            GameKind::BombDefuser => "Bomb Defuser",
            GameKind::PunctuationPro => "Punctuation Pro",
        }
    }

    pub fn supports(&self, difficulty: Difficulty) -> bool {
        !matches!(
            (self, difficulty),
            (GameKind::BombDefuser, Difficulty::Easy)
        )
    }

    /// Length of the whole-game countdown, if the game has one
    pub fn game_clock_secs(&self, difficulty: Difficulty) -> Option<u64> {
        match (self, difficulty) {
            (GameKind::WordMaster, _) => Some(60),
            (GameKind::TimeAttack, Difficulty::Easy) => Some(90),
            (GameKind::TimeAttack, Difficulty::Medium) => Some(60),
            (GameKind::TimeAttack, Difficulty::Hard) => Some(45),
            (GameKind::PunctuationPro, Difficulty::Easy) => Some(120),
            (GameKind::PunctuationPro, Difficulty::Medium) => Some(90),
            (GameKind::PunctuationPro, Difficulty::Hard) => Some(60),
            (GameKind::BombDefuser, _) => None,
        }
    }

    /// Per-round countdown; only bombs tick individually
    pub fn round_secs(&self, difficulty: Difficulty) -> Option<u64> {
        match (self, difficulty) {
            (GameKind::BombDefuser, Difficulty::Hard) => Some(20),
            (GameKind::BombDefuser, _) => Some(30),
            _ => None,
        }
    }

    fn policy(&self, difficulty: Difficulty) -> Box<dyn ScoringPolicy> {
        match self {
            GameKind::WordMaster => Box::new(WordMaster { difficulty }),
            GameKind::TimeAttack => Box::new(TimeAttack { difficulty }),
            GameKind::BombDefuser => Box::new(BombDefuser),
            GameKind::PunctuationPro => Box::new(PunctuationPro),
        }
    }

    fn pool(&self, difficulty: Difficulty) -> (TextPool, Option<&'static str>) {
        match self {
            GameKind::WordMaster => {
                let theme = texts::word_themes()
                    .choose(&mut rand::thread_rng())
                    .copied()
                    .unwrap_or("animals");
                (
                    TextPool::new(texts::words(theme, difficulty).iter().copied()),
                    Some(theme),
                )
            }
            GameKind::TimeAttack => (
                TextPool::new(texts::sentences(difficulty).iter().copied()),
                None,
            ),
            GameKind::BombDefuser => (
                TextPool::new(texts::bomb_codes(difficulty).unwrap_or_default().iter().copied()),
                None,
            ),
            GameKind::PunctuationPro => (
                TextPool::new(texts::punctuation_lines(difficulty).iter().copied()),
                None,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Totals {
    words: usize,
    keystrokes: u32,
    errors: u32,
    elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSummary {
    pub score: u64,
    pub rounds_completed: u32,
    pub perfect_rounds: u32,
    pub explosions: u32,
    pub wpm: u32,
    pub accuracy: u8,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct Game {
    kind: GameKind,
    difficulty: Difficulty,
    theme: Option<&'static str>,
    session: TypingSession,
    pool: TextPool,
    current: String,
    game_remaining: Option<u64>,
    status: Status,
    score: u64,
    streak: u32,
    rounds_completed: u32,
    perfect_rounds: u32,
    explosions: u32,
    last_round: Option<RoundScore>,
    banked: Totals,
}

impl Game {
    pub fn start(
        kind: GameKind,
        difficulty: Difficulty,
        session: TypingSession,
    ) -> Result<Self, SessionError> {
        if !kind.supports(difficulty) {
            return Err(SessionError::UnsupportedDifficulty {
                game: kind.title(),
                difficulty,
            });
        }
        let (pool, theme) = kind.pool(difficulty);
        Self::start_with_pool(kind, difficulty, session, pool, theme)
    }

    /// Starts a game over a caller-supplied text pool
    pub fn start_with_pool(
        kind: GameKind,
        difficulty: Difficulty,
        session: TypingSession,
        pool: TextPool,
        theme: Option<&'static str>,
    ) -> Result<Self, SessionError> {
        if pool.is_empty() {
            return Err(SessionError::EmptyPool(kind.title()));
        }
        let mut game = Self {
            kind,
            difficulty,
            theme,
            session,
            pool,
            current: String::new(),
            game_remaining: kind.game_clock_secs(difficulty),
            status: Status::Running,
            score: 0,
            streak: 0,
            rounds_completed: 0,
            perfect_rounds: 0,
            explosions: 0,
            last_round: None,
            banked: Totals::default(),
        };
        game.next_round()?;
        info!("{} started at {}", kind.title(), difficulty);
        Ok(game)
    }

    fn next_round(&mut self) -> Result<(), SessionError> {
        let text = self
            .pool
            .next_text()
            .ok_or(SessionError::EmptyPool(self.kind.title()))?;
        self.session.start_scored(
            &text,
            self.kind.round_secs(self.difficulty),
            self.kind.policy(self.difficulty),
        )?;
        self.current = text;
        Ok(())
    }

    pub fn submit_keystroke(&mut self, keystroke: Keystroke) -> InputReport {
        let report = self.session.submit_keystroke(keystroke);
        if self.status == Status::Running
            && self.session.finish_reason() == Some(FinishReason::Completed)
        {
            self.complete_round();
        }
        report
    }

    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.status != Status::Running || !self.session.on_timer(id) {
            return false;
        }
        self.after_tick();
        true
    }

    /// Advances both clocks by one second without going through the scheduler
    pub fn tick(&mut self) {
        if self.status != Status::Running {
            return;
        }
        self.session.tick();
        self.after_tick();
    }

    fn after_tick(&mut self) {
        if self.session.finish_reason() == Some(FinishReason::TimeExpired) {
            self.explode();
        }
        if self.status != Status::Running {
            return;
        }
        if let Some(remaining) = self.game_remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
            if *remaining == 0 {
                self.end();
            }
        }
    }

    fn complete_round(&mut self) {
        let score = self.session.round_score(self.streak).unwrap_or_default();
        self.bank_round();
        self.score += score.points;
        self.rounds_completed += 1;
        if score.perfect {
            self.perfect_rounds += 1;
        }
        if score.perfect || self.kind == GameKind::BombDefuser {
            self.streak += 1;
        } else {
            self.streak = 0;
        }
        if let Some(remaining) = self.game_remaining.as_mut() {
            *remaining += score.bonus_secs;
        }
        self.last_round = Some(score);
        debug!(
            "round {} done: {:?}, total {}",
            self.rounds_completed, score, self.score
        );
        self.advance();
    }

    fn explode(&mut self) {
        self.bank_round();
        self.explosions += 1;
        self.streak = 0;
        self.last_round = Some(RoundScore::default());
        debug!("bomb exploded ({}/{})", self.explosions, MAX_EXPLOSIONS);
        if self.explosions >= MAX_EXPLOSIONS {
            self.end();
        } else {
            self.advance();
        }
    }

    fn advance(&mut self) {
        if let Err(err) = self.next_round() {
            warn!("cannot start next round: {err}");
            self.end();
        }
    }

    fn bank_round(&mut self) {
        let state = self.session.state();
        self.banked.words += word_count(&state.input_text());
        self.banked.keystrokes += state.total_keystrokes;
        self.banked.errors += state.error_count;
        self.banked.elapsed += state.elapsed;
    }

    /// Ends the game now, cancelling the round in progress
    pub fn abandon(&mut self) {
        if self.status == Status::Running {
            self.end();
        }
    }

    fn end(&mut self) {
        if self.session.status() == Status::Running {
            self.bank_round();
        }
        self.session.reset();
        self.status = Status::Finished;
        info!(
            "{} over: score {}, {} rounds",
            self.kind.title(),
            self.score,
            self.rounds_completed
        );
    }

    pub fn summary(&self) -> GameSummary {
        let mut totals = self.banked;
        if self.session.status() == Status::Running {
            let state = self.session.state();
            totals.words += word_count(&state.input_text());
            totals.keystrokes += state.total_keystrokes;
            totals.errors += state.error_count;
            totals.elapsed += state.elapsed;
        }
        GameSummary {
            score: self.score,
            rounds_completed: self.rounds_completed,
            perfect_rounds: self.perfect_rounds,
            explosions: self.explosions,
            wpm: metrics::wpm_from_words(totals.words, totals.elapsed),
            accuracy: metrics::accuracy(totals.keystrokes, totals.errors),
            elapsed: totals.elapsed,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn theme(&self) -> Option<&'static str> {
        self.theme
    }

    pub fn current_text(&self) -> &str {
        &self.current
    }

    pub fn session(&self) -> &TypingSession {
        &self.session
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::Finished
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn last_round(&self) -> Option<RoundScore> {
        self.last_round
    }

    pub fn seconds_remaining(&self) -> Option<u64> {
        self.game_remaining.or(self.session.seconds_remaining())
    }
}
