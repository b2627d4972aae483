//! Per-game scoring rules layered over the shared correctness loop.
//!
//! A policy is handed to `TypingSession::start` and applied when the session
//! finishes; the session itself never knows which game it belongs to.

use std::fmt;

use crate::texts::{is_special_char, Difficulty};

/// Everything a policy may look at when scoring one finished round
#[derive(Debug, Clone, Copy)]
pub struct ScoreContext<'a> {
    pub reference: &'a str,
    pub completed: bool,
    pub elapsed_secs: f64,
    pub correct_count: u32,
    pub error_count: u32,
    pub remaining_secs: Option<u64>,
    pub duration_secs: Option<u64>,
    /// Perfect rounds immediately preceding this one
    pub streak: u32,
}

impl ScoreContext<'_> {
    pub fn is_perfect(&self) -> bool {
        self.completed && self.error_count == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundScore {
    pub points: u64,
    /// Seconds added back to the game clock
    pub bonus_secs: u64,
    pub perfect: bool,
}

pub trait ScoringPolicy: fmt::Debug {
    fn score(&self, ctx: &ScoreContext<'_>) -> RoundScore;
}

impl<P: ScoringPolicy + ?Sized> ScoringPolicy for Box<P> {
    fn score(&self, ctx: &ScoreContext<'_>) -> RoundScore {
        (**self).score(ctx)
    }
}

/// Streak multiplier shared by Time Attack and Bomb Defuser: 1.2x up to 2x
fn streak_multiplier(streak: u32) -> f64 {
    (streak + 1).min(5) as f64 * 0.2 + 1.0
}

/// Plain practice: no points
#[derive(Debug, Clone, Copy, Default)]
pub struct Unscored;

impl ScoringPolicy for Unscored {
    fn score(&self, ctx: &ScoreContext<'_>) -> RoundScore {
        RoundScore {
            perfect: ctx.is_perfect(),
            ..RoundScore::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WordMaster {
    pub difficulty: Difficulty,
}

impl WordMaster {
    const BASE_POINTS: u64 = 10;
    const CLEAN_WORD_BONUS: u64 = 3;

    fn multiplier(&self) -> f64 {
        match self.difficulty {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.0,
        }
    }
}

impl ScoringPolicy for WordMaster {
    fn score(&self, ctx: &ScoreContext<'_>) -> RoundScore {
        if !ctx.completed {
            return RoundScore::default();
        }
        let length_bonus = ctx.reference.chars().count() as u64 / 3;
        let mut points =
            ((Self::BASE_POINTS + length_bonus) as f64 * self.multiplier()).floor() as u64;
        if ctx.is_perfect() {
            points += Self::CLEAN_WORD_BONUS;
        }
        RoundScore {
            points,
            bonus_secs: 0,
            perfect: ctx.is_perfect(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TimeAttack {
    pub difficulty: Difficulty,
}

impl TimeAttack {
    const BASE_POINTS: f64 = 20.0;
    const PERFECT_TIME_BONUS: u64 = 5;

    fn multiplier(&self) -> f64 {
        match self.difficulty {
            Difficulty::Easy => 1.0,
            Difficulty::Medium => 1.5,
            Difficulty::Hard => 2.5,
        }
    }
}

impl ScoringPolicy for TimeAttack {
    fn score(&self, ctx: &ScoreContext<'_>) -> RoundScore {
        if !ctx.is_perfect() {
            return RoundScore::default();
        }
        let points = (Self::BASE_POINTS * self.multiplier() * streak_multiplier(ctx.streak))
            .floor() as u64;
        RoundScore {
            points,
            bonus_secs: Self::PERFECT_TIME_BONUS,
            perfect: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BombDefuser;

impl BombDefuser {
    const BASE_POINTS: f64 = 50.0;
    const MAX_TIME_BONUS: f64 = 30.0;
}

impl ScoringPolicy for BombDefuser {
    fn score(&self, ctx: &ScoreContext<'_>) -> RoundScore {
        if !ctx.completed {
            return RoundScore::default();
        }
        let time_bonus = match (ctx.remaining_secs, ctx.duration_secs) {
            (Some(remaining), Some(total)) if total > 0 => {
                (remaining as f64 / total as f64 * Self::MAX_TIME_BONUS).round()
            }
            _ => 0.0,
        };
        let points = ((Self::BASE_POINTS + time_bonus) * streak_multiplier(ctx.streak)).floor();
        RoundScore {
            points: points as u64,
            bonus_secs: 0,
            perfect: ctx.is_perfect(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationPro;

impl PunctuationPro {
    const POINTS_PER_CHAR: u64 = 5;
    const SPECIAL_CHAR_BONUS: u64 = 2;
    const PERFECT_LINE_BONUS: u64 = 20;
}

impl ScoringPolicy for PunctuationPro {
    fn score(&self, ctx: &ScoreContext<'_>) -> RoundScore {
        if !ctx.completed {
            return RoundScore::default();
        }
        let chars = ctx.reference.chars().count() as u64;
        let special = ctx.reference.chars().filter(|c| is_special_char(*c)).count() as u64;
        let mut points = Self::POINTS_PER_CHAR * chars + Self::SPECIAL_CHAR_BONUS * special;
        if ctx.is_perfect() {
            points += Self::PERFECT_LINE_BONUS;
        }
        RoundScore {
            points,
            bonus_secs: 0,
            perfect: ctx.is_perfect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(reference: &str, errors: u32, streak: u32) -> ScoreContext<'_> {
        ScoreContext {
            reference,
            completed: true,
            elapsed_secs: 3.0,
            correct_count: reference.chars().count() as u32,
            error_count: errors,
            remaining_secs: None,
            duration_secs: None,
            streak,
        }
    }

    #[test]
    fn unscored_reports_perfection_only() {
        let score = Unscored.score(&ctx("cat", 0, 0));
        assert_eq!(score.points, 0);
        assert!(score.perfect);
    }

    #[test]
    fn word_master_scales_with_length_and_difficulty() {
        let easy = WordMaster {
            difficulty: Difficulty::Easy,
        };
        // 10 + 6/3 = 12, +3 clean bonus
        assert_eq!(easy.score(&ctx("rabbit", 0, 0)).points, 15);
        assert_eq!(easy.score(&ctx("rabbit", 2, 0)).points, 12);

        let medium = WordMaster {
            difficulty: Difficulty::Medium,
        };
        // floor(12 * 1.5) = 18
        assert_eq!(medium.score(&ctx("rabbit", 1, 0)).points, 18);
    }

    #[test]
    fn time_attack_rewards_only_perfect_sentences() {
        let policy = TimeAttack {
            difficulty: Difficulty::Easy,
        };
        let perfect = policy.score(&ctx("All that glitters is not gold.", 0, 0));
        // 20 * 1 * 1.2
        assert_eq!(perfect.points, 24);
        assert_eq!(perfect.bonus_secs, 5);

        let sloppy = policy.score(&ctx("All that glitters is not gold.", 1, 3));
        assert_eq!(sloppy, RoundScore::default());
    }

    #[test]
    fn time_attack_streak_multiplier_caps_at_double() {
        let policy = TimeAttack {
            difficulty: Difficulty::Hard,
        };
        // 20 * 2.5 * 2.0
        assert_eq!(policy.score(&ctx("x", 0, 4)).points, 100);
        assert_eq!(policy.score(&ctx("x", 0, 40)).points, 100);
    }

    #[test]
    fn bomb_defuser_time_bonus() {
        let mut c = ctx("RTX492", 0, 0);
        c.remaining_secs = Some(15);
        c.duration_secs = Some(30);
        // (50 + 15) * 1.2 = 78
        assert_eq!(BombDefuser.score(&c).points, 78);

        c.completed = false;
        assert_eq!(BombDefuser.score(&c).points, 0);
    }

    #[test]
    fn punctuation_pro_counts_special_chars() {
        // 7 chars, 3 special ('.', '%', '$')
        let score = PunctuationPro.score(&ctx("25% $1.", 0, 0));
        assert_eq!(score.points, 5 * 7 + 2 * 3 + 20);

        let score = PunctuationPro.score(&ctx("25% $1.", 1, 0));
        assert_eq!(score.points, 5 * 7 + 2 * 3);
    }
}
