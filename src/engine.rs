use std::time::{Duration, Instant};

use log::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::SessionError;
use crate::metrics::Metrics;
use crate::scheduler::{IntervalScheduler, Scheduler, TimerId};
use crate::scoring::{RoundScore, ScoreContext, ScoringPolicy, Unscored};
use crate::session::{CharacterState, FinishReason, SessionMode, SessionState, Status};
use crate::typing_policy::{self, KeyClass, Keystroke, Outcome};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// What a caller needs to redraw after feeding input
#[derive(Debug, Clone, PartialEq)]
pub struct InputReport {
    pub outcome: Outcome,
    pub input: String,
    pub character_states: Vec<CharacterState>,
    pub metrics: Metrics,
    pub status: Status,
}

/// A strict-mode typing session over one reference text.
///
/// Owns at most one repeating timer at a time. `start`, `reset`, finishing
/// and dropping the session all cancel it.
#[derive(Debug)]
pub struct TypingSession {
    state: SessionState,
    clock: Box<dyn Clock>,
    scheduler: Box<dyn Scheduler>,
    timer: Option<TimerId>,
    policy: Box<dyn ScoringPolicy>,
}

impl TypingSession {
    pub fn new<C, S>(clock: C, scheduler: S) -> Self
    where
        C: Clock + 'static,
        S: Scheduler + 'static,
    {
        Self {
            state: SessionState::default(),
            clock: Box::new(clock),
            scheduler: Box::new(scheduler),
            timer: None,
            policy: Box::new(Unscored),
        }
    }

    /// Session on the wall clock, plus the scheduler handle the host polls
    pub fn with_system_clock() -> (Self, IntervalScheduler) {
        let scheduler = IntervalScheduler::new(SystemClock);
        (Self::new(SystemClock, scheduler.clone()), scheduler)
    }

    pub fn start(&mut self, reference: &str, duration_secs: Option<u64>) -> Result<(), SessionError> {
        self.start_scored(reference, duration_secs, Unscored)
    }

    /// Starts a session whose finished result is scored by `policy`.
    /// Any session already in progress is abandoned first.
    pub fn start_scored<P>(
        &mut self,
        reference: &str,
        duration_secs: Option<u64>,
        policy: P,
    ) -> Result<(), SessionError>
    where
        P: ScoringPolicy + 'static,
    {
        if reference.is_empty() {
            return Err(SessionError::EmptyReference);
        }
        if duration_secs == Some(0) {
            return Err(SessionError::ZeroDuration);
        }

        self.reset();

        let mode = SessionMode::from_duration(duration_secs);
        self.state = SessionState::running(reference, mode, self.clock.now());
        self.policy = Box::new(policy);
        self.timer = Some(self.scheduler.schedule_repeating(TICK_PERIOD));
        debug!(
            "session started: {} chars, {:?}, policy {:?}",
            self.state.reference.len(),
            mode,
            self.policy
        );
        Ok(())
    }

    pub fn submit_keystroke(&mut self, keystroke: Keystroke) -> InputReport {
        if self.state.status != Status::Running {
            return self.report(Outcome::Inactive);
        }

        let outcome = match keystroke.classify() {
            KeyClass::Rejected => Outcome::Blocked,
            KeyClass::Navigation => Outcome::PassThrough,
            KeyClass::Backspace => typing_policy::erase(&mut self.state),
            KeyClass::Printable(c) => self.write(c),
        };
        self.refresh();
        self.report(outcome)
    }

    /// Applies a full text-field snapshot: deletions are accepted, each new
    /// char past the shared prefix goes through the strict write path.
    pub fn submit_snapshot(&mut self, snapshot: &str) -> InputReport {
        if self.state.status != Status::Running {
            return self.report(Outcome::Inactive);
        }

        let before = self.state.input.len();
        let appended = typing_policy::reconcile_snapshot(&mut self.state, snapshot);
        let mut outcome = if self.state.input.len() < before {
            Outcome::Erased
        } else {
            Outcome::PassThrough
        };
        for c in appended {
            if self.state.status != Status::Running {
                break;
            }
            outcome = if c.is_control() {
                Outcome::Blocked
            } else {
                self.write(c)
            };
        }
        self.refresh();
        self.report(outcome)
    }

    fn write(&mut self, c: char) -> Outcome {
        let outcome = typing_policy::write_strict(&mut self.state, c);
        if outcome == Outcome::Correct && self.state.is_complete() {
            self.finish(FinishReason::Completed);
        }
        outcome
    }

    /// One elapsed second. Counts down timed sessions and refreshes metrics.
    pub fn tick(&mut self) {
        if self.state.status != Status::Running {
            return;
        }
        if let Some(remaining) = self.state.seconds_remaining {
            let remaining = remaining.saturating_sub(1);
            self.state.seconds_remaining = Some(remaining);
            if remaining == 0 {
                self.finish(FinishReason::TimeExpired);
            }
        }
        self.refresh();
    }

    /// Entry point for scheduler callbacks. Returns false for ids that are
    /// not this session's live timer.
    pub fn on_timer(&mut self, id: TimerId) -> bool {
        if self.timer != Some(id) {
            debug!("ignoring stale timer {:?}", id);
            return false;
        }
        self.tick();
        true
    }

    /// Adds seconds to a running timed session's countdown
    pub fn extend(&mut self, secs: u64) {
        if self.state.status != Status::Running {
            return;
        }
        if let Some(remaining) = self.state.seconds_remaining.as_mut() {
            *remaining += secs;
        }
    }

    pub fn reset(&mut self) {
        self.cancel_timer();
        if self.state.status != Status::Idle {
            debug!("session reset from {:?}", self.state.status);
        }
        self.state = SessionState::default();
        self.policy = Box::new(Unscored);
    }

    fn finish(&mut self, reason: FinishReason) {
        self.cancel_timer();
        self.state.finish(reason, self.clock.now());
        debug!(
            "session finished ({:?}): {} keystrokes, {} errors",
            reason, self.state.total_keystrokes, self.state.error_count
        );
    }

    fn cancel_timer(&mut self) {
        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
        }
    }

    fn refresh(&mut self) {
        let now = self.clock.now();
        self.state.refresh(now);
    }

    fn report(&self, outcome: Outcome) -> InputReport {
        InputReport {
            outcome,
            input: self.state.input_text(),
            character_states: self.state.character_states().collect(),
            metrics: self.state.metrics,
            status: self.state.status,
        }
    }

    /// Score of a finished session under the policy given at start
    pub fn round_score(&self, streak: u32) -> Option<RoundScore> {
        if self.state.status != Status::Finished {
            return None;
        }
        let reference = self.state.reference_text();
        let ctx = ScoreContext {
            reference: &reference,
            completed: self.state.finish_reason == Some(FinishReason::Completed),
            elapsed_secs: self.state.elapsed.as_secs_f64(),
            correct_count: self.state.correct_keystrokes(),
            error_count: self.state.error_count,
            remaining_secs: self.state.seconds_remaining,
            duration_secs: self.state.mode.duration_secs(),
            streak,
        };
        Some(self.policy.score(&ctx))
    }

    pub fn character_states(&self) -> impl Iterator<Item = CharacterState> + '_ {
        self.state.character_states()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn metrics(&self) -> Metrics {
        self.state.metrics
    }

    /// Typed chars, always a prefix of `reference()`
    pub fn input(&self) -> &[char] {
        &self.state.input
    }

    pub fn reference(&self) -> &[char] {
        &self.state.reference
    }

    /// `input()` as a string, the same form `InputReport::input` uses
    pub fn input_text(&self) -> String {
        self.state.input_text()
    }

    pub fn reference_text(&self) -> String {
        self.state.reference_text()
    }

    pub fn seconds_remaining(&self) -> Option<u64> {
        self.state.seconds_remaining
    }

    pub fn elapsed(&self) -> Duration {
        self.state.elapsed
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.state.started_at
    }

    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.state.finish_reason
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn has_started(&self) -> bool {
        self.state.status != Status::Idle
    }

    pub fn has_finished(&self) -> bool {
        self.state.status == Status::Finished
    }
}

impl Drop for TypingSession {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
