use std::time::{Duration, Instant};

use crate::metrics::Metrics;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Running,
    Finished,
}

/// How a running session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    /// Countdown of whole seconds; also ends early on a full match
    Timed { duration_secs: u64 },
    /// Runs until the reference text is fully typed
    TextCompletion,
}

impl SessionMode {
    pub fn from_duration(duration_secs: Option<u64>) -> Self {
        match duration_secs {
            Some(duration_secs) => SessionMode::Timed { duration_secs },
            None => SessionMode::TextCompletion,
        }
    }

    pub fn duration_secs(&self) -> Option<u64> {
        match self {
            SessionMode::Timed { duration_secs } => Some(*duration_secs),
            SessionMode::TextCompletion => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterState {
    Pending,
    Correct,
    Incorrect,
}

/// Why a running session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Completed,
    TimeExpired,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub reference: Vec<char>,
    pub input: Vec<char>,
    pub mode: SessionMode,
    pub started_at: Option<Instant>,
    pub finished_at: Option<Instant>,
    pub finish_reason: Option<FinishReason>,
    pub elapsed: Duration,
    pub seconds_remaining: Option<u64>,
    pub total_keystrokes: u32,
    pub error_count: u32,
    pub status: Status,
    pub metrics: Metrics,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            reference: Vec::new(),
            input: Vec::new(),
            mode: SessionMode::TextCompletion,
            started_at: None,
            finished_at: None,
            finish_reason: None,
            elapsed: Duration::ZERO,
            seconds_remaining: None,
            total_keystrokes: 0,
            error_count: 0,
            status: Status::Idle,
            metrics: Metrics::default(),
        }
    }
}

impl SessionState {
    pub fn running(reference: &str, mode: SessionMode, now: Instant) -> Self {
        Self {
            reference: reference.chars().collect(),
            mode,
            started_at: Some(now),
            seconds_remaining: mode.duration_secs(),
            status: Status::Running,
            ..Self::default()
        }
    }

    pub fn expected_char(&self) -> Option<char> {
        self.reference.get(self.input.len()).copied()
    }

    pub fn is_complete(&self) -> bool {
        !self.reference.is_empty() && self.input.len() == self.reference.len()
    }

    pub fn input_text(&self) -> String {
        self.input.iter().collect()
    }

    pub fn reference_text(&self) -> String {
        self.reference.iter().collect()
    }

    /// Keystrokes that landed on the expected character
    pub fn correct_keystrokes(&self) -> u32 {
        self.total_keystrokes.saturating_sub(self.error_count)
    }

    /// Per-character comparison of the input against the reference, computed on demand.
    pub fn character_states(&self) -> impl Iterator<Item = CharacterState> + '_ {
        self.reference.iter().enumerate().map(|(i, expected)| {
            match self.input.get(i) {
                None => CharacterState::Pending,
                Some(typed) if typed == expected => CharacterState::Correct,
                Some(_) => CharacterState::Incorrect,
            }
        })
    }

    /// Recomputes elapsed time and metrics. Elapsed time is frozen once finished.
    pub fn refresh(&mut self, now: Instant) {
        let end = self.finished_at.unwrap_or(now);
        self.elapsed = match self.started_at {
            Some(start) => end.saturating_duration_since(start),
            None => Duration::ZERO,
        };
        self.metrics = Metrics::compute(
            &self.input_text(),
            self.elapsed,
            self.total_keystrokes,
            self.error_count,
        );
    }

    pub fn finish(&mut self, reason: FinishReason, now: Instant) {
        self.status = Status::Finished;
        self.finish_reason = Some(reason);
        self.finished_at = Some(now);
    }
}
