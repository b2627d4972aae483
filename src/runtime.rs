//! Event loop plumbing: terminal input arrives on a channel, timers come
//! from the session scheduler, and `Runner::step` hands both to the host.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use log::debug;

use crate::scheduler::{IntervalScheduler, TimerId};

/// Terminal input the host reacts to
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait EventSource {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Production event source: a reader thread forwarding crossterm events
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(CtEvent::Key(key)) => tx.send(AppEvent::Key(key)),
                Ok(CtEvent::Resize(_, _)) => tx.send(AppEvent::Resize),
                Ok(_) => Ok(()),
                Err(err) => {
                    debug!("terminal event reader stopped: {err}");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-fed event source for tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Decides how long the runner may wait for input and which timers are due
pub trait Ticker {
    fn timeout(&self) -> Duration;

    /// Timers that came due since the last call
    fn due(&self) -> Vec<TimerId> {
        Vec::new()
    }
}

/// Fixed wait with no timers of its own
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn timeout(&self) -> Duration {
        self.interval
    }
}

/// Wakes no later than the scheduler's next deadline, so countdowns keep
/// moving however fast keys arrive.
#[derive(Clone, Debug)]
pub struct SchedulerTicker {
    scheduler: IntervalScheduler,
    idle: Duration,
}

impl SchedulerTicker {
    /// `idle` caps the wait when no timer is live (redraws still happen)
    pub fn new(scheduler: IntervalScheduler, idle: Duration) -> Self {
        Self { scheduler, idle }
    }
}

impl Ticker for SchedulerTicker {
    fn timeout(&self) -> Duration {
        self.scheduler
            .next_deadline()
            .map_or(self.idle, |deadline| deadline.min(self.idle))
    }

    fn due(&self) -> Vec<TimerId> {
        self.scheduler.fire_due()
    }
}

/// One pass of the loop: timers that came due, then the input (if any)
/// that arrived before the timeout. Timers come first so a key pressed
/// after a deadline lands on an already finished session.
#[derive(Debug, Default)]
pub struct Step {
    pub due: Vec<TimerId>,
    pub event: Option<AppEvent>,
}

pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks until input arrives or the ticker's timeout expires
    pub fn step(&self) -> Step {
        let event = match self.event_source.recv_timeout(self.ticker.timeout()) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                // keep honouring the timeout so timers still fire
                std::thread::sleep(self.ticker.timeout());
                None
            }
        };
        Step {
            due: self.ticker.due(),
            event,
        }
    }
}
