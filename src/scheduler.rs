use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::trace;

use crate::clock::Clock;

/// Shortest period a timer may repeat at; shorter requests are raised to it
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle to one scheduled repeating timer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Host timer facility a session schedules its tick on.
///
/// The scheduler never calls back into the session. The host asks it which
/// timers are due and forwards each id to `TypingSession::on_timer`.
pub trait Scheduler: fmt::Debug {
    fn schedule_repeating(&self, period: Duration) -> TimerId;
    fn cancel(&self, id: TimerId);
}

#[derive(Debug)]
struct Timer {
    id: TimerId,
    period: Duration,
    next_due: Instant,
}

#[derive(Debug, Default)]
struct Timers {
    next_id: u64,
    active: Vec<Timer>,
}

/// Repeating-interval scheduler polled by the host loop.
///
/// Clones share one timer table, so the session can own one handle while
/// the event loop polls through another.
#[derive(Clone)]
pub struct IntervalScheduler {
    clock: Rc<dyn Clock>,
    timers: Rc<RefCell<Timers>>,
}

impl fmt::Debug for IntervalScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalScheduler")
            .field("active_timers", &self.active_timers())
            .finish()
    }
}

impl IntervalScheduler {
    pub fn new<C: Clock + 'static>(clock: C) -> Self {
        Self {
            clock: Rc::new(clock),
            timers: Rc::new(RefCell::new(Timers::default())),
        }
    }

    pub fn active_timers(&self) -> usize {
        self.timers.borrow().active.len()
    }

    /// Time until the earliest live timer is due, if any are live
    pub fn next_deadline(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.timers
            .borrow()
            .active
            .iter()
            .map(|t| t.next_due.saturating_duration_since(now))
            .min()
    }

    /// Returns one id per elapsed period of every live timer, oldest first.
    /// A timer that fell several periods behind fires once per missed period.
    pub fn fire_due(&self) -> Vec<TimerId> {
        let now = self.clock.now();
        let mut due = Vec::new();
        let mut timers = self.timers.borrow_mut();
        for timer in timers.active.iter_mut() {
            while timer.next_due <= now {
                due.push((timer.next_due, timer.id));
                timer.next_due += timer.period;
            }
        }
        due.sort_by_key(|(at, _)| *at);
        due.into_iter().map(|(_, id)| id).collect()
    }
}

impl Scheduler for IntervalScheduler {
    fn schedule_repeating(&self, period: Duration) -> TimerId {
        let period = period.max(MIN_PERIOD);
        let mut timers = self.timers.borrow_mut();
        timers.next_id += 1;
        let id = TimerId(timers.next_id);
        timers.active.push(Timer {
            id,
            period,
            next_due: self.clock.now() + period,
        });
        trace!("scheduled timer {:?} every {:?}", id, period);
        id
    }

    fn cancel(&self, id: TimerId) {
        let mut timers = self.timers.borrow_mut();
        timers.active.retain(|t| t.id != id);
        trace!("cancelled timer {:?}", id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn nothing_fires_before_the_first_period() {
        let clock = ManualClock::new();
        let scheduler = IntervalScheduler::new(clock.clone());
        scheduler.schedule_repeating(Duration::from_secs(1));

        clock.advance(Duration::from_millis(999));
        assert!(scheduler.fire_due().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(scheduler.fire_due().len(), 1);
    }

    #[test]
    fn missed_periods_fire_once_each() {
        let clock = ManualClock::new();
        let scheduler = IntervalScheduler::new(clock.clone());
        let id = scheduler.schedule_repeating(Duration::from_secs(1));

        clock.advance(Duration::from_secs(3));
        assert_eq!(scheduler.fire_due(), vec![id, id, id]);
        assert!(scheduler.fire_due().is_empty());
    }

    #[test]
    fn zero_period_is_raised_to_the_minimum() {
        let clock = ManualClock::new();
        let scheduler = IntervalScheduler::new(clock.clone());
        let id = scheduler.schedule_repeating(Duration::ZERO);

        assert!(scheduler.fire_due().is_empty());
        clock.advance(MIN_PERIOD * 3);
        assert_eq!(scheduler.fire_due(), vec![id, id, id]);
        assert_eq!(scheduler.next_deadline(), Some(MIN_PERIOD));
    }

    #[test]
    fn cancelled_timers_stop_firing() {
        let clock = ManualClock::new();
        let scheduler = IntervalScheduler::new(clock.clone());
        let id = scheduler.schedule_repeating(Duration::from_secs(1));
        assert_eq!(scheduler.active_timers(), 1);

        scheduler.cancel(id);
        clock.advance(Duration::from_secs(5));

        assert_eq!(scheduler.active_timers(), 0);
        assert!(scheduler.fire_due().is_empty());
    }

    #[test]
    fn clones_share_the_timer_table() {
        let clock = ManualClock::new();
        let scheduler = IntervalScheduler::new(clock.clone());
        let handle = scheduler.clone();

        let id = handle.schedule_repeating(Duration::from_secs(1));
        assert_eq!(scheduler.active_timers(), 1);

        clock.advance(Duration::from_secs(1));
        assert_eq!(scheduler.fire_due(), vec![id]);
    }

    #[test]
    fn next_deadline_tracks_earliest_timer() {
        let clock = ManualClock::new();
        let scheduler = IntervalScheduler::new(clock.clone());
        assert_eq!(scheduler.next_deadline(), None);

        scheduler.schedule_repeating(Duration::from_secs(2));
        scheduler.schedule_repeating(Duration::from_secs(1));
        clock.advance(Duration::from_millis(400));

        assert_eq!(scheduler.next_deadline(), Some(Duration::from_millis(600)));
    }
}
