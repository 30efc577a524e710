//! Logical-time timers with cancellable handles.

use crate::core::Screen;
use std::time::Duration;

/// Identifies a scheduled timer so it can be cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// What the session does when a timer fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerAction {
    /// Move to a screen without running guards
    Navigate(Screen),
    /// End the session and return to the welcome screen
    Logout,
    /// Re-render the current time
    RefreshClock,
}

/// A timer that came due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fired {
    pub handle: TimerHandle,
    pub action: TimerAction,
    /// The logical time the timer was due at
    pub due: Duration,
}

#[derive(Clone, Debug)]
struct Timer {
    handle: TimerHandle,
    due: Duration,
    period: Option<Duration>,
    action: TimerAction,
}

/// Timer queue driven by logical time.
///
/// Time only moves through [`Scheduler::pop_due`] and
/// [`Scheduler::advance_to`]. Timers due at the same instant fire in the order
/// they were scheduled. A cancelled timer never fires. A periodic timer that
/// fell several periods behind fires once per `pop_due` window, not once per
/// missed period. Time saturates at `Duration::MAX`.
///
/// # Example
///
/// ```rust
/// use atm_session::core::Screen;
/// use atm_session::effects::{Scheduler, TimerAction};
/// use std::time::Duration;
///
/// let mut scheduler = Scheduler::new();
/// let handle = scheduler.schedule_once(
///     Duration::from_millis(1500),
///     TimerAction::Navigate(Screen::Dashboard),
/// );
///
/// assert!(scheduler.pop_due(Duration::from_secs(1)).is_none());
/// let fired = scheduler.pop_due(Duration::from_secs(2)).unwrap();
/// assert_eq!(fired.handle, handle);
/// assert_eq!(scheduler.now(), Duration::from_millis(1500));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_id: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fire `action` once, `delay` from now.
    pub fn schedule_once(&mut self, delay: Duration, action: TimerAction) -> TimerHandle {
        self.insert(delay, None, action)
    }

    /// Fire `action` every `period`, first one `period` from now.
    ///
    /// A zero period is raised to one millisecond so the timer cannot fire
    /// forever within a single instant.
    pub fn schedule_every(&mut self, period: Duration, action: TimerAction) -> TimerHandle {
        let period = period.max(Duration::from_millis(1));
        self.insert(period, Some(period), action)
    }

    fn insert(&mut self, delay: Duration, period: Option<Duration>, action: TimerAction) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            handle,
            due: self.now.saturating_add(delay),
            period,
            action,
        });
        handle
    }

    /// Cancel a timer. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        self.timers.len() != before
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// When the next timer is due, if any.
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.due).min()
    }

    /// Take the earliest timer due at or before `until`.
    ///
    /// Logical time moves to the timer's due time. One-shot timers are
    /// removed; periodic timers are re-armed at their first period boundary
    /// after `until`.
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(_, t)| (t.due, t.handle))
            .map(|(i, _)| i)?;

        let timer = &self.timers[index];
        let fired = Fired {
            handle: timer.handle,
            action: timer.action,
            due: timer.due,
        };
        let period = timer.period;
        self.now = self.now.max(fired.due);

        match period.map(|p| next_after(fired.due, p, until)) {
            Some(next) if next > until => self.timers[index].due = next,
            // one-shot, or periodic with nowhere left to go
            _ => {
                self.timers.remove(index);
            }
        }

        Some(fired)
    }

    /// Move logical time forward without firing anything. Never moves back.
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

/// First `due + k * period` (k >= 1) later than `until`, saturating.
fn next_after(due: Duration, period: Duration, until: Duration) -> Duration {
    let missed = until.saturating_sub(due).as_nanos() / period.as_nanos().max(1);
    u32::try_from(missed + 1)
        .ok()
        .and_then(|k| period.checked_mul(k))
        .and_then(|step| due.checked_add(step))
        .unwrap_or(Duration::MAX)
}
