//! Calendar time sources.

use chrono::format::{Item, StrftimeItems};
use chrono::{Local, NaiveDate, NaiveDateTime};
use std::sync::{Arc, Mutex};

/// Source of the current local date and time.
pub trait Clock: Send {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// The machine's local clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to. Clones share the same time.
///
/// ```rust
/// use atm_session::effects::{Clock, FixedClock};
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2026, 10, 18)
///     .unwrap()
///     .and_hms_opt(9, 30, 0)
///     .unwrap();
/// let clock = FixedClock::new(start);
/// let handle = clock.clone();
///
/// handle.set(start + chrono::Duration::days(1));
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
/// ```
#[derive(Clone, Debug)]
pub struct FixedClock {
    now: Arc<Mutex<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        match self.now.lock() {
            Ok(mut guard) => *guard = now,
            Err(poisoned) => *poisoned.into_inner() = now,
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Whether a strftime-style format string is understood by chrono.
pub fn is_valid_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
