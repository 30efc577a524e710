//! Navigation history tracking.
//!
//! Every screen change the session performs is recorded in order, with what
//! caused it and when it happened on the session's logical clock.

use super::screen::Screen;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What triggered a screen change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationCause {
    /// An explicit navigation request from the presentation layer
    Manual,
    /// A successful PIN validation
    Login,
    /// A delayed transition fired by the scheduler
    Timer,
}

/// Record of a single screen change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationRecord {
    /// The screen being left
    pub from: Screen,
    /// The screen being entered
    pub to: Screen,
    /// Why the change happened
    pub cause: NavigationCause,
    /// Session time at which it happened
    pub at: Duration,
}

/// Ordered history of screen changes.
///
/// # Example
///
/// ```rust
/// use atm_session::core::{NavigationCause, NavigationHistory, NavigationRecord, Screen};
/// use std::time::Duration;
///
/// let mut history = NavigationHistory::new();
/// history.record(NavigationRecord {
///     from: Screen::Welcome,
///     to: Screen::PinEntry,
///     cause: NavigationCause::Manual,
///     at: Duration::ZERO,
/// });
///
/// assert_eq!(history.path(), vec![Screen::Welcome, Screen::PinEntry]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NavigationHistory {
    records: Vec<NavigationRecord>,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. Records are expected in chronological order.
    pub fn record(&mut self, record: NavigationRecord) {
        self.records.push(record);
    }

    /// Screens visited in order: the first `from`, then each `to`.
    pub fn path(&self) -> Vec<Screen> {
        let mut path = Vec::with_capacity(self.records.len() + 1);
        if let Some(first) = self.records.first() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|r| r.to));
        path
    }

    pub fn records(&self) -> &[NavigationRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&NavigationRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of screen changes with the given cause.
    pub fn count_by(&self, cause: NavigationCause) -> usize {
        self.records.iter().filter(|r| r.cause == cause).count()
    }
}
