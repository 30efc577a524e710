//! The time-dependent shell around the session.
//!
//! The session never sleeps and never reads wall time for its timers. Delayed
//! transitions and the clock refresh live in a [`Scheduler`] driven by
//! logical time that the embedding event loop advances, and calendar time
//! comes from an injectable [`Clock`]. Both keep the session deterministic
//! under test.

mod clock;
mod scheduler;

pub use clock::{is_valid_format, Clock, FixedClock, SystemClock};
pub use scheduler::{Fired, Scheduler, TimerAction, TimerHandle};
