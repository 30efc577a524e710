//! Fluent construction of sessions.
//!
//! ```rust
//! use atm_session::core::{Guard, NavigationRequest, Screen};
//! use atm_session::SessionBuilder;
//! use rust_decimal::Decimal;
//!
//! let session = SessionBuilder::new()
//!     .opening_balance(Decimal::new(25_000, 2))
//!     .pin("0042")
//!     .guard(Guard::new("no-statement", |req: &NavigationRequest| {
//!         req.to != Screen::Statement
//!     }))
//!     .build()?;
//!
//! assert_eq!(session.balance_display(), "250.00");
//! # Ok::<(), atm_session::ConfigError>(())
//! ```

use crate::config::SessionConfig;
use crate::core::Guard;
use crate::effects::{Clock, SystemClock};
use crate::error::ConfigError;
use crate::session::{Session, ViewObserver};
use rust_decimal::Decimal;

/// Builder for [`Session`].
///
/// The `authenticated` guard is always installed; guards added here run
/// after it, in the order they were added.
#[derive(Default)]
pub struct SessionBuilder {
    config: SessionConfig,
    clock: Option<Box<dyn Clock>>,
    guards: Vec<Guard>,
    observers: Vec<Box<dyn ViewObserver>>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn opening_balance(mut self, balance: Decimal) -> Self {
        self.config.opening_balance = balance;
        self
    }

    pub fn pin(mut self, pin: impl Into<String>) -> Self {
        self.config.pin = pin.into();
        self
    }

    /// Calendar time source. Defaults to [`SystemClock`].
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Add a navigation guard.
    pub fn guard(mut self, guard: Guard) -> Self {
        self.guards.push(guard);
        self
    }

    /// Add an observer. It receives the initial view once the session is built.
    pub fn observer(mut self, observer: impl ViewObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Validate the configuration and build the session.
    pub fn build(self) -> Result<Session, ConfigError> {
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock));
        Session::from_parts(self.config, clock, self.guards, self.observers)
    }
}
