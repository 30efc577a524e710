//! ATM Session: a simulated automated teller machine session
//!
//! One customer, one account, one screen at a time. The crate follows a
//! "pure core, imperative shell" layout: screens, guards, validation rules and
//! money values are plain data and pure functions, while the [`Session`]
//! owns the mutable state, the timers and the observers that render it.
//!
//! # Core Concepts
//!
//! - **Screen**: the nine screens of the machine, exactly one active
//! - **Guards**: pure predicates deciding which navigations are allowed
//! - **Account**: a decimal balance, a four digit PIN and a transaction log
//! - **Timers**: delayed transitions driven by logical time, cancelled on navigation
//! - **View**: a serializable snapshot of everything the screens display
//!
//! # Example
//!
//! ```rust
//! use atm_session::{Screen, Session, SessionError};
//! use std::time::Duration;
//!
//! let mut session = Session::builder().build()?;
//!
//! // Protected screens are refused until the PIN is accepted
//! assert!(matches!(
//!     session.navigate_to(Screen::Dashboard),
//!     Err(SessionError::NavigationBlocked { .. })
//! ));
//!
//! session.navigate_to(Screen::PinEntry)?;
//! for digit in "1234".chars() {
//!     session.append_digit(digit);
//! }
//! session.validate_login()?;
//!
//! session.navigate_to(Screen::Withdraw)?;
//! assert_eq!(session.withdraw("6000"), Err(SessionError::InsufficientFunds));
//! session.withdraw("200")?;
//! assert_eq!(session.balance_display(), "4800.00");
//!
//! session.advance(Duration::from_millis(1500));
//! assert_eq!(session.screen(), Screen::Dashboard);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod account;
pub mod builder;
pub mod config;
pub mod core;
pub mod effects;
pub mod enforcement;
pub mod error;
pub mod session;

// Re-export commonly used types
pub use builder::SessionBuilder;
pub use config::SessionConfig;
pub use core::{Guard, NavigationRequest, Screen};
pub use error::{ConfigError, SessionError};
pub use session::{MessageSlot, Session, View, ViewObserver};
