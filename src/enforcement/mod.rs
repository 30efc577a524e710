//! Validation of user requests against the account.
//!
//! Checks are expressed with Stillwater's `Validation` so that independent
//! checks accumulate every violation instead of stopping at the first one.
//! Violations keep the order in which checks are declared; the session
//! reports the first and logs the rest.
//!
//! # Example
//!
//! ```rust
//! use atm_session::account::Pin;
//! use atm_session::enforcement::{check_pin_change, first_violation, PinChange};
//! use atm_session::SessionError;
//! use stillwater::Validation;
//!
//! let current = Pin::parse("1234").unwrap();
//! let request = PinChange { old: "0000", new: "12a4", confirm: "9999" };
//!
//! match check_pin_change(&current, &request) {
//!     Validation::Failure(errors) => {
//!         assert_eq!(errors.len(), 3);
//!         assert_eq!(first_violation(&errors), SessionError::WrongOldPin);
//!     }
//!     Validation::Success(_) => unreachable!(),
//! }
//! ```

pub mod rules;

pub use rules::{
    check_amount, check_pin_change, check_withdrawal, first_violation, Checked, PinChange,
};
