//! The imperative shell of the ATM: one [`Session`] per customer.
//!
//! A session owns the account, the transaction log, the active screen and
//! the transient input. Every operation is synchronous; delayed behavior is
//! expressed as timers that fire when the caller advances logical time with
//! [`Session::advance`]. After each change, registered observers receive a
//! fresh [`View`].

mod controller;
mod input;
mod view;

pub use controller::Session;
pub use input::{FormField, FormFields, PinBuffer};
pub use view::{
    MessageKind, MessageSlot, Messages, StatementRow, StatusMessage, View, ViewObserver,
};
