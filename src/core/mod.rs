//! Screens, navigation guards and navigation history.
//!
//! This module contains the pure part of the ATM state machine: the set of
//! screens, the predicates that decide which screen changes are allowed and
//! the record of changes that happened. Nothing here performs side effects.

mod guard;
mod history;
mod screen;

pub use guard::{Guard, NavigationRequest};
pub use history::{NavigationCause, NavigationHistory, NavigationRecord};
pub use screen::Screen;
