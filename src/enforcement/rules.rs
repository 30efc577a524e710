//! Amount and PIN-change rules.

use crate::account::{Amount, Pin};
use crate::error::SessionError;
use rust_decimal::Decimal;
use stillwater::{NonEmptyVec, Validation};

/// Outcome of a rule check: the validated value, or every violation found.
pub type Checked<T> = Validation<T, NonEmptyVec<SessionError>>;

/// A PIN-change request as typed into the three PIN fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinChange<'a> {
    pub old: &'a str,
    pub new: &'a str,
    pub confirm: &'a str,
}

fn require(condition: bool, violation: SessionError) -> Checked<()> {
    if condition {
        Validation::success(())
    } else {
        Validation::fail(violation)
    }
}

fn lift<T>(result: Result<T, SessionError>) -> Checked<T> {
    Validation::from_result(result).map_err(NonEmptyVec::singleton)
}

/// Parse a deposit or withdrawal amount.
pub fn check_amount(input: &str) -> Checked<Amount> {
    lift(Amount::parse(input))
}

/// Parse a withdrawal amount and check it against the balance.
///
/// The balance check depends on a parsed amount, so it only runs once the
/// amount itself is valid.
pub fn check_withdrawal(input: &str, balance: Decimal) -> Checked<Amount> {
    check_amount(input).and_then(|amount| {
        if amount.value() <= balance {
            Validation::success(amount)
        } else {
            Validation::fail(SessionError::InsufficientFunds)
        }
    })
}

/// Check a PIN change, accumulating violations in this order: old PIN,
/// new PIN format, confirmation.
pub fn check_pin_change(current: &Pin, request: &PinChange<'_>) -> Checked<Pin> {
    let old_matches = require(current.matches(request.old), SessionError::WrongOldPin);
    let new_pin = lift(Pin::parse(request.new));
    let confirmed = require(request.new == request.confirm, SessionError::PinMismatch);

    old_matches
        .and(new_pin)
        .and(confirmed)
        .map(|(((), pin), ())| pin)
}

/// The violation a user is shown: the first one in check order.
pub fn first_violation(violations: &NonEmptyVec<SessionError>) -> SessionError {
    violations.head().clone()
}
