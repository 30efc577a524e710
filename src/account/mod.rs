//! The account behind the ATM: balance, PIN and money values.
//!
//! Balances and amounts are [`Decimal`] values. User input is parsed into an
//! [`Amount`] (strictly positive, two decimal places) before it can touch the
//! balance, and a [`Pin`] can only be built from exactly four ASCII digits, so
//! the account invariants hold by construction.

mod ledger;

pub use ledger::{Transaction, TransactionKind, TransactionLog};

use crate::error::SessionError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;
use std::str::FromStr;

/// Number of digits in a PIN.
pub const PIN_LENGTH: usize = 4;

/// Decimal places used for every displayed amount.
const CURRENCY_DP: u32 = 2;

/// A four digit personal identification number.
///
/// Stored and compared in plain text; this is a simulation.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    /// Parse a PIN, rejecting anything but exactly four ASCII digits.
    ///
    /// ```rust
    /// use atm_session::account::Pin;
    ///
    /// assert!(Pin::parse("0042").is_ok());
    /// assert!(Pin::parse("12a4").is_err());
    /// assert!(Pin::parse("12345").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, SessionError> {
        if is_pin_shaped(input) {
            Ok(Pin(input.to_string()))
        } else {
            Err(SessionError::InvalidNewPin)
        }
    }

    /// Exact string comparison against user input.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0 == candidate
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

/// True when the input is exactly [`PIN_LENGTH`] ASCII digits.
pub fn is_pin_shaped(input: &str) -> bool {
    input.len() == PIN_LENGTH && input.bytes().all(|b| b.is_ascii_digit())
}

/// A strictly positive amount of money.
///
/// The value is kept exactly as entered; only its display is rounded to cents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(Decimal);

impl Amount {
    /// Parse user input such as `"1500"` or `" 12.50 "`.
    ///
    /// Input that is not a plain decimal number, or is zero or less, is
    /// [`SessionError::InvalidAmount`]. Sub-cent digits are kept.
    ///
    /// ```rust
    /// use atm_session::account::Amount;
    /// use atm_session::SessionError;
    ///
    /// assert_eq!(Amount::parse("12.345").unwrap().value().to_string(), "12.345");
    /// assert_eq!(Amount::parse("12.345").unwrap().to_string(), "12.35");
    /// assert_eq!(Amount::parse("abc"), Err(SessionError::InvalidAmount));
    /// assert_eq!(Amount::parse("-5"), Err(SessionError::InvalidAmount));
    /// ```
    pub fn parse(input: &str) -> Result<Self, SessionError> {
        let value = Decimal::from_str(input.trim()).map_err(|_| SessionError::InvalidAmount)?;
        Self::new(value).ok_or(SessionError::InvalidAmount)
    }

    /// `None` unless the value is positive.
    pub fn new(value: Decimal) -> Option<Self> {
        (value > Decimal::ZERO).then_some(Amount(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_currency(self.0))
    }
}

/// Render a decimal with exactly two decimal places, e.g. `6500.00`.
pub fn format_currency(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_DP);
    rounded.to_string()
}

/// Balance and PIN of the single simulated account.
#[derive(Clone, Debug)]
pub struct Account {
    balance: Decimal,
    pin: Pin,
}

impl Account {
    /// Open an account. The balance must not be negative; configuration
    /// loading enforces this before an account is built.
    pub fn new(balance: Decimal, pin: Pin) -> Self {
        debug_assert!(balance >= Decimal::ZERO);
        Self { balance, pin }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn pin(&self) -> &Pin {
        &self.pin
    }

    pub fn pin_matches(&self, candidate: &str) -> bool {
        self.pin.matches(candidate)
    }

    /// Whether the balance covers the amount.
    pub fn covers(&self, amount: &Amount) -> bool {
        amount.value() <= self.balance
    }

    /// Take money out, returning the new balance.
    pub fn withdraw(&mut self, amount: Amount) -> Result<Decimal, SessionError> {
        if !self.covers(&amount) {
            return Err(SessionError::InsufficientFunds);
        }
        self.balance -= amount.value();
        Ok(self.balance)
    }

    /// Put money in, returning the new balance.
    pub fn deposit(&mut self, amount: Amount) -> Result<Decimal, SessionError> {
        self.balance = self
            .balance
            .checked_add(amount.value())
            .ok_or(SessionError::InvalidAmount)?;
        Ok(self.balance)
    }

    pub fn set_pin(&mut self, pin: Pin) {
        self.pin = pin;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(balance: Decimal) -> Account {
        Account::new(balance, Pin::parse("1234").unwrap())
    }

    #[test]
    fn pin_requires_four_ascii_digits() {
        assert!(Pin::parse("0000").is_ok());
        assert!(Pin::parse("9876").is_ok());
        assert_eq!(Pin::parse("123"), Err(SessionError::InvalidNewPin));
        assert_eq!(Pin::parse("12345"), Err(SessionError::InvalidNewPin));
        assert_eq!(Pin::parse("12a4"), Err(SessionError::InvalidNewPin));
        assert_eq!(Pin::parse("12.4"), Err(SessionError::InvalidNewPin));
        assert_eq!(Pin::parse(" 123"), Err(SessionError::InvalidNewPin));
        assert_eq!(Pin::parse("١٢٣٤"), Err(SessionError::InvalidNewPin));
    }

    #[test]
    fn pin_debug_is_masked() {
        let pin = Pin::parse("4321").unwrap();
        assert_eq!(format!("{pin:?}"), "Pin(****)");
        assert!(pin.matches("4321"));
        assert!(!pin.matches("4322"));
    }

    #[test]
    fn amount_parses_plain_decimals() {
        assert_eq!(Amount::parse("1500").unwrap().value(), dec!(1500));
        assert_eq!(Amount::parse(" 20.5 ").unwrap().value(), dec!(20.5));
        assert_eq!(Amount::parse("0.015").unwrap().value(), dec!(0.015));
    }

    #[test]
    fn sub_cent_amounts_are_positive() {
        let amount = Amount::parse("0.004").unwrap();
        assert_eq!(amount.value(), dec!(0.004));
        assert_eq!(amount.to_string(), "0.00");
    }

    #[test]
    fn amount_rejects_invalid_input() {
        for input in ["", "   ", "abc", "12abc", "0", "0.00", "-1", "-0.001", "1e3"] {
            assert_eq!(
                Amount::parse(input),
                Err(SessionError::InvalidAmount),
                "input {input:?} should be rejected"
            );
        }
    }

    #[test]
    fn currency_always_has_two_places() {
        assert_eq!(format_currency(dec!(5000)), "5000.00");
        assert_eq!(format_currency(dec!(12.5)), "12.50");
        assert_eq!(format_currency(dec!(0)), "0.00");
        assert_eq!(format_currency(dec!(1.005)), "1.01");
    }

    #[test]
    fn withdraw_reduces_balance() {
        let mut acct = account(dec!(100));
        let balance = acct.withdraw(Amount::parse("40").unwrap()).unwrap();

        assert_eq!(balance, dec!(60));
        assert_eq!(acct.balance(), dec!(60));
    }

    #[test]
    fn withdraw_whole_balance_leaves_zero() {
        let mut acct = account(dec!(100));
        acct.withdraw(Amount::parse("100").unwrap()).unwrap();
        assert_eq!(acct.balance(), Decimal::ZERO);
    }

    #[test]
    fn withdraw_keeps_sub_cent_precision() {
        let mut acct = account(dec!(100));
        acct.withdraw(Amount::parse("12.345").unwrap()).unwrap();
        assert_eq!(acct.balance(), dec!(87.655));

        let result = acct.withdraw(Amount::parse("87.656").unwrap());
        assert_eq!(result, Err(SessionError::InsufficientFunds));
        assert_eq!(acct.balance(), dec!(87.655));
    }

    #[test]
    fn withdraw_more_than_balance_fails() {
        let mut acct = account(dec!(100));
        let result = acct.withdraw(Amount::parse("150").unwrap());

        assert_eq!(result, Err(SessionError::InsufficientFunds));
        assert_eq!(acct.balance(), dec!(100));
    }

    #[test]
    fn deposit_increases_balance() {
        let mut acct = account(dec!(5000));
        acct.deposit(Amount::parse("1500").unwrap()).unwrap();
        assert_eq!(acct.balance(), dec!(6500));
    }

    #[test]
    fn deposit_overflow_is_rejected() {
        let mut acct = account(Decimal::MAX);
        let result = acct.deposit(Amount::parse("1").unwrap());

        assert_eq!(result, Err(SessionError::InvalidAmount));
        assert_eq!(acct.balance(), Decimal::MAX);
    }

    #[test]
    fn set_pin_replaces_pin() {
        let mut acct = account(dec!(1));
        acct.set_pin(Pin::parse("9999").unwrap());

        assert!(acct.pin_matches("9999"));
        assert!(!acct.pin_matches("1234"));
    }
}
