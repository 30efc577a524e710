//! Error types for session operations and configuration.

use thiserror::Error;

/// Errors reported by session operations.
///
/// The `Display` text of each variant is the message shown to the user, so a
/// presentation layer can render an error without further mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Amount is not a number, or is zero or negative
    #[error("Please enter a valid amount.")]
    InvalidAmount,

    /// Withdrawal exceeds the current balance
    #[error("Insufficient Funds!")]
    InsufficientFunds,

    /// Entered PIN does not match the stored PIN
    #[error("Incorrect PIN. Try again.")]
    IncorrectPin,

    #[error("Old PIN is incorrect.")]
    WrongOldPin,

    /// New PIN is not exactly four digits
    #[error("New PIN must be 4 digits")]
    InvalidNewPin,

    #[error("New PINs do not match.")]
    PinMismatch,

    /// A navigation guard refused the requested screen
    #[error("Guard '{guard}' blocked navigation to '{to}'")]
    NavigationBlocked { to: String, guard: String },
}

/// Errors raised while loading configuration or building a session.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configured PIN must be exactly 4 digits")]
    InvalidPin,

    #[error("Opening balance must not be negative (got {0})")]
    NegativeBalance(rust_decimal::Decimal),

    #[error("Statement length must be at least 1")]
    ZeroStatementLength,

    #[error("'{field}' must be a non-zero duration")]
    ZeroDuration { field: &'static str },

    #[error("Invalid {field} format string '{format}'")]
    InvalidFormat { field: &'static str, format: String },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// A screen name that matches no known screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown screen '{0}'")]
pub struct UnknownScreen(pub String);
