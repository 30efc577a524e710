//! The screens of the ATM and their navigation properties.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownScreen;

/// One mutually-exclusive view of the ATM.
///
/// Exactly one screen is active at a time. Screens are plain values: they
/// carry no state of their own, everything a screen displays lives in the
/// session and is exposed through [`View`](crate::session::View).
///
/// # Example
///
/// ```rust
/// use atm_session::core::Screen;
///
/// assert_eq!(Screen::PinEntry.name(), "pin-entry");
/// assert_eq!("pin-change".parse::<Screen>().unwrap(), Screen::PinChange);
/// assert!(Screen::Balance.requires_auth());
/// assert!(!Screen::Welcome.requires_auth());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Screen {
    #[default]
    Welcome,
    PinEntry,
    Dashboard,
    Balance,
    Withdraw,
    Deposit,
    PinChange,
    Statement,
    Exit,
}

impl Screen {
    /// Every screen, in menu order.
    pub const ALL: [Screen; 9] = [
        Screen::Welcome,
        Screen::PinEntry,
        Screen::Dashboard,
        Screen::Balance,
        Screen::Withdraw,
        Screen::Deposit,
        Screen::PinChange,
        Screen::Statement,
        Screen::Exit,
    ];

    /// Stable kebab-case name, used in logs and by presentation layers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::PinEntry => "pin-entry",
            Self::Dashboard => "dashboard",
            Self::Balance => "balance",
            Self::Withdraw => "withdraw",
            Self::Deposit => "deposit",
            Self::PinChange => "pin-change",
            Self::Statement => "statement",
            Self::Exit => "exit",
        }
    }

    /// Whether the screen may only be reached by an authenticated session.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard
                | Self::Balance
                | Self::Withdraw
                | Self::Deposit
                | Self::PinChange
                | Self::Statement
        )
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Screen {
    type Err = UnknownScreen;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.name() == s)
            .ok_or_else(|| UnknownScreen(s.to_string()))
    }
}
