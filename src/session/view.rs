//! What the presentation layer renders.
//!
//! The session never touches a display. After every change it builds a
//! [`View`] snapshot and hands it to its observers, which are free to draw it
//! however they like (terminal, HTML, JSON over a socket).

use crate::account::{Transaction, TransactionKind};
use crate::core::Screen;
use crate::session::input::FormFields;
use serde::{Deserialize, Serialize};

/// The screens that show a status message, one slot each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageSlot {
    Login,
    Withdraw,
    Deposit,
    PinChange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Success,
    Error,
}

/// A transient line of feedback, styled by kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub kind: MessageKind,
}

impl StatusMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Success,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: MessageKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

/// Current message of every slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Messages {
    pub login: Option<StatusMessage>,
    pub withdraw: Option<StatusMessage>,
    pub deposit: Option<StatusMessage>,
    pub pin_change: Option<StatusMessage>,
}

impl Messages {
    pub fn get(&self, slot: MessageSlot) -> Option<&StatusMessage> {
        match slot {
            MessageSlot::Login => self.login.as_ref(),
            MessageSlot::Withdraw => self.withdraw.as_ref(),
            MessageSlot::Deposit => self.deposit.as_ref(),
            MessageSlot::PinChange => self.pin_change.as_ref(),
        }
    }

    pub fn set(&mut self, slot: MessageSlot, message: StatusMessage) {
        let entry = match slot {
            MessageSlot::Login => &mut self.login,
            MessageSlot::Withdraw => &mut self.withdraw,
            MessageSlot::Deposit => &mut self.deposit,
            MessageSlot::PinChange => &mut self.pin_change,
        };
        *entry = Some(message);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// One line of the mini statement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRow {
    pub date: String,
    pub kind: TransactionKind,
    /// Signed amount, e.g. `+$1500.00`
    pub amount: String,
}

impl StatementRow {
    pub fn from_transaction(transaction: &Transaction, date_format: &str) -> Self {
        Self {
            date: transaction.date().format(date_format).to_string(),
            kind: transaction.kind(),
            amount: transaction.signed_amount(),
        }
    }
}

/// Everything needed to draw the ATM at one instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub screen: Screen,
    /// PIN keypad buffer, one `*` per digit
    pub pin_mask: String,
    /// Balance captured when the balance screen was entered
    pub balance: Option<String>,
    /// Rows rendered when the statement screen was entered
    pub statement: Vec<StatementRow>,
    pub messages: Messages,
    /// Formatted current time
    pub time: String,
    pub forms: FormFields,
}

impl View {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Receives a fresh [`View`] after every change to the session.
pub trait ViewObserver: Send {
    fn on_view(&mut self, view: &View);
}

impl<F> ViewObserver for F
where
    F: FnMut(&View) + Send,
{
    fn on_view(&mut self, view: &View) {
        self(view)
    }
}
