//! Transient user input: the PIN keypad buffer and the form fields.

use crate::account::PIN_LENGTH;
use serde::{Deserialize, Serialize};

/// Digits typed on the keypad, at most four.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PinBuffer {
    digits: String,
}

impl PinBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a digit. Returns `false` when the buffer is full or the
    /// character is not an ASCII digit.
    pub fn push(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() || self.is_full() {
            return false;
        }
        self.digits.push(digit);
        true
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn is_full(&self) -> bool {
        self.digits.len() >= PIN_LENGTH
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    /// One asterisk per entered digit.
    pub fn masked(&self) -> String {
        "*".repeat(self.digits.len())
    }
}

/// The text fields of the transactional screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    WithdrawAmount,
    DepositAmount,
    OldPin,
    NewPin,
    ConfirmPin,
}

/// Contents of every form field. Cleared on each navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub withdraw_amount: String,
    pub deposit_amount: String,
    pub old_pin: String,
    pub new_pin: String,
    pub confirm_pin: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::WithdrawAmount => &self.withdraw_amount,
            FormField::DepositAmount => &self.deposit_amount,
            FormField::OldPin => &self.old_pin,
            FormField::NewPin => &self.new_pin,
            FormField::ConfirmPin => &self.confirm_pin,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::WithdrawAmount => &mut self.withdraw_amount,
            FormField::DepositAmount => &mut self.deposit_amount,
            FormField::OldPin => &mut self.old_pin,
            FormField::NewPin => &mut self.new_pin,
            FormField::ConfirmPin => &mut self.confirm_pin,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
