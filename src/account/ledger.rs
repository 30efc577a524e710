//! Transaction records and the newest-first transaction log.

use super::{format_currency, Amount};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use uuid::Uuid;

/// Direction of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Deposit => "Deposit",
            Self::Withdraw => "Withdraw",
        }
    }

    /// Sign shown in front of the amount on a statement.
    pub fn sign(&self) -> char {
        match self {
            Self::Deposit => '+',
            Self::Withdraw => '-',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// A completed deposit or withdrawal. Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: Uuid,
    date: NaiveDate,
    kind: TransactionKind,
    amount: Decimal,
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: Amount, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            kind,
            amount: amount.value(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Amount with two decimal places, e.g. `1500.00`.
    pub fn formatted_amount(&self) -> String {
        format_currency(self.amount)
    }

    /// Amount as shown on a statement, e.g. `+$1500.00` or `-$100.00`.
    pub fn signed_amount(&self) -> String {
        format!("{}${}", self.kind.sign(), self.formatted_amount())
    }
}

/// Ordered transaction history, most recent first.
///
/// The log grows without bound; callers that display it take a prefix with
/// [`TransactionLog::recent`].
///
/// # Example
///
/// ```rust
/// use atm_session::account::{Amount, Transaction, TransactionKind, TransactionLog};
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
/// let mut log = TransactionLog::new();
/// log.record(Transaction::new(TransactionKind::Deposit, Amount::parse("10").unwrap(), date));
/// log.record(Transaction::new(TransactionKind::Withdraw, Amount::parse("4").unwrap(), date));
///
/// let kinds: Vec<_> = log.recent(5).map(|t| t.kind()).collect();
/// assert_eq!(kinds, vec![TransactionKind::Withdraw, TransactionKind::Deposit]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransactionLog {
    entries: VecDeque<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a transaction so it becomes the most recent entry.
    pub fn record(&mut self, transaction: Transaction) {
        self.entries.push_front(transaction);
    }

    /// The first `n` entries, newest first. The log itself is untouched.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &Transaction> + '_ {
        self.entries.iter().take(n)
    }

    pub fn latest(&self) -> Option<&Transaction> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
