//! Command structs for store operations.
//!
//! These types group parameters for write operations (expenses, autopay,
//! direct alerts), keeping call sites readable and avoiding long argument
//! lists. Amounts are raw decimals as received from clients; the store
//! validates and rounds them.

use chrono::{DateTime, Utc};

/// Record a user expense.
#[derive(Clone, Debug, Default)]
pub struct ExpenseCmd {
    pub name: String,
    pub category: String,
    pub amount: f64,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
}

impl ExpenseCmd {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        amount: f64,
        date: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            amount,
            date: date.into(),
        }
    }
}

/// Run an autopay flow (rent or payroll).
///
/// Unset, non-positive amounts and unset or empty dates fall back to the
/// flow defaults.
#[derive(Clone, Debug, Default)]
pub struct AutopayCmd {
    pub amount: Option<f64>,
    pub date: Option<String>,
}

impl AutopayCmd {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    #[must_use]
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Create an alert directly, bypassing the autopay flows.
#[derive(Clone, Debug, Default)]
pub struct AlertCmd {
    /// Client supplied id; generated when `None` or empty.
    pub id: Option<String>,
    pub txn_id: Option<String>,
    pub kind: String,
    pub message: String,
    pub severity: String,
    pub amount: f64,
    pub balance: f64,
    /// Generated when `None`.
    pub created_at: Option<DateTime<Utc>>,
}

impl AlertCmd {
    #[must_use]
    pub fn new(
        kind: impl Into<String>,
        message: impl Into<String>,
        severity: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            severity: severity.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    #[must_use]
    pub fn balance(mut self, balance: f64) -> Self {
        self.balance = balance;
        self
    }
}
