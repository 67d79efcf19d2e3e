//! Transaction primitives.
//!
//! A `Transaction` moves money in or out of one account. Transactions are
//! immutable once stored.

use chrono::NaiveDate;

use crate::{MoneyCents, tables::Keyed};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    pub name: String,
    /// Negative = debit, positive = credit.
    pub amount: MoneyCents,
    pub date: NaiveDate,
    pub category: Option<String>,
}

impl Keyed for Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}
