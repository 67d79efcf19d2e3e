//! User spending records. Each one is mirrored by a debit [`Transaction`].
//!
//! [`Transaction`]: crate::Transaction

use chrono::NaiveDate;

use crate::{MoneyCents, tables::Keyed};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expense {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Always positive.
    pub amount: MoneyCents,
    pub date: NaiveDate,
}

impl Keyed for Expense {
    fn id(&self) -> &str {
        &self.id
    }
}
