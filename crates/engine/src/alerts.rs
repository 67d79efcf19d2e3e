//! Notification records.

use chrono::{DateTime, Utc};

use crate::{MoneyCents, tables::Keyed};

pub const RENT_PAID: &str = "rent_paid";
pub const PAYROLL_POSTED: &str = "payroll_posted";

/// A notification shown to the user.
///
/// `amount` and `balance` are captured when the alert is created and are
/// never updated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub id: String,
    /// Transaction that triggered the alert, if any.
    pub txn_id: Option<String>,
    pub kind: String,
    pub message: String,
    pub severity: String,
    pub amount: MoneyCents,
    pub balance: MoneyCents,
    pub created_at: DateTime<Utc>,
}

impl Keyed for Alert {
    fn id(&self) -> &str {
        &self.id
    }
}
