//! The module contains `Account` and the default accounts of the mock bank.

use crate::{MoneyCents, tables::Keyed};

pub const CHECKING_ID: &str = "acc_chk";
pub const SAVINGS_ID: &str = "acc_sav";

const DEPOSITORY: &str = "depository";

/// A linked bank account.
///
/// The balance only changes through transactions applied by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Account {
    pub id: String,
    pub name: String,
    /// Free-text type tag, e.g. `depository`.
    pub kind: String,
    pub balance: MoneyCents,
}

impl Account {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: impl Into<String>,
        balance: MoneyCents,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            balance,
        }
    }

    /// The default checking account, opened with 2500.
    pub fn checking() -> Self {
        Self::checking_with(MoneyCents::from_units(2500))
    }

    /// The checking account opened with `balance`.
    pub fn checking_with(balance: MoneyCents) -> Self {
        Self::new(CHECKING_ID, "Checking", DEPOSITORY, balance)
    }

    /// The default savings account, opened with 5000.
    pub fn savings() -> Self {
        Self::new(SAVINGS_ID, "Savings", DEPOSITORY, MoneyCents::from_units(5000))
    }
}

impl Keyed for Account {
    fn id(&self) -> &str {
        &self.id
    }
}
