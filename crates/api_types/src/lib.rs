//! JSON bodies exchanged with the frontend.
//!
//! Field names and optionality are part of the contract with existing
//! clients; change them only together with the frontend.

use serde::{Deserialize, Serialize};

/// Error body returned with every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Generic acknowledgement.
#[derive(Debug, Serialize, Deserialize)]
pub struct Acknowledged {
    pub ok: bool,
}

pub mod health {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub status: String,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryListResponse {
        pub categories: Vec<String>,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct CategoryNew {
        #[serde(default)]
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreated {
        pub ok: bool,
        pub name: String,
    }
}

pub mod link {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LinkToken {
        pub link_token: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccessToken {
        pub access_token: String,
    }
}

pub mod account {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct AccountView {
        pub id: String,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: String,
        pub balance: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalancesResponse {
        pub accounts: Vec<AccountView>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: String,
        pub account_id: String,
        pub name: String,
        /// Negative = debit, positive = credit.
        pub amount: f64,
        /// `YYYY-MM-DD`.
        pub date: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub transactions: Vec<TransactionView>,
    }
}

pub mod alert {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct AlertView {
        pub id: String,
        /// Empty when the alert was not triggered by a transaction.
        pub txn_id: String,
        pub kind: String,
        pub message: String,
        pub severity: String,
        pub amount: f64,
        pub balance: f64,
        /// RFC 3339, whole seconds.
        pub created_at: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AlertListResponse {
        pub alerts: Vec<AlertView>,
    }

    /// Body of `POST /api/alerts`. Every field may be omitted.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AlertNew {
        pub id: String,
        pub txn_id: String,
        pub kind: String,
        pub message: String,
        pub severity: String,
        pub amount: f64,
        pub balance: f64,
        pub created_at: String,
    }
}

pub mod expense {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub id: String,
        pub name: String,
        pub category: String,
        /// Always positive.
        pub amount: f64,
        /// `YYYY-MM-DD`.
        pub date: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
    }

    /// Body of `POST /api/expenses`.
    ///
    /// Missing fields decode to empty values and are then rejected by
    /// validation, not by the decoder.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ExpenseNew {
        pub name: String,
        pub category: String,
        pub amount: f64,
        pub date: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub expense: ExpenseView,
        pub created_txn_id: String,
    }
}

pub mod autopay {
    use super::*;

    /// Optional body of the autopay endpoints.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct AutopayRequest {
        pub amount: Option<f64>,
        pub date: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RentPaid {
        pub ok: bool,
        pub expense_id: String,
        pub txn_id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayrollPosted {
        pub ok: bool,
        pub txn_id: String,
    }
}

pub mod prefs {
    use super::*;

    /// Preferences recorded by the setup endpoints. Unset ones are omitted.
    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    pub struct PrefsView {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub rent: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub payroll: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub checking: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PrefsResponse {
        pub prefs: PrefsView,
    }

    /// Body of `POST /api/setup/rent` and `POST /api/setup/payroll`.
    /// A missing or non-positive amount clears the preference.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct SetupAmount {
        pub amount: f64,
    }

    /// Body of `POST /api/setup/checking`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct SetupChecking {
        pub balance: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RentSet {
        pub ok: bool,
        pub rent: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PayrollSet {
        pub ok: bool,
        pub payroll: Option<f64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CheckingSet {
        pub ok: bool,
        pub balance: f64,
    }
}
