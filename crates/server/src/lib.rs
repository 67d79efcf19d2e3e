use api_types::ErrorResponse;
use axum::{Json, body::Bytes, http::StatusCode, response::IntoResponse};
use engine::EngineError;
use serde::de::DeserializeOwned;

pub use server::{ServerConfig, ServerState, router, run_with_listener};

mod accounts;
mod alerts;
mod autopay;
mod categories;
mod expenses;
mod server;
mod setup;
mod transactions;

pub mod types {
    pub mod account {
        pub use api_types::account::{AccountView, BalancesResponse};
        pub use api_types::link::{AccessToken, LinkToken};
    }

    pub mod transaction {
        pub use api_types::transaction::{TransactionListResponse, TransactionView};
    }

    pub mod alert {
        pub use api_types::alert::{AlertListResponse, AlertNew, AlertView};
    }

    pub mod expense {
        pub use api_types::expense::{
            ExpenseCreated, ExpenseListResponse, ExpenseNew, ExpenseView,
        };
    }

    pub mod category {
        pub use api_types::category::{CategoryCreated, CategoryListResponse, CategoryNew};
    }

    pub mod autopay {
        pub use api_types::autopay::{AutopayRequest, PayrollPosted, RentPaid};
    }

    pub mod prefs {
        pub use api_types::prefs::{
            CheckingSet, PayrollSet, PrefsResponse, PrefsView, RentSet, SetupAmount,
            SetupChecking,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    /// The request body is not valid JSON for the endpoint.
    BadJson,
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::InvalidName(_)
        | EngineError::InvalidCategory(_)
        | EngineError::InvalidAmount(_)
        | EngineError::InvalidDate(_) => StatusCode::BAD_REQUEST,
        EngineError::BalanceOverflow(_) => {
            tracing::error!("{err}");
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), err.to_string()),
            ServerError::BadJson => (StatusCode::BAD_REQUEST, "bad json".to_string()),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

/// Decode a JSON request body, answering `bad json` on failure.
///
/// Handlers take the raw body instead of the `Json` extractor: existing
/// clients post JSON without a `Content-Type` header, which `Json` rejects
/// with 415.
fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, ServerError> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!("rejected request body: {err}");
        ServerError::BadJson
    })
}
