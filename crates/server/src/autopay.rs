//! Autopay endpoints.
//!
//! Both accept an optional body `{"amount": .., "date": "YYYY-MM-DD"}`. A
//! missing or unreadable body runs the flow with its defaults.

use api_types::autopay::{AutopayRequest, PayrollPosted, RentPaid};
use axum::{Json, body::Bytes, extract::State};

use crate::{ServerError, server::ServerState};

fn command(body: &Bytes) -> engine::AutopayCmd {
    let request: AutopayRequest = if body.is_empty() {
        AutopayRequest::default()
    } else {
        serde_json::from_slice(body).unwrap_or_else(|err| {
            tracing::debug!("ignoring unreadable autopay body: {err}");
            AutopayRequest::default()
        })
    };

    engine::AutopayCmd {
        amount: request.amount,
        date: request.date,
    }
}

pub async fn rent(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<RentPaid>, ServerError> {
    let (expense, txn, _alert) = state.store.pay_rent(command(&body))?;
    Ok(Json(RentPaid {
        ok: true,
        expense_id: expense.id,
        txn_id: txn.id,
    }))
}

pub async fn payroll(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<PayrollPosted>, ServerError> {
    let (txn, _alert) = state.store.post_payroll(command(&body))?;
    Ok(Json(PayrollPosted {
        ok: true,
        txn_id: txn.id,
    }))
}
