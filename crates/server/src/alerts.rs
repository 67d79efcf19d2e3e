//! Alerts API endpoints.

use api_types::alert::{AlertListResponse, AlertNew, AlertView};
use axum::{Json, body::Bytes, extract::State};
use chrono::{DateTime, SecondsFormat, Utc};

use crate::{ServerError, decode, server::ServerState};

pub(crate) fn map_alert(alert: engine::Alert) -> AlertView {
    AlertView {
        id: alert.id,
        txn_id: alert.txn_id.unwrap_or_default(),
        kind: alert.kind,
        message: alert.message,
        severity: alert.severity,
        amount: alert.amount.to_f64(),
        balance: alert.balance.to_f64(),
        created_at: alert.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}

pub async fn list(State(state): State<ServerState>) -> Json<AlertListResponse> {
    let alerts = state.store.alerts().into_iter().map(map_alert).collect();
    Json(AlertListResponse { alerts })
}

pub async fn create(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<AlertView>, ServerError> {
    let payload: AlertNew = decode(&body)?;

    let created_at = if payload.created_at.is_empty() {
        None
    } else {
        let parsed = DateTime::parse_from_rfc3339(&payload.created_at).map_err(|_| {
            ServerError::Generic(format!("invalid created_at: {}", payload.created_at))
        })?;
        Some(parsed.with_timezone(&Utc))
    };

    let alert = state.store.create_alert(engine::AlertCmd {
        id: Some(payload.id),
        txn_id: Some(payload.txn_id),
        kind: payload.kind,
        message: payload.message,
        severity: payload.severity,
        amount: payload.amount,
        balance: payload.balance,
        created_at,
    })?;

    Ok(Json(map_alert(alert)))
}
