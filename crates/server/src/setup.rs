//! Setup endpoints: rent and payroll preferences, checking opening balance.

use api_types::prefs::{
    CheckingSet, PayrollSet, PrefsResponse, PrefsView, RentSet, SetupAmount, SetupChecking,
};
use axum::{Json, body::Bytes, extract::State};

use crate::{ServerError, decode, server::ServerState};

pub async fn prefs(State(state): State<ServerState>) -> Json<PrefsResponse> {
    let prefs = state.store.prefs();
    Json(PrefsResponse {
        prefs: PrefsView {
            rent: prefs.rent,
            payroll: prefs.payroll,
            checking: prefs.checking.map(engine::MoneyCents::to_f64),
        },
    })
}

pub async fn rent(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<RentSet>, ServerError> {
    let payload: SetupAmount = decode(&body)?;
    let rent = state.store.set_rent_pref(payload.amount)?;
    Ok(Json(RentSet { ok: true, rent }))
}

pub async fn payroll(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<PayrollSet>, ServerError> {
    let payload: SetupAmount = decode(&body)?;
    let payroll = state.store.set_payroll_pref(payload.amount)?;
    Ok(Json(PayrollSet { ok: true, payroll }))
}

pub async fn checking(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<CheckingSet>, ServerError> {
    let payload: SetupChecking = decode(&body)?;
    let balance = state.store.setup_checking(payload.balance)?;
    Ok(Json(CheckingSet {
        ok: true,
        balance: balance.to_f64(),
    }))
}
