//! Mock account linking and balances.

use api_types::{
    account::{AccountView, BalancesResponse},
    link::{AccessToken, LinkToken},
};
use axum::{Json, extract::State};

use crate::server::ServerState;

const MOCK_LINK_TOKEN: &str = "mock-link-token";
const MOCK_ACCESS_TOKEN: &str = "mock-access-token";

fn map_account(account: engine::Account) -> AccountView {
    AccountView {
        id: account.id,
        name: account.name,
        kind: account.kind,
        balance: account.balance.to_f64(),
    }
}

pub async fn link_token() -> Json<LinkToken> {
    Json(LinkToken {
        link_token: MOCK_LINK_TOKEN.to_string(),
    })
}

/// Exchanging the public token links the default accounts.
pub async fn exchange(State(state): State<ServerState>) -> Json<AccessToken> {
    state.store.connect();
    Json(AccessToken {
        access_token: MOCK_ACCESS_TOKEN.to_string(),
    })
}

pub async fn balances(State(state): State<ServerState>) -> Json<BalancesResponse> {
    let accounts = state
        .store
        .accounts()
        .into_iter()
        .map(map_account)
        .collect();
    Json(BalancesResponse { accounts })
}
