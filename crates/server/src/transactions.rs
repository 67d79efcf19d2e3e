//! Transactions API endpoints

use api_types::transaction::{TransactionListResponse, TransactionView};
use axum::{Json, extract::State};

use crate::server::ServerState;

pub(crate) fn map_transaction(txn: engine::Transaction) -> TransactionView {
    TransactionView {
        id: txn.id,
        account_id: txn.account_id,
        name: txn.name,
        amount: txn.amount.to_f64(),
        date: txn.date.format("%Y-%m-%d").to_string(),
        category: txn.category,
    }
}

pub async fn list(State(state): State<ServerState>) -> Json<TransactionListResponse> {
    let transactions = state
        .store
        .transactions()
        .into_iter()
        .map(map_transaction)
        .collect();
    Json(TransactionListResponse { transactions })
}
