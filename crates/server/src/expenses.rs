//! Expenses API endpoints.
//!
//! Recording an expense also debits the checking account.

use api_types::expense::{ExpenseCreated, ExpenseListResponse, ExpenseNew, ExpenseView};
use axum::{Json, body::Bytes, extract::State};

use crate::{ServerError, decode, server::ServerState};

fn map_expense(expense: engine::Expense) -> ExpenseView {
    ExpenseView {
        id: expense.id,
        name: expense.name,
        category: expense.category,
        amount: expense.amount.to_f64(),
        date: expense.date.format("%Y-%m-%d").to_string(),
    }
}

pub async fn list(State(state): State<ServerState>) -> Json<ExpenseListResponse> {
    let expenses = state
        .store
        .expenses()
        .into_iter()
        .map(map_expense)
        .collect();
    Json(ExpenseListResponse { expenses })
}

pub async fn create(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<ExpenseCreated>, ServerError> {
    let payload: ExpenseNew = decode(&body)?;
    let (expense, txn) = state.store.record_expense(engine::ExpenseCmd::new(
        payload.name,
        payload.category,
        payload.amount,
        payload.date,
    ))?;

    Ok(Json(ExpenseCreated {
        expense: map_expense(expense),
        created_txn_id: txn.id,
    }))
}
