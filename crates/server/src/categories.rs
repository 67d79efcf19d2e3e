//! Categories API endpoints.

use api_types::category::{CategoryCreated, CategoryListResponse, CategoryNew};
use axum::{Json, body::Bytes, extract::State};
use engine::EngineError;

use crate::{ServerError, decode, server::ServerState};

pub async fn list(State(state): State<ServerState>) -> Json<CategoryListResponse> {
    Json(CategoryListResponse {
        categories: state.store.list_categories(),
    })
}

pub async fn create(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<CategoryCreated>, ServerError> {
    let payload: CategoryNew = decode(&body)?;
    let name = state
        .store
        .add_category(&payload.name)
        .map_err(|err| match err {
            EngineError::InvalidCategory(_) => ServerError::Generic("empty name".to_string()),
            err => err.into(),
        })?;
    Ok(Json(CategoryCreated { ok: true, name }))
}
