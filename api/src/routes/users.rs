use axum::{
    extract::{Query, State},
    Json,
};
use machinepark_service::{Mutation as MutationCore, Query as QueryCore};
use serde::Deserialize;
use serde_json::{json, Value};

use super::ListParams;
use crate::{error::ApiError, extract::CurrentUser, AppState};

pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    current.require_admin()?;

    let (users, num_pages) = QueryCore::users_in_page(
        &state.conn,
        params.page(),
        params.per_page(),
        params.sort(),
        params.direction(),
    )
    .await?;

    Ok(Json(json!({
        "users": users,
        "page": params.page(),
        "per_page": params.per_page(),
        "num_pages": num_pages,
    })))
}

#[derive(Debug, Deserialize)]
pub struct BulkDeletePayload {
    pub ids: Vec<i32>,
}

/// Delete a batch of users. The requesting administrator is silently
/// dropped from the batch so they cannot delete themselves.
pub async fn bulk_delete(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<BulkDeletePayload>,
) -> Result<Json<Value>, ApiError> {
    current.require_admin()?;

    let deleted =
        MutationCore::bulk_delete_users(&state.conn, payload.ids, &[current.user.id]).await?;

    Ok(Json(json!({ "deleted": deleted })))
}
