use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use entity::machine_model;
use machinepark_service::{
    MachineModelPatch, Mutation as MutationCore, NewMachineModel, Query as QueryCore,
};
use serde_json::{json, Value};

use crate::{error::ApiError, extract::CurrentUser, AppState};

/// The model catalog is readable by any authenticated user.
pub async fn list(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let models = QueryCore::all_machine_models(&state.conn).await?;
    Ok(Json(json!({ "machine_models": models })))
}

pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<NewMachineModel>,
) -> Result<(StatusCode, Json<machine_model::Model>), ApiError> {
    current.require_admin()?;
    let model = MutationCore::create_machine_model(&state.conn, payload).await?;
    Ok((StatusCode::CREATED, Json(model)))
}

pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<MachineModelPatch>,
) -> Result<Json<machine_model::Model>, ApiError> {
    current.require_admin()?;
    let model = MutationCore::update_machine_model(&state.conn, id, payload).await?;
    Ok(Json(model))
}

pub async fn remove(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    current.require_admin()?;
    MutationCore::delete_machine_model(&state.conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
