use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use entity::{operating_time, rotation};
use machinepark_service::{
    sea_orm::prelude::Date, Mutation as MutationCore, NewOperatingTime, NewRotation,
    Query as QueryCore,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{authorize_machine_read, customer_machines::machine_or_404, ListParams};
use crate::{error::ApiError, extract::CurrentUser, AppState};

#[derive(Debug, Deserialize)]
pub struct RotationPayload {
    pub date: Date,
    pub shaft_a_normal_rotation: i32,
    pub shaft_a_reverse_rotation: i32,
}

#[derive(Debug, Deserialize)]
pub struct OperatingTimePayload {
    pub date: Date,
    pub duration: i32,
}

pub async fn list_rotations(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let machine = machine_or_404(&state, id).await?;
    authorize_machine_read(&current, &machine)?;

    let (rotations, num_pages) = QueryCore::rotations_in_page(
        &state.conn,
        machine.id,
        params.page(),
        params.per_page(),
        params.sort(),
        params.direction(),
    )
    .await?;

    Ok(Json(json!({
        "rotations": rotations,
        "page": params.page(),
        "per_page": params.per_page(),
        "num_pages": num_pages,
    })))
}

/// Record one day of rotation counters. Gateways push these; one row per
/// machine and day.
pub async fn create_rotation(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<RotationPayload>,
) -> Result<(StatusCode, Json<rotation::Model>), ApiError> {
    current.require_iot()?;
    let machine = machine_or_404(&state, id).await?;

    let rotation = MutationCore::create_rotation(
        &state.conn,
        NewRotation {
            customer_machine_id: machine.id,
            date: payload.date,
            shaft_a_normal_rotation: payload.shaft_a_normal_rotation,
            shaft_a_reverse_rotation: payload.shaft_a_reverse_rotation,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(rotation)))
}

pub async fn list_operating_times(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let machine = machine_or_404(&state, id).await?;
    authorize_machine_read(&current, &machine)?;

    let (operating_times, num_pages) = QueryCore::operating_times_in_page(
        &state.conn,
        machine.id,
        params.page(),
        params.per_page(),
        params.sort(),
        params.direction(),
    )
    .await?;

    Ok(Json(json!({
        "operating_times": operating_times,
        "page": params.page(),
        "per_page": params.per_page(),
        "num_pages": num_pages,
    })))
}

/// Record one day of operating time, seconds of runtime for that date.
pub async fn create_operating_time(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<OperatingTimePayload>,
) -> Result<(StatusCode, Json<operating_time::Model>), ApiError> {
    current.require_iot()?;
    let machine = machine_or_404(&state, id).await?;

    let row = MutationCore::create_operating_time(
        &state.conn,
        NewOperatingTime {
            customer_machine_id: machine.id,
            date: payload.date,
            duration: payload.duration,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(row)))
}
