use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use entity::{customer_machine, user};
use machinepark_service::{
    CustomerMachinePatch, Mutation as MutationCore, NewCustomerMachine, Query as QueryCore,
};
use serde_json::{json, Value};

use super::authorize_machine_read;
use crate::{error::ApiError, extract::CurrentUser, AppState};

/// Administrators and gateways see the whole park, customers only their
/// own machines.
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Value>, ApiError> {
    let machines = match current.user.role {
        user::Role::Admin | user::Role::Iot => {
            QueryCore::all_customer_machines(&state.conn).await?
        }
        user::Role::Client => {
            QueryCore::machines_of_customer(&state.conn, current.user.id).await?
        }
    };
    Ok(Json(json!({ "customer_machines": machines })))
}

pub async fn show(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<Json<customer_machine::Model>, ApiError> {
    let machine = machine_or_404(&state, id).await?;
    authorize_machine_read(&current, &machine)?;
    Ok(Json(machine))
}

pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    Json(payload): Json<NewCustomerMachine>,
) -> Result<(StatusCode, Json<customer_machine::Model>), ApiError> {
    current.require_admin()?;

    if QueryCore::find_user_by_id(&state.conn, payload.customer_id)
        .await?
        .is_none()
    {
        return Err(ApiError::field("customer_id", "Unknown customer."));
    }
    if QueryCore::find_machine_model_by_id(&state.conn, payload.model_id)
        .await?
        .is_none()
    {
        return Err(ApiError::field("model_id", "Unknown machine model."));
    }

    let machine = MutationCore::create_customer_machine(&state.conn, payload).await?;
    Ok((StatusCode::CREATED, Json(machine)))
}

pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
    Json(payload): Json<CustomerMachinePatch>,
) -> Result<Json<customer_machine::Model>, ApiError> {
    current.require_admin()?;

    if let Some(customer_id) = payload.customer_id {
        if QueryCore::find_user_by_id(&state.conn, customer_id)
            .await?
            .is_none()
        {
            return Err(ApiError::field("customer_id", "Unknown customer."));
        }
    }
    if let Some(model_id) = payload.model_id {
        if QueryCore::find_machine_model_by_id(&state.conn, model_id)
            .await?
            .is_none()
        {
            return Err(ApiError::field("model_id", "Unknown machine model."));
        }
    }

    let machine = MutationCore::update_customer_machine(&state.conn, id, payload).await?;
    Ok(Json(machine))
}

pub async fn remove(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    current.require_admin()?;
    MutationCore::delete_customer_machine(&state.conn, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) async fn machine_or_404(
    state: &AppState,
    id: i32,
) -> Result<customer_machine::Model, ApiError> {
    QueryCore::find_customer_machine_by_id(&state.conn, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("customer machine not found".to_owned()))
}
