pub mod auth;
pub mod customer_machines;
pub mod machine_models;
pub mod measurements;
pub mod users;

use axum::Json;
use entity::{customer_machine, user};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{error::ApiError, extract::CurrentUser};

const DEFAULT_PER_PAGE: u64 = 25;
const MAX_PER_PAGE: u64 = 100;

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Pagination and sorting query string shared by the list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub sort: Option<String>,
    pub direction: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> u64 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    pub fn sort(&self) -> &str {
        self.sort.as_deref().unwrap_or("created_at")
    }

    pub fn direction(&self) -> &str {
        self.direction.as_deref().unwrap_or("asc")
    }
}

/// Admins and gateways see every machine; customers only their own.
pub(crate) fn authorize_machine_read(
    current: &CurrentUser,
    machine: &customer_machine::Model,
) -> Result<(), ApiError> {
    match current.user.role {
        user::Role::Admin | user::Role::Iot => Ok(()),
        user::Role::Client if machine.customer_id == current.user.id => Ok(()),
        user::Role::Client => Err(ApiError::Forbidden(
            "machine belongs to another customer".to_owned(),
        )),
    }
}
