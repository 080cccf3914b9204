use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use machinepark_service::{sea_orm::DbErr, ServiceError};
use serde_json::json;

/// Field name to the validation messages raised for it.
pub type FieldErrors = BTreeMap<&'static str, Vec<String>>;

#[derive(Debug)]
pub enum ApiError {
    /// 422 with the offending fields spelled out under `errors`.
    Validation(FieldErrors),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    /// 500 with a deliberately generic body; details go to the log only.
    Internal,
}

impl ApiError {
    pub fn field(name: &'static str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(name, vec![message.into()]);
        Self::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "errors": errors }),
            ),
            Self::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, json!({ "message": message }))
            }
            Self::Forbidden(message) => (StatusCode::FORBIDDEN, json!({ "message": message })),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, json!({ "message": message })),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "message": "Something went wrong" }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(_) => Self::NotFound(err.to_string()),
            ServiceError::InvalidCredentials
            | ServiceError::AccountDisabled
            | ServiceError::TokenRevoked
            | ServiceError::WrongTokenKind { .. } => Self::Unauthorized(err.to_string()),
            ServiceError::Jwt(_) => Self::Unauthorized("invalid or expired token".to_owned()),
            ServiceError::DuplicateMeasurement { .. } => Self::field("date", err.to_string()),
            ServiceError::PasswordHash(_) | ServiceError::Db(_) => {
                tracing::error!(error = %err, "service failure");
                Self::Internal
            }
        }
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        tracing::error!(error = %err, "database failure");
        Self::Internal
    }
}
