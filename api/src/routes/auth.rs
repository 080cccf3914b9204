use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use machinepark_service::auth::TokenPair;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{ApiError, FieldErrors},
    extract::{AccessClaims, RefreshClaims},
    AppState,
};

/// Both fields optional so validation can report every missing field at
/// once instead of bailing on the first deserialization error.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<TokenPair>, ApiError> {
    let (email, password) = validate_login(payload)?;
    let tokens = state.auth.login(&state.conn, &email, &password).await?;
    Ok(Json(tokens))
}

fn validate_login(payload: LoginPayload) -> Result<(String, String), ApiError> {
    let mut errors = FieldErrors::new();

    let email = payload.email.unwrap_or_default();
    if email.trim().is_empty() {
        errors
            .entry("email")
            .or_default()
            .push("Missing data for required field.".to_owned());
    } else if !email.contains('@') {
        errors
            .entry("email")
            .or_default()
            .push("Not a valid email address.".to_owned());
    }

    let password = payload.password.unwrap_or_default();
    if password.is_empty() {
        errors
            .entry("password")
            .or_default()
            .push("Missing data for required field.".to_owned());
    }

    if errors.is_empty() {
        Ok((email, password))
    } else {
        Err(ApiError::Validation(errors))
    }
}

// The reset flow still needs a mailer; both endpoints answer 501 until one
// is wired up.

pub async fn reset_password_request() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({ "message": "Password reset is not available yet" })),
    )
}

pub async fn reset_password(Path(_token): Path<String>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(json!({ "message": "Password reset is not available yet" })),
    )
}

pub async fn revoke_access_token(
    State(state): State<AppState>,
    AccessClaims(claims): AccessClaims,
) -> Result<Json<Value>, ApiError> {
    match state.auth.revoke(&state.conn, &claims.jti).await {
        Ok(()) => Ok(Json(json!({ "message": "Access token has been revoked" }))),
        Err(err) => {
            tracing::error!(error = %err, "access token revocation failed");
            Err(ApiError::Internal)
        }
    }
}

pub async fn revoke_refresh_token(
    State(state): State<AppState>,
    RefreshClaims(claims): RefreshClaims,
) -> Result<Json<Value>, ApiError> {
    match state.auth.revoke(&state.conn, &claims.jti).await {
        Ok(()) => Ok(Json(json!({ "message": "Refresh token has been revoked" }))),
        Err(err) => {
            tracing::error!(error = %err, "refresh token revocation failed");
            Err(ApiError::Internal)
        }
    }
}

/// Trade a refresh token for a brand new access/refresh pair.
pub async fn refresh_token(
    State(state): State<AppState>,
    RefreshClaims(claims): RefreshClaims,
) -> Result<Json<TokenPair>, ApiError> {
    let tokens = state.auth.refresh(&state.conn, claims.sub).await?;
    Ok(Json(tokens))
}
