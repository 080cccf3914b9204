//! Request extractors that gate handlers behind bearer tokens.
//!
//! Every extractor decodes the token, insists on the right token kind for
//! the route, and consults the revocation blocklist before the handler body
//! runs.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use entity::user;
use machinepark_service::{
    auth::{Claims, TokenKind},
    Query, ServiceError,
};

use crate::{error::ApiError, AppState};

/// Claims of a live access token.
pub struct AccessClaims(pub Claims);

/// Claims of a live refresh token.
pub struct RefreshClaims(pub Claims);

/// The user row behind a live access token, re-read from the database so
/// role and account state are current rather than whatever the token said
/// when it was minted.
pub struct CurrentUser {
    pub user: user::Model,
    pub claims: Claims,
}

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_owned()))
}

async fn verified_claims(
    parts: &Parts,
    state: &AppState,
    kind: TokenKind,
) -> Result<Claims, ApiError> {
    let token = bearer_token(parts)?;
    let claims = state.auth.decode(token, kind)?;
    if state.auth.is_revoked(&state.conn, &claims.jti).await? {
        return Err(ServiceError::TokenRevoked.into());
    }
    Ok(claims)
}

impl FromRequestParts<AppState> for AccessClaims {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        verified_claims(parts, state, TokenKind::Access)
            .await
            .map(Self)
    }
}

impl FromRequestParts<AppState> for RefreshClaims {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        verified_claims(parts, state, TokenKind::Refresh)
            .await
            .map(Self)
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = verified_claims(parts, state, TokenKind::Access).await?;
        let user = Query::find_user_by_id(&state.conn, claims.sub)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("token subject no longer exists".to_owned()))?;
        if !user.is_active {
            return Err(ApiError::Unauthorized("account is disabled".to_owned()));
        }
        Ok(Self { user, claims })
    }
}

impl CurrentUser {
    /// Only administrators may pass.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.user.role == user::Role::Admin {
            Ok(())
        } else {
            Err(ApiError::Forbidden(
                "administrator role required".to_owned(),
            ))
        }
    }

    /// Only measurement writers (gateways and administrators) may pass.
    pub fn require_iot(&self) -> Result<(), ApiError> {
        match self.user.role {
            user::Role::Admin | user::Role::Iot => Ok(()),
            user::Role::Client => Err(ApiError::Forbidden("iot role required".to_owned())),
        }
    }
}
