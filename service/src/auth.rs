//! Credentials, token issuance and revocation.
//!
//! Access, refresh and reset tokens are all HS256 JWTs signed with the same
//! secret and distinguished by a `type` claim, so a token presented at the
//! wrong endpoint is rejected no matter how fresh it is. Revocation stores
//! the token id in the `revoked_tokens` table; tokens are otherwise
//! stateless.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use chrono::{Duration, Utc};
use entity::{revoked_token, user};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Query, ServiceError};

/// Signing secret and token lifetimes, in seconds.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub access_token_ttl: i64,
    pub refresh_token_ttl: i64,
    pub reset_token_ttl: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "machinepark-dev-secret".to_owned(),
            access_token_ttl: 15 * 60,
            refresh_token_ttl: 30 * 24 * 60 * 60,
            reset_token_ttl: 60 * 60,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
    Reset,
}

impl TokenKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
            Self::Reset => "reset",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the user the token was issued to.
    pub sub: i32,
    /// Unique token id, the unit of revocation.
    pub jti: String,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

/// What a successful login or refresh hands back to the client.
#[derive(Clone, Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Clone)]
pub struct AuthenticationManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: AuthConfig,
}

impl AuthenticationManager {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation: Validation::default(),
            config,
        }
    }

    /// Verify credentials and hand out a fresh token pair.
    ///
    /// Unknown emails and wrong passwords collapse into the same error so
    /// the response does not reveal which part was wrong. The account state
    /// is only checked once the credentials are good.
    pub async fn login(
        &self,
        db: &DbConn,
        email: &str,
        password: &str,
    ) -> Result<TokenPair, ServiceError> {
        let user = match Query::find_user_by_email(db, email).await? {
            Some(user) => user,
            None => return Err(ServiceError::InvalidCredentials),
        };
        if !verify_password(password, &user.password) {
            tracing::debug!(user_id = user.id, "login rejected: bad password");
            return Err(ServiceError::InvalidCredentials);
        }
        if !user.is_active {
            tracing::debug!(user_id = user.id, "login rejected: account disabled");
            return Err(ServiceError::AccountDisabled);
        }
        tracing::info!(user_id = user.id, "user logged in");
        self.issue_pair(user.id)
    }

    /// Issue an access/refresh pair for an already-authenticated user.
    pub fn issue_pair(&self, user_id: i32) -> Result<TokenPair, ServiceError> {
        let access_token = self.sign(user_id, TokenKind::Access, self.config.access_token_ttl)?;
        let refresh_token =
            self.sign(user_id, TokenKind::Refresh, self.config.refresh_token_ttl)?;
        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_owned(),
            expires_in: self.config.access_token_ttl,
        })
    }

    /// Trade a valid refresh token subject for a brand new pair.
    ///
    /// The user row is re-checked so a deleted or disabled account cannot
    /// keep minting access tokens from an old refresh token.
    pub async fn refresh(&self, db: &DbConn, user_id: i32) -> Result<TokenPair, ServiceError> {
        let user = match Query::find_user_by_id(db, user_id).await? {
            Some(user) => user,
            None => return Err(ServiceError::InvalidCredentials),
        };
        if !user.is_active {
            return Err(ServiceError::AccountDisabled);
        }
        tracing::debug!(user_id = user.id, "token pair refreshed");
        self.issue_pair(user.id)
    }

    /// Decode a token and require it to be of the expected kind.
    pub fn decode(&self, token: &str, expected: TokenKind) -> Result<Claims, ServiceError> {
        let data =
            jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        if data.claims.kind != expected {
            return Err(ServiceError::WrongTokenKind {
                expected: expected.as_str(),
            });
        }
        Ok(data.claims)
    }

    pub fn decode_access(&self, token: &str) -> Result<Claims, ServiceError> {
        self.decode(token, TokenKind::Access)
    }

    pub fn decode_refresh(&self, token: &str) -> Result<Claims, ServiceError> {
        self.decode(token, TokenKind::Refresh)
    }

    /// Put a token id on the blocklist. Revoking twice is a no-op.
    pub async fn revoke(&self, db: &DbConn, jti: &str) -> Result<(), ServiceError> {
        if self.is_revoked(db, jti).await? {
            tracing::debug!(jti, "token already revoked");
            return Ok(());
        }
        revoked_token::ActiveModel {
            jti: Set(jti.to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        tracing::info!(jti, "token revoked");
        Ok(())
    }

    pub async fn is_revoked(&self, db: &DbConn, jti: &str) -> Result<bool, ServiceError> {
        let found = revoked_token::Entity::find()
            .filter(revoked_token::Column::Jti.eq(jti))
            .one(db)
            .await?;
        Ok(found.is_some())
    }

    /// Short-lived token embedded in a password reset link.
    pub fn serialize_reset_token(&self, user: &user::Model) -> Result<String, ServiceError> {
        self.sign(user.id, TokenKind::Reset, self.config.reset_token_ttl)
    }

    /// Validate a reset token and return the user id it was issued to.
    pub fn verify_reset_token(&self, token: &str) -> Result<i32, ServiceError> {
        let claims = self.decode(token, TokenKind::Reset)?;
        Ok(claims.sub)
    }

    fn sign(&self, sub: i32, kind: TokenKind, ttl: i64) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            sub,
            jti: Uuid::new_v4().to_string(),
            kind,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl)).timestamp(),
        };
        Ok(jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &self.encoding_key,
        )?)
    }
}

pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ServiceError::PasswordHash(err.to_string()))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
