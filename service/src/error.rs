use sea_orm::DbErr;
use thiserror::Error;

/// Failures surfaced by the query, mutation and authentication services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("account is disabled")]
    AccountDisabled,

    #[error("token has been revoked")]
    TokenRevoked,

    #[error("expected {expected} token")]
    WrongTokenKind { expected: &'static str },

    #[error("a {kind} record for machine {customer_machine_id} on {date} already exists")]
    DuplicateMeasurement {
        kind: &'static str,
        customer_machine_id: i32,
        date: chrono::NaiveDate,
    },

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Db(#[from] DbErr),

    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
}
