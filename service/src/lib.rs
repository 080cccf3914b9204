//! Business logic for the machine park backend.
//!
//! Split the way the HTTP layer consumes it: [`Query`] for reads,
//! [`Mutation`] for writes, and [`auth`] for credentials, token issuance
//! and revocation. Everything talks to the database through SeaORM and
//! reports failures as [`ServiceError`].

pub mod auth;
mod error;
mod mutation;
mod query;

pub use error::ServiceError;
pub use mutation::*;
pub use query::*;

pub use sea_orm;
