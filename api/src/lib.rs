pub mod error;
pub mod extract;
pub mod routes;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use machinepark_service::{auth::AuthenticationManager, sea_orm::DatabaseConnection};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub conn: DatabaseConnection,
    pub auth: AuthenticationManager,
}

/// Assemble the application router on top of a ready state.
///
/// Kept apart from the binary entry point so the integration tests can
/// mount the exact production routing table on an in-memory database.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/login", post(routes::auth::login))
        .route(
            "/reset_password_request",
            post(routes::auth::reset_password_request),
        )
        .route("/reset_password/{token}", post(routes::auth::reset_password))
        .route("/access/revoke", delete(routes::auth::revoke_access_token))
        .route("/refresh/revoke", delete(routes::auth::revoke_refresh_token))
        .route("/refresh_token", post(routes::auth::refresh_token))
        .route(
            "/users",
            get(routes::users::list).delete(routes::users::bulk_delete),
        )
        .route(
            "/machine_models",
            get(routes::machine_models::list).post(routes::machine_models::create),
        )
        .route(
            "/machine_models/{id}",
            put(routes::machine_models::update).delete(routes::machine_models::remove),
        )
        .route(
            "/customer_machines",
            get(routes::customer_machines::list).post(routes::customer_machines::create),
        )
        .route(
            "/customer_machines/{id}",
            get(routes::customer_machines::show)
                .put(routes::customer_machines::update)
                .delete(routes::customer_machines::remove),
        )
        .route(
            "/customer_machines/{id}/rotations",
            get(routes::measurements::list_rotations)
                .post(routes::measurements::create_rotation),
        )
        .route(
            "/customer_machines/{id}/operating_times",
            get(routes::measurements::list_operating_times)
                .post(routes::measurements::create_operating_time),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
