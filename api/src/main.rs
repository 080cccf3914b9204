use std::env;

use machinepark_api::{app, AppState};
use machinepark_service::{
    auth::{AuthConfig, AuthenticationManager},
    sea_orm::Database,
};
use migration::{Migrator, MigratorTrait};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "machinepark_api=debug,machinepark_service=debug,tower_http=info".into()
            }),
        )
        .init();

    dotenvy::dotenv().ok();
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());
    let port = env::var("PORT").unwrap_or_else(|_| "8000".to_owned());
    let server_url = format!("{host}:{port}");

    let conn = Database::connect(db_url)
        .await
        .expect("Database connection failed");
    Migrator::up(&conn, None).await?;

    let state = AppState {
        auth: AuthenticationManager::new(auth_config_from_env()),
        conn,
    };

    let listener = tokio::net::TcpListener::bind(&server_url).await?;
    info!("listening on {server_url}");
    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn auth_config_from_env() -> AuthConfig {
    let mut config = AuthConfig::default();
    if let Ok(secret) = env::var("JWT_SECRET") {
        config.jwt_secret = secret;
    }
    if let Some(ttl) = env_seconds("ACCESS_TOKEN_TTL_SECS") {
        config.access_token_ttl = ttl;
    }
    if let Some(ttl) = env_seconds("REFRESH_TOKEN_TTL_SECS") {
        config.refresh_token_ttl = ttl;
    }
    if let Some(ttl) = env_seconds("RESET_TOKEN_TTL_SECS") {
        config.reset_token_ttl = ttl;
    }
    config
}

fn env_seconds(key: &str) -> Option<i64> {
    env::var(key).ok().and_then(|value| value.parse().ok())
}
