use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use marketplace_api::api::{build_router, AppState};
use marketplace_api::config::{AppConfig, StoreBackend};
use marketplace_api::domain::repositories::{ListingRepository, UserRepository};
use marketplace_api::infrastructure::repositories::{
    InMemoryListingRepository, InMemoryUserRepository, PostgresListingRepository,
    PostgresUserRepository,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    let (users, listings): (Arc<dyn UserRepository>, Arc<dyn ListingRepository>) =
        match config.store_backend {
            StoreBackend::Postgres => {
                tracing::info!("Connecting to database...");
                let pool = PgPoolOptions::new()
                    .max_connections(config.max_connections)
                    .connect(&config.database_url)
                    .await?;

                sqlx::migrate!("./migrations").run(&pool).await?;
                tracing::info!("Database connected and migrated");

                (
                    Arc::new(PostgresUserRepository::new(pool.clone())),
                    Arc::new(PostgresListingRepository::new(pool)),
                )
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory store; data is lost on restart");
                (
                    Arc::new(InMemoryUserRepository::new()),
                    Arc::new(InMemoryListingRepository::new()),
                )
            }
        };

    let state = AppState::new(
        users,
        listings,
        config.identity_gate.clone(),
        config.jwt_secret.as_str(),
    )
    .with_hash_cost(config.bcrypt_cost);

    let app = build_router(state);

    tracing::info!("Server listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
