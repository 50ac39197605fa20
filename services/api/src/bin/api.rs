//! services/api/src/bin/api.rs

use api_lib::{
    adapters::InMemoryProfileRepository,
    config::Config,
    error::ApiError,
    web::{app_router, state::AppState},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize the Profile Store ---
    let repository = Arc::new(InMemoryProfileRepository::new());
    info!("Using in-memory profile repository; profiles last for the lifetime of the process.");

    // --- 3. Build the Shared AppState & Router ---
    let app_state = Arc::new(AppState::new(config.clone(), repository));
    let app = app_router(app_state);

    // --- 4. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
