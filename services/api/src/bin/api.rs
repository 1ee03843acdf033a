//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{GeminiTextAdapter, YouTubeSearchAdapter},
    config::Config,
    error::ApiError,
    web::{self, rest::ApiDoc, state::AppState},
};
use axum::http::{
    header::{ACCEPT, CONTENT_TYPE},
    HeaderValue, Method,
};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Initialize Service Adapters ---
    let llm_adapter = Arc::new(GeminiTextAdapter::new(
        GeminiTextAdapter::client_for(&config.gemini_api_base, &config.gemini_api_key),
        config.generation_model.clone(),
    ));
    let video_adapter = Arc::new(YouTubeSearchAdapter::new(
        reqwest::Client::new(),
        config.youtube_api_base.clone(),
        config.youtube_api_key.clone(),
    ));
    info!(model = %config.generation_model, "Service adapters initialized.");

    // --- 3. Build the Shared AppState ---
    let app_state = Arc::new(AppState::new(
        llm_adapter,
        video_adapter,
        config.temperature,
    ));

    // Periodically drop sessions nobody has used for a while.
    let sweep_state = app_state.clone();
    let max_idle = chrono::Duration::seconds(config.session_idle_secs);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            let evicted = sweep_state.sessions.evict_idle(max_idle).await;
            if evicted > 0 {
                debug!(evicted, "Evicted idle sessions.");
            }
        }
    });

    // --- 4. Create the Web Router ---
    let origin = config.cors_origin.parse::<HeaderValue>().map_err(|e| {
        ApiError::Internal(format!("Invalid CORS origin '{}': {}", config.cors_origin, e))
    })?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(web::router(app_state).layer(cors))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 5. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
