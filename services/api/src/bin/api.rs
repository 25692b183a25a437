//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{JsonFileStore, OpenAiSummaryAdapter, UnconfiguredSummaryProvider},
    build_router,
    config::Config,
    cors_layer,
    error::ApiError,
    web::state::AppState,
};
use lecture_tracker_core::ports::{LectureStore, SummaryProvider};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Lecture Store ---
    let store = Arc::new(JsonFileStore::new(config.lectures_path.clone()));
    match store.list_lectures().await {
        Ok(lectures) => info!(
            "Using lecture store at {} ({} lectures)",
            config.lectures_path.display(),
            lectures.len()
        ),
        Err(e) => warn!("Lecture store is not readable yet: {}", e),
    }

    // --- 3. Initialize the Summary Provider ---
    let summary_provider: Arc<dyn SummaryProvider> = match &config.summary_provider {
        Some(provider_config) => {
            info!(
                "Summaries via {} using model {}",
                provider_config.api_base, provider_config.model
            );
            Arc::new(OpenAiSummaryAdapter::from_config(
                provider_config,
                config.summary_timeout,
            ))
        }
        None => {
            warn!("No GEMINI_API_KEY or OPENAI_API_KEY set; summary requests will fail");
            Arc::new(UnconfiguredSummaryProvider)
        }
    };

    // --- 4. Build the Shared AppState & Router ---
    let app_state = Arc::new(AppState::new(store, summary_provider));
    let app = build_router(app_state).layer(cors_layer(config.cors_origin.as_deref())?);

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
