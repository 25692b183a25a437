//! services/api/src/lib.rs
//!
//! The lecture tracker HTTP service: storage and LLM adapters, configuration,
//! and the Axum router exposing the lecture API.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiError;
use crate::web::{
    get_lecture_handler, health_handler, list_lectures_handler, rest::ApiDoc, state::AppState,
    summarize_lecture_handler, update_lecture_handler,
};

/// Builds the complete application router: lecture routes, health check and Swagger UI.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    let api_router = Router::new()
        .route("/health", get(health_handler))
        .route("/lectures", get(list_lectures_handler))
        .route(
            "/lectures/{id}",
            get(get_lecture_handler).patch(update_lecture_handler),
        )
        .route("/lectures/{id}/summarize", post(summarize_lecture_handler))
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

/// Any origin may call the API unless `origin` restricts it to one.
pub fn cors_layer(origin: Option<&str>) -> Result<CorsLayer, ApiError> {
    let Some(origin) = origin else {
        return Ok(CorsLayer::permissive());
    };
    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|e| ApiError::Internal(format!("Invalid CORS_ORIGIN '{}': {}", origin, e)))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]))
}
