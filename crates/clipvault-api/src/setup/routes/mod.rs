//! Route configuration and setup

mod health;

use crate::api_doc::ApiDoc;
use crate::auth::middleware::session_middleware;
use crate::constants::{API_PREFIX, MULTIPART_OVERHEAD_BYTES};
use crate::handlers;
use crate::state::AppState;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, Method},
    routing::{get, post},
    Json, Router,
};
use clipvault_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    Ok(build_router(state).layer(cors))
}

/// Router with every route and layer except CORS, which depends on configuration.
pub fn build_router(state: Arc<AppState>) -> Router<()> {
    let body_limit = state.limits.largest() + MULTIPART_OVERHEAD_BYTES;

    let api_routes = Router::new()
        .route("/video-upload", post(handlers::video_upload::upload_video))
        .route("/image-upload", post(handlers::image_upload::upload_image))
        .route("/videos", get(handlers::video_list::list_videos))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        // Per-field limits are enforced while reading the form.
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(axum::middleware::from_fn_with_state(
            state.sessions.clone(),
            session_middleware,
        ));

    Router::new()
        .route(
            "/health",
            get(|State(state): State<Arc<AppState>>| async move {
                health::liveness_check(state).await
            }),
        )
        .route(
            "/health/ready",
            get(|State(state): State<Arc<AppState>>| async move {
                health::readiness_check(state).await
            }),
        )
        .nest(API_PREFIX, api_routes)
        .merge(utoipa_rapidoc::RapiDoc::new("/api/openapi.json").path("/docs"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Setup CORS configuration
fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| anyhow::anyhow!("Invalid CORS origin: {}", e))?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
            .allow_credentials(false)
    };
    Ok(cors)
}
