pub mod rest;
pub mod state;

use crate::config::Config;
use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use rest::ApiDoc;
use state::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use rest::{
    delete_profile_handler, directive_handler, extend_profile_handler, get_profile_handler,
    health_handler, list_profiles_handler, onboard_handler, rewrite_handler,
};

/// Ten samples at the maximum sample length, with room for JSON overhead.
const BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

/// Builds the complete application router: REST endpoints, CORS and Swagger UI.
pub fn app_router(app_state: Arc<AppState>) -> Router {
    let cors = cors_layer(&app_state.config);

    let api_router = Router::new()
        .route("/", get(health_handler))
        .route("/api/onboard", post(onboard_handler))
        .route("/api/directive", post(directive_handler))
        .route("/api/rewrite", post(rewrite_handler))
        .route("/api/profiles", get(list_profiles_handler))
        .route(
            "/api/profiles/{profile_id}",
            get(get_profile_handler).delete(delete_profile_handler),
        )
        .route("/api/profiles/{profile_id}/samples", post(extend_profile_handler))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);
    match &config.cors_origin {
        Some(origin) => layer.allow_origin(origin.clone()),
        None => layer.allow_origin(Any),
    }
}
