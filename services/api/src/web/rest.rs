//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::error::ApiError;
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;
use voice_style_core::{ProfileListItem, RewriteDirective, RewriteOutcome, StyleProfile};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        health_handler,
        onboard_handler,
        extend_profile_handler,
        directive_handler,
        rewrite_handler,
        list_profiles_handler,
        get_profile_handler,
        delete_profile_handler,
    ),
    components(
        schemas(
            HealthResponse,
            WritingSample,
            OnboardRequest,
            ExtendProfileRequest,
            DraftRequest,
            DeleteResponse,
            ErrorResponse,
            StyleProfile,
            ProfileListItem,
            RewriteDirective,
            RewriteOutcome
        )
    ),
    tags(
        (name = "VoiceStyle API", description = "Style profiling and rewrite directives built from writing samples.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// A single writing sample from the user.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WritingSample {
    pub text: String,
}

/// The payload for creating a new style profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OnboardRequest {
    /// Display name for the profile.
    pub user_name: String,
    /// Between 3 and 10 writing samples.
    pub samples: Vec<WritingSample>,
}

/// Additional samples to fold into an existing profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExtendProfileRequest {
    pub samples: Vec<WritingSample>,
}

/// A draft to be rewritten in the voice of a stored profile.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DraftRequest {
    pub profile_id: Uuid,
    pub draft_text: String,
}

#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    status: String,
    id: Uuid,
}

/// The body returned with every non-2xx response.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    detail: String,
}

fn sample_texts(samples: Vec<WritingSample>) -> Vec<String> {
    samples.into_iter().map(|sample| sample.text).collect()
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Health check.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "VoiceStyle API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Analyze writing samples and create a new style profile.
///
/// The analysis is purely programmatic; no language model is involved.
#[utoipa::path(
    post,
    path = "/api/onboard",
    request_body = OnboardRequest,
    responses(
        (status = 201, description = "Profile created", body = StyleProfile),
        (status = 400, description = "A sample or name constraint was violated", body = ErrorResponse),
        (status = 422, description = "The samples contained nothing measurable", body = ErrorResponse)
    )
)]
pub async fn onboard_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<OnboardRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = app_state
        .workflow
        .create_profile(&request.user_name, sample_texts(request.samples))
        .await?;
    info!(profile_id = %profile.id, "Onboarded new style profile.");
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Create a new profile from a stored profile's samples plus new ones.
///
/// The original profile is left unchanged.
#[utoipa::path(
    post,
    path = "/api/profiles/{profile_id}/samples",
    request_body = ExtendProfileRequest,
    params(("profile_id" = Uuid, Path, description = "The profile to extend.")),
    responses(
        (status = 201, description = "Extended profile created", body = StyleProfile),
        (status = 400, description = "A sample constraint was violated", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    )
)]
pub async fn extend_profile_handler(
    State(app_state): State<Arc<AppState>>,
    Path(profile_id): Path<Uuid>,
    Json(request): Json<ExtendProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = app_state
        .workflow
        .extend_profile(profile_id, sample_texts(request.samples))
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Compile a rewrite directive for a draft against a stored profile.
#[utoipa::path(
    post,
    path = "/api/directive",
    request_body = DraftRequest,
    responses(
        (status = 200, description = "Directive compiled", body = RewriteDirective),
        (status = 400, description = "The draft is too short or too long", body = ErrorResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    )
)]
pub async fn directive_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<DraftRequest>,
) -> Result<Json<RewriteDirective>, ApiError> {
    let directive = app_state
        .workflow
        .compile_directive(request.profile_id, &request.draft_text)
        .await?;
    Ok(Json(directive))
}

/// Rewrite a draft through the configured generator.
#[utoipa::path(
    post,
    path = "/api/rewrite",
    request_body = DraftRequest,
    responses(
        (status = 200, description = "Draft rewritten", body = RewriteOutcome),
        (status = 404, description = "Profile not found", body = ErrorResponse),
        (status = 503, description = "No rewrite generator is configured", body = ErrorResponse)
    )
)]
pub async fn rewrite_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<DraftRequest>,
) -> Result<Json<RewriteOutcome>, ApiError> {
    let outcome = app_state
        .workflow
        .rewrite(request.profile_id, &request.draft_text)
        .await?;
    Ok(Json(outcome))
}

/// List all stored style profiles, newest first.
#[utoipa::path(
    get,
    path = "/api/profiles",
    responses((status = 200, description = "Stored profiles", body = [ProfileListItem]))
)]
pub async fn list_profiles_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProfileListItem>>, ApiError> {
    Ok(Json(app_state.workflow.list_profiles().await?))
}

/// Get a specific style profile with all metrics.
#[utoipa::path(
    get,
    path = "/api/profiles/{profile_id}",
    params(("profile_id" = Uuid, Path, description = "The profile to fetch.")),
    responses(
        (status = 200, description = "The profile", body = StyleProfile),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    )
)]
pub async fn get_profile_handler(
    State(app_state): State<Arc<AppState>>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<StyleProfile>, ApiError> {
    Ok(Json(app_state.workflow.get_profile(profile_id).await?))
}

/// Delete a style profile.
#[utoipa::path(
    delete,
    path = "/api/profiles/{profile_id}",
    params(("profile_id" = Uuid, Path, description = "The profile to delete.")),
    responses(
        (status = 200, description = "Profile deleted", body = DeleteResponse),
        (status = 404, description = "Profile not found", body = ErrorResponse)
    )
)]
pub async fn delete_profile_handler(
    State(app_state): State<Arc<AppState>>,
    Path(profile_id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, ApiError> {
    app_state.workflow.delete_profile(profile_id).await?;
    Ok(Json(DeleteResponse {
        status: "deleted".to_string(),
        id: profile_id,
    }))
}
