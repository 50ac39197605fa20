//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and how it is
//! rendered as an HTTP response.

use crate::config::ConfigError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::error;
use voice_style_core::{AnalysisError, PortError, WorkflowError};

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from the style workflow.
    #[error("{0}")]
    Workflow(#[from] WorkflowError),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Workflow(WorkflowError::Analysis(AnalysisError::Validation(_))) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Workflow(WorkflowError::Analysis(AnalysisError::InsufficientData(_))) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Workflow(WorkflowError::Port(PortError::NotFound(_))) => StatusCode::NOT_FOUND,
            ApiError::Workflow(WorkflowError::GeneratorUnavailable) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status.is_server_error() && status != StatusCode::SERVICE_UNAVAILABLE {
            error!("Request failed: {:?}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
