//! crates/voice_style_core/src/ports.rs
//!
//! Defines the service contracts (traits) the engine talks to.
//! These traits form the boundary of the hexagonal architecture: persistence
//! and text generation live behind them, so the engine never depends on a
//! concrete store or language model.

use crate::domain::{GeneratedRewrite, ProfileListItem, ProfileRecord, RewriteDirective};
use async_trait::async_trait;
use uuid::Uuid;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., storage, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Stores profiles together with the samples they were built from.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Inserts a new record. Profiles are immutable; an existing id is an error.
    async fn save(&self, record: ProfileRecord) -> PortResult<()>;

    async fn get(&self, profile_id: Uuid) -> PortResult<ProfileRecord>;

    /// Lists stored profiles, newest first.
    async fn list(&self) -> PortResult<Vec<ProfileListItem>>;

    async fn delete(&self, profile_id: Uuid) -> PortResult<()>;
}

/// Produces rewritten text from a fully specified directive.
#[async_trait]
pub trait RewriteGenerator: Send + Sync {
    async fn generate(&self, directive: &RewriteDirective) -> PortResult<GeneratedRewrite>;
}
