//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use std::sync::Arc;
use voice_style_core::{ProfileRepository, StyleWorkflow};

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub workflow: StyleWorkflow,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wires the style workflow to `repository` using the configured tolerances.
    pub fn new(config: Arc<Config>, repository: Arc<dyn ProfileRepository>) -> Self {
        let workflow =
            StyleWorkflow::new(repository).with_directive_config(config.directive.clone());
        Self { workflow, config }
    }
}
