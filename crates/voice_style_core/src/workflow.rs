//! crates/voice_style_core/src/workflow.rs
//!
//! The `StyleWorkflow` is the only place where the pure engine meets injected
//! collaborators. It holds no mutable state of its own; every call reads or
//! writes through the repository port.

use crate::aggregator;
use crate::config::{AnalysisConfig, DirectiveConfig};
use crate::directive;
use crate::domain::{ProfileListItem, ProfileRecord, RewriteDirective, RewriteOutcome, StyleProfile};
use crate::error::AnalysisError;
use crate::ports::{PortError, ProfileRepository, RewriteGenerator};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    Port(#[from] PortError),
    #[error("No rewrite generator is configured")]
    GeneratorUnavailable,
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Wires the analysis engine to a profile store and an optional generator.
#[derive(Clone)]
pub struct StyleWorkflow {
    repository: Arc<dyn ProfileRepository>,
    generator: Option<Arc<dyn RewriteGenerator>>,
    analysis: AnalysisConfig,
    directive: DirectiveConfig,
}

impl StyleWorkflow {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self {
            repository,
            generator: None,
            analysis: AnalysisConfig::default(),
            directive: DirectiveConfig::default(),
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn RewriteGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_analysis_config(mut self, config: AnalysisConfig) -> Self {
        self.analysis = config;
        self
    }

    pub fn with_directive_config(mut self, config: DirectiveConfig) -> Self {
        self.directive = config;
        self
    }

    /// Analyzes `samples` into a new profile and stores it with its samples.
    #[instrument(skip(self, samples), fields(samples = samples.len()))]
    pub async fn create_profile(
        &self,
        user_name: &str,
        samples: Vec<String>,
    ) -> WorkflowResult<StyleProfile> {
        let profile = aggregator::aggregate(user_name, &samples, &self.analysis)?;
        self.repository
            .save(ProfileRecord {
                profile: profile.clone(),
                samples,
            })
            .await?;
        Ok(profile)
    }

    /// Re-analyzes a stored profile's samples plus `new_samples` into a new
    /// profile. The original profile is left as it was.
    #[instrument(skip(self, new_samples), fields(new_samples = new_samples.len()))]
    pub async fn extend_profile(
        &self,
        profile_id: Uuid,
        new_samples: Vec<String>,
    ) -> WorkflowResult<StyleProfile> {
        let record = self.repository.get(profile_id).await?;
        let mut samples = record.samples;
        samples.extend(new_samples);

        let profile = aggregator::aggregate(&record.profile.user_name, &samples, &self.analysis)?;
        info!(
            source_profile = %profile_id,
            profile_id = %profile.id,
            "Extended style profile with new samples."
        );
        self.repository
            .save(ProfileRecord {
                profile: profile.clone(),
                samples,
            })
            .await?;
        Ok(profile)
    }

    pub async fn get_profile(&self, profile_id: Uuid) -> WorkflowResult<StyleProfile> {
        Ok(self.repository.get(profile_id).await?.profile)
    }

    pub async fn list_profiles(&self) -> WorkflowResult<Vec<ProfileListItem>> {
        Ok(self.repository.list().await?)
    }

    pub async fn delete_profile(&self, profile_id: Uuid) -> WorkflowResult<()> {
        self.repository.delete(profile_id).await?;
        info!(%profile_id, "Deleted style profile.");
        Ok(())
    }

    /// Compiles a directive for `draft_text` against a stored profile.
    pub async fn compile_directive(
        &self,
        profile_id: Uuid,
        draft_text: &str,
    ) -> WorkflowResult<RewriteDirective> {
        let profile = self.get_profile(profile_id).await?;
        Ok(directive::compile(&profile, draft_text, &self.directive)?)
    }

    /// Compiles a directive, hands it to the generator and relays the result.
    #[instrument(skip(self, draft_text))]
    pub async fn rewrite(&self, profile_id: Uuid, draft_text: &str) -> WorkflowResult<RewriteOutcome> {
        let generator = self
            .generator
            .as_ref()
            .ok_or(WorkflowError::GeneratorUnavailable)?;
        let directive = self.compile_directive(profile_id, draft_text).await?;
        let generated = generator.generate(&directive).await?;
        Ok(directive::relay(&directive, generated))
    }
}
