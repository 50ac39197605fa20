pub mod aggregator;
pub mod config;
pub mod directive;
pub mod domain;
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod ports;
pub mod segmenter;
pub mod signals;
pub mod summary;
pub mod workflow;

pub use aggregator::{aggregate, analyze_samples, StyleAnalysis};
pub use config::{AnalysisConfig, DirectiveConfig};
pub use directive::relay;
pub use domain::{
    BulletPolicy, FormattingRule, FormattingRules, GeneratedRewrite, LengthVariation,
    MetricTargets, ProfileListItem, ProfileRecord, RewriteDirective, RewriteOutcome, Segmentation,
    SentenceToken, StyleMetrics, StyleProfile, SurfaceCounts, TargetRange, Terminal,
    VariationLevel,
};
pub use error::{AnalysisError, AnalysisResult, ValidationError};
pub use ports::{PortError, PortResult, ProfileRepository, RewriteGenerator};
pub use segmenter::segment;
pub use signals::Signals;
pub use workflow::{StyleWorkflow, WorkflowError, WorkflowResult};

/// Builds a style profile from writing samples with the default thresholds.
pub fn create_profile<S: AsRef<str>>(user_name: &str, samples: &[S]) -> AnalysisResult<StyleProfile> {
    aggregator::aggregate(user_name, samples, &AnalysisConfig::default())
}

/// Compiles a rewrite directive for `draft_text` with the default tolerances.
pub fn compile_directive(profile: &StyleProfile, draft_text: &str) -> AnalysisResult<RewriteDirective> {
    directive::compile(profile, draft_text, &DirectiveConfig::default())
}
