//! crates/voice_style_core/src/aggregator.rs
//!
//! The profile aggregator merges many samples into one immutable
//! `StyleProfile`. The analysis itself is pure; the id and the creation
//! timestamp are assigned once, at the very end, by `aggregate`.

use crate::config::AnalysisConfig;
use crate::domain::{Segmentation, StyleMetrics, StyleProfile};
use crate::error::{AnalysisResult, ValidationError};
use crate::metrics;
use crate::segmenter;
use crate::signals::{self, Signals};
use crate::summary;
use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

/// The deterministic part of a profile: everything except id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleAnalysis {
    pub sample_count: usize,
    pub metrics: StyleMetrics,
    pub signals: Signals,
    pub formatting_style: String,
    pub raw_style_summary: String,
}

/// Builds a new style profile for `user_name` from raw writing samples.
pub fn aggregate<S: AsRef<str>>(
    user_name: &str,
    samples: &[S],
    config: &AnalysisConfig,
) -> AnalysisResult<StyleProfile> {
    let user_name = validate_user_name(user_name, config)?;
    let analysis = analyze_samples(samples, config)?;

    let profile = StyleProfile {
        id: Uuid::new_v4(),
        user_name: user_name.to_string(),
        created_at: Utc::now(),
        sample_count: analysis.sample_count,
        metrics: analysis.metrics,
        signature_phrases: analysis.signals.signature_phrases,
        vocabulary_preferences: analysis.signals.vocabulary_preferences,
        sentence_starters: analysis.signals.sentence_starters,
        transition_words: analysis.signals.transition_words,
        sample_excerpts: analysis.signals.sample_excerpts,
        formatting_style: analysis.formatting_style,
        raw_style_summary: analysis.raw_style_summary,
    };
    info!(
        profile_id = %profile.id,
        samples = profile.sample_count,
        "Created style profile."
    );
    Ok(profile)
}

/// Validates and analyzes samples without touching the clock or any
/// randomness, so identical samples always produce an identical analysis.
pub fn analyze_samples<S: AsRef<str>>(
    samples: &[S],
    config: &AnalysisConfig,
) -> AnalysisResult<StyleAnalysis> {
    validate_samples(samples, config)?;

    let segmentations: Vec<Segmentation> = samples
        .iter()
        .map(|sample| segmenter::segment(sample.as_ref()))
        .collect();
    debug!(
        samples = segmentations.len(),
        sentences = segmentations.iter().map(|s| s.sentences.len()).sum::<usize>(),
        "Segmented writing samples."
    );

    let metrics = metrics::compute(&segmentations, config)?;
    let signals = signals::extract(&segmentations, config);
    let formatting_style = summary::describe_formatting(&metrics);
    let raw_style_summary = summary::summarize(&metrics, &signals);

    Ok(StyleAnalysis {
        sample_count: samples.len(),
        metrics,
        signals,
        formatting_style,
        raw_style_summary,
    })
}

fn validate_user_name<'a>(
    user_name: &'a str,
    config: &AnalysisConfig,
) -> Result<&'a str, ValidationError> {
    let trimmed = user_name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUserName);
    }
    let length = trimmed.chars().count();
    if length > config.max_user_name_length {
        return Err(ValidationError::UserNameTooLong {
            length,
            max: config.max_user_name_length,
        });
    }
    Ok(trimmed)
}

fn validate_samples<S: AsRef<str>>(
    samples: &[S],
    config: &AnalysisConfig,
) -> Result<(), ValidationError> {
    let found = samples.len();
    if found < config.min_samples {
        return Err(ValidationError::TooFewSamples {
            found,
            min: config.min_samples,
        });
    }
    if found > config.max_samples {
        return Err(ValidationError::TooManySamples {
            found,
            max: config.max_samples,
        });
    }

    for (index, sample) in samples.iter().enumerate() {
        let length = sample.as_ref().trim().chars().count();
        if length < config.min_sample_length {
            return Err(ValidationError::SampleTooShort {
                index,
                length,
                min: config.min_sample_length,
            });
        }
        if length > config.max_sample_length {
            return Err(ValidationError::SampleTooLong {
                index,
                length,
                max: config.max_sample_length,
            });
        }
    }
    Ok(())
}
