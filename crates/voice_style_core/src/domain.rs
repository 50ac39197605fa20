//! crates/voice_style_core/src/domain.rs
//!
//! Defines the core data structures of the style engine. These structs carry
//! no storage or transport logic; `serde` derives let collaborators persist or
//! send them in whatever format they choose.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Range;
use uuid::Uuid;

//=========================================================================================
// Segmentation Output
//=========================================================================================

/// How a sentence ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminal {
    Period,
    Question,
    Exclamation,
    /// Ellipsis endings and sentences with no terminal punctuation.
    Other,
}

/// A contiguous span of a sample classified as a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceToken {
    /// The verbatim sentence text, trimmed of surrounding whitespace.
    pub text: String,
    /// Byte offsets of `text` inside the segmented source.
    pub span: Range<usize>,
    pub terminal: Terminal,
    /// Whether this is the first sentence of its paragraph.
    pub paragraph_start: bool,
    pub paragraph_index: usize,
    /// Words with their original casing.
    pub words: Vec<String>,
    /// Lowercased words with typographic apostrophes normalized.
    pub folded: Vec<String>,
}

impl SentenceToken {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Punctuation and symbol counts taken over a whole sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceCounts {
    pub emoji: usize,
    pub ellipses: usize,
    pub dashes: usize,
    pub parentheticals: usize,
}

/// Everything the segmenter learns about one piece of text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub sentences: Vec<SentenceToken>,
    pub paragraph_count: usize,
    pub line_count: usize,
    pub bullet_lines: usize,
    pub surface: SurfaceCounts,
}

//=========================================================================================
// Style Profile
//=========================================================================================

/// Qualitative bucket for the coefficient of variation of sentence lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum VariationLevel {
    Low,
    Moderate,
    High,
}

/// Sentence length variation as a label plus the raw coefficient behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LengthVariation {
    pub level: VariationLevel,
    pub coefficient: f64,
}

/// Quantitative style metrics computed over the union of all samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StyleMetrics {
    // Sentence structure
    pub avg_sentence_length: f64,
    pub sentence_length_std: f64,
    pub short_sentence_ratio: f64,
    pub long_sentence_ratio: f64,
    pub sentence_length_variation: LengthVariation,

    // Questions and emphasis
    pub question_ratio: f64,
    pub exclamation_ratio: f64,

    // Vocabulary
    pub vocabulary_richness: f64,
    pub avg_word_length: f64,
    pub contraction_ratio: f64,
    pub transition_density: f64,

    // Formatting
    pub avg_paragraph_length: f64,
    pub uses_bullet_points: bool,
    pub bullet_frequency: f64,
    pub opens_with_short_sentence: f64,

    // Punctuation and emoji
    pub emoji_frequency: f64,
    pub ellipsis_frequency: f64,
    pub dash_frequency: f64,
    pub parenthetical_frequency: f64,
}

/// The aggregated, immutable description of a user's writing voice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct StyleProfile {
    pub id: Uuid,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub sample_count: usize,
    pub metrics: StyleMetrics,
    pub signature_phrases: Vec<String>,
    pub vocabulary_preferences: Vec<String>,
    pub sentence_starters: Vec<String>,
    pub transition_words: Vec<String>,
    pub sample_excerpts: Vec<String>,
    pub formatting_style: String,
    pub raw_style_summary: String,
}

/// A profile together with the verbatim samples it was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub profile: StyleProfile,
    pub samples: Vec<String>,
}

/// A short listing entry for a stored profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProfileListItem {
    pub id: Uuid,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub sample_count: usize,
}

impl From<&StyleProfile> for ProfileListItem {
    fn from(profile: &StyleProfile) -> Self {
        Self {
            id: profile.id,
            user_name: profile.user_name.clone(),
            created_at: profile.created_at,
            sample_count: profile.sample_count,
        }
    }
}

//=========================================================================================
// Rewrite Directive
//=========================================================================================

/// An acceptable band around an observed metric value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TargetRange {
    pub observed: f64,
    pub min: f64,
    pub max: f64,
}

impl TargetRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Numeric targets for every metric the rewrite should hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MetricTargets {
    pub avg_sentence_length: TargetRange,
    pub question_ratio: TargetRange,
    pub exclamation_ratio: TargetRange,
    pub vocabulary_richness: TargetRange,
    pub contraction_ratio: TargetRange,
    pub short_sentence_ratio: TargetRange,
    pub emoji_frequency: TargetRange,
    pub sentence_length_variation: TargetRange,
    pub variation_level: VariationLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum BulletPolicy {
    /// Bullet points are welcome where the content is list-like.
    Allow,
    /// Flowing prose only.
    Avoid,
}

/// A structural instruction derived from the profile's metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum FormattingRule {
    ShortParagraphs,
    AvoidHeavyConnectives,
    UseContractions,
    MinimizeContractions,
    UseEmoji,
    NoEmoji,
    OpenParagraphsShort,
    AlternateSentenceLengths,
    MixSentenceLengths,
    KeepSentenceLengthsConsistent,
    UseRhetoricalQuestions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FormattingRules {
    pub max_sentences_per_paragraph: usize,
    pub bullet_policy: BulletPolicy,
    pub rules: Vec<FormattingRule>,
}

/// The fully specified instruction handed to the generation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RewriteDirective {
    pub profile_id: Uuid,
    pub draft_text: String,
    pub targets: MetricTargets,
    pub phrases: Vec<String>,
    pub vocabulary: Vec<String>,
    pub transition_words: Vec<String>,
    pub sentence_starters: Vec<String>,
    pub formatting: FormattingRules,
    pub reference_excerpts: Vec<String>,
    pub voice_summary: String,
}

impl RewriteDirective {
    /// Number of phrases and vocabulary terms the directive asks to inject.
    pub fn injected_term_count(&self) -> usize {
        self.phrases.len() + self.vocabulary.len()
    }
}

/// What the generation collaborator returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedRewrite {
    pub rewritten_text: String,
    pub style_notes: Vec<String>,
}

/// A rewrite result as surfaced to the caller, relayed without modification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RewriteOutcome {
    pub profile_id: Uuid,
    pub original_text: String,
    pub rewritten_text: String,
    pub style_notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enums_serialize_as_snake_case_labels() {
        let rules = FormattingRules {
            max_sentences_per_paragraph: 2,
            bullet_policy: BulletPolicy::Avoid,
            rules: vec![FormattingRule::ShortParagraphs, FormattingRule::NoEmoji],
        };
        assert_eq!(
            serde_json::to_value(&rules).unwrap(),
            json!({
                "max_sentences_per_paragraph": 2,
                "bullet_policy": "avoid",
                "rules": ["short_paragraphs", "no_emoji"]
            })
        );
        assert_eq!(
            serde_json::to_value(VariationLevel::Moderate).unwrap(),
            json!("moderate")
        );
    }

    #[test]
    fn target_range_bounds_are_inclusive() {
        let range = TargetRange {
            observed: 0.1,
            min: 0.05,
            max: 0.15,
        };
        assert!(range.contains(0.05));
        assert!(range.contains(0.15));
        assert!(!range.contains(0.151));
    }
}
