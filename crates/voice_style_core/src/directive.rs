//! crates/voice_style_core/src/directive.rs
//!
//! The directive compiler turns a stored profile and a new draft into a
//! self-contained `RewriteDirective`. It never performs the rewrite; the
//! generation collaborator's answer is only relayed back through `relay`.

use crate::config::DirectiveConfig;
use crate::domain::{
    BulletPolicy, FormattingRule, FormattingRules, GeneratedRewrite, MetricTargets,
    RewriteDirective, RewriteOutcome, Segmentation, StyleMetrics, StyleProfile, TargetRange,
    VariationLevel,
};
use crate::error::{AnalysisResult, ValidationError};
use crate::lexicon;
use crate::metrics::round_to;
use crate::segmenter;
use tracing::{debug, info};

const SHORT_PARAGRAPH_SENTENCE_LENGTH: f64 = 12.0;
const SHORT_PARAGRAPH_MAX_SENTENCES: usize = 2;
const HEAVY_CONNECTIVE_DENSITY: f64 = 0.5;
const MIN_EXCERPTS: usize = 1;
const MAX_EXCERPTS: usize = 3;

/// Compiles a rewrite directive for `draft_text` in the voice of `profile`.
pub fn compile(
    profile: &StyleProfile,
    draft_text: &str,
    config: &DirectiveConfig,
) -> AnalysisResult<RewriteDirective> {
    validate_draft(draft_text, config)?;

    let metrics = &profile.metrics;
    let phrase_budget = config.max_phrases.min(config.max_injected_terms);
    let phrases: Vec<String> = profile
        .signature_phrases
        .iter()
        .take(phrase_budget)
        .cloned()
        .collect();
    let vocabulary_budget = config
        .max_vocabulary
        .min(config.max_injected_terms - phrases.len());
    let vocabulary: Vec<String> = profile
        .vocabulary_preferences
        .iter()
        .take(vocabulary_budget)
        .cloned()
        .collect();

    let reference_excerpts = select_excerpts(&profile.sample_excerpts, draft_text, config);

    let directive = RewriteDirective {
        profile_id: profile.id,
        draft_text: draft_text.to_string(),
        targets: targets(metrics, config),
        phrases,
        vocabulary,
        transition_words: profile
            .transition_words
            .iter()
            .take(config.max_transition_hints)
            .cloned()
            .collect(),
        sentence_starters: profile
            .sentence_starters
            .iter()
            .take(config.max_starter_hints)
            .cloned()
            .collect(),
        formatting: formatting_rules(profile),
        reference_excerpts,
        voice_summary: profile.raw_style_summary.clone(),
    };

    info!(
        profile_id = %profile.id,
        injected_terms = directive.injected_term_count(),
        excerpts = directive.reference_excerpts.len(),
        "Compiled rewrite directive."
    );
    Ok(directive)
}

/// Surfaces the generation collaborator's output for a directive, unchanged.
pub fn relay(directive: &RewriteDirective, generated: GeneratedRewrite) -> RewriteOutcome {
    RewriteOutcome {
        profile_id: directive.profile_id,
        original_text: directive.draft_text.clone(),
        rewritten_text: generated.rewritten_text,
        style_notes: generated.style_notes,
    }
}

fn validate_draft(draft_text: &str, config: &DirectiveConfig) -> Result<(), ValidationError> {
    let length = draft_text.trim().chars().count();
    if length < config.min_draft_length {
        return Err(ValidationError::DraftTooShort {
            length,
            min: config.min_draft_length,
        });
    }
    if length > config.max_draft_length {
        return Err(ValidationError::DraftTooLong {
            length,
            max: config.max_draft_length,
        });
    }
    Ok(())
}

//=========================================================================================
// Numeric Targets
//=========================================================================================

fn band(observed: f64, tolerance: f64, floor: f64, ceiling: f64) -> TargetRange {
    TargetRange {
        observed,
        min: round_to((observed - tolerance).max(floor), 3),
        max: round_to((observed + tolerance).min(ceiling), 3),
    }
}

fn ratio_band(observed: f64, config: &DirectiveConfig) -> TargetRange {
    band(observed, config.ratio_tolerance, 0.0, 1.0)
}

fn targets(metrics: &StyleMetrics, config: &DirectiveConfig) -> MetricTargets {
    MetricTargets {
        avg_sentence_length: band(
            metrics.avg_sentence_length,
            config.sentence_length_tolerance,
            1.0,
            f64::INFINITY,
        ),
        question_ratio: ratio_band(metrics.question_ratio, config),
        exclamation_ratio: ratio_band(metrics.exclamation_ratio, config),
        vocabulary_richness: ratio_band(metrics.vocabulary_richness, config),
        contraction_ratio: ratio_band(metrics.contraction_ratio, config),
        short_sentence_ratio: ratio_band(metrics.short_sentence_ratio, config),
        emoji_frequency: band(
            metrics.emoji_frequency,
            config.emoji_tolerance,
            0.0,
            f64::INFINITY,
        ),
        sentence_length_variation: band(
            metrics.sentence_length_variation.coefficient,
            config.variation_tolerance,
            0.0,
            f64::INFINITY,
        ),
        variation_level: metrics.sentence_length_variation.level,
    }
}

//=========================================================================================
// Formatting Rules
//=========================================================================================

fn formatting_rules(profile: &StyleProfile) -> FormattingRules {
    let metrics = &profile.metrics;
    let mut rules = Vec::new();

    let short_paragraphs = metrics.avg_sentence_length < SHORT_PARAGRAPH_SENTENCE_LENGTH
        && metrics.sentence_length_variation.level == VariationLevel::Low;
    if short_paragraphs {
        rules.push(FormattingRule::ShortParagraphs);
    }
    if metrics.transition_density < HEAVY_CONNECTIVE_DENSITY || profile.transition_words.is_empty()
    {
        rules.push(FormattingRule::AvoidHeavyConnectives);
    }
    rules.push(if metrics.contraction_ratio > 0.02 {
        FormattingRule::UseContractions
    } else {
        FormattingRule::MinimizeContractions
    });
    rules.push(if metrics.emoji_frequency > 0.0 {
        FormattingRule::UseEmoji
    } else {
        FormattingRule::NoEmoji
    });
    if metrics.opens_with_short_sentence > 0.4 {
        rules.push(FormattingRule::OpenParagraphsShort);
    }
    rules.push(match metrics.sentence_length_variation.level {
        VariationLevel::High => FormattingRule::AlternateSentenceLengths,
        VariationLevel::Moderate => FormattingRule::MixSentenceLengths,
        VariationLevel::Low => FormattingRule::KeepSentenceLengthsConsistent,
    });
    if metrics.question_ratio > 0.1 {
        rules.push(FormattingRule::UseRhetoricalQuestions);
    }

    let mut max_sentences = metrics.avg_paragraph_length.ceil().max(1.0) as usize;
    if short_paragraphs {
        max_sentences = max_sentences.min(SHORT_PARAGRAPH_MAX_SENTENCES);
    }

    FormattingRules {
        max_sentences_per_paragraph: max_sentences,
        bullet_policy: if metrics.uses_bullet_points {
            BulletPolicy::Allow
        } else {
            BulletPolicy::Avoid
        },
        rules,
    }
}

//=========================================================================================
// Reference Excerpts
//=========================================================================================

/// Surface register of a text: how long its sentences run and whether it
/// uses contractions.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Register {
    avg_sentence_length: f64,
    contracted: bool,
}

impl Register {
    fn of(segmentation: &Segmentation) -> Self {
        let sentences = &segmentation.sentences;
        let words: usize = sentences.iter().map(|s| s.word_count()).sum();
        let avg_sentence_length = if sentences.is_empty() {
            0.0
        } else {
            words as f64 / sentences.len() as f64
        };
        let contracted = sentences
            .iter()
            .flat_map(|s| s.folded.iter())
            .any(|w| lexicon::is_contraction(w));
        Self {
            avg_sentence_length,
            contracted,
        }
    }

    fn distance(&self, other: &Register) -> f64 {
        let length = (self.avg_sentence_length - other.avg_sentence_length).abs()
            / self.avg_sentence_length.max(1.0);
        let formality = if self.contracted == other.contracted {
            0.0
        } else {
            0.5
        };
        length + formality
    }
}

/// Picks the excerpts closest in register to the draft, keeping profile order on ties.
fn select_excerpts(excerpts: &[String], draft_text: &str, config: &DirectiveConfig) -> Vec<String> {
    let draft = Register::of(&segmenter::segment(draft_text));
    let mut scored: Vec<(usize, f64)> = excerpts
        .iter()
        .enumerate()
        .map(|(index, excerpt)| {
            let register = Register::of(&segmenter::segment(excerpt));
            (index, draft.distance(&register))
        })
        .collect();
    scored.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    debug!(candidates = scored.len(), "Ranked reference excerpts against draft.");

    scored
        .into_iter()
        .take(config.max_excerpts.clamp(MIN_EXCERPTS, MAX_EXCERPTS))
        .map(|(index, _)| excerpts[index].clone())
        .collect()
}
