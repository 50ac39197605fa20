//! crates/voice_style_core/src/metrics.rs
//!
//! The metric calculator. Every metric is computed over the union of all
//! sentences of all samples; per-sample values are never averaged together.

use crate::config::AnalysisConfig;
use crate::domain::{
    LengthVariation, Segmentation, SentenceToken, StyleMetrics, Terminal, VariationLevel,
};
use crate::error::{AnalysisError, AnalysisResult};
use crate::lexicon;
use crate::signals::connective_counts;
use std::collections::HashSet;
use tracing::debug;

const HIGH_VARIATION_CUTOFF: f64 = 0.7;
const MODERATE_VARIATION_CUTOFF: f64 = 0.4;

/// Computes the style metrics of a set of segmented samples.
///
/// Fails with [`AnalysisError::InsufficientData`] when the samples hold no
/// sentence at all.
pub fn compute(
    segmentations: &[Segmentation],
    config: &AnalysisConfig,
) -> AnalysisResult<StyleMetrics> {
    let sentences: Vec<&SentenceToken> = segmentations
        .iter()
        .flat_map(|s| s.sentences.iter())
        .collect();
    if sentences.is_empty() {
        return Err(AnalysisError::InsufficientData(
            "the samples contain no sentences".to_string(),
        ));
    }

    let sentence_count = sentences.len();
    let lengths: Vec<usize> = sentences.iter().map(|s| s.word_count()).collect();
    let total_words: usize = lengths.iter().sum();
    let words: Vec<&str> = sentences
        .iter()
        .flat_map(|s| s.folded.iter().map(String::as_str))
        .collect();

    let mean = total_words as f64 / sentence_count as f64;
    let std = population_std(&lengths, mean);
    let variation = length_variation(std, mean, sentence_count);

    let count_terminal = |kind: Terminal| sentences.iter().filter(|s| s.terminal == kind).count();
    let distinct: HashSet<&str> = words.iter().copied().collect();
    let contractions = words.iter().filter(|w| lexicon::is_contraction(w)).count();
    let word_chars: usize = sentences
        .iter()
        .flat_map(|s| s.words.iter())
        .map(|w| w.chars().count())
        .sum();
    let connectives: usize = connective_counts(&sentences).values().sum();

    let paragraphs: usize = segmentations.iter().map(|s| s.paragraph_count).sum();
    let short_openers = sentences
        .iter()
        .filter(|s| s.paragraph_start && s.word_count() <= config.short_opener_max_words)
        .count();
    let lines: usize = segmentations.iter().map(|s| s.line_count).sum();
    let bullet_lines: usize = segmentations.iter().map(|s| s.bullet_lines).sum();

    let emoji: usize = segmentations.iter().map(|s| s.surface.emoji).sum();
    let ellipses: usize = segmentations.iter().map(|s| s.surface.ellipses).sum();
    let dashes: usize = segmentations.iter().map(|s| s.surface.dashes).sum();
    let parentheticals: usize = segmentations.iter().map(|s| s.surface.parentheticals).sum();

    let metrics = StyleMetrics {
        avg_sentence_length: round_to(mean, 1),
        sentence_length_std: round_to(std, 2),
        short_sentence_ratio: ratio(
            lengths
                .iter()
                .filter(|&&l| l < config.short_sentence_threshold)
                .count(),
            sentence_count,
        ),
        long_sentence_ratio: ratio(
            lengths
                .iter()
                .filter(|&&l| l >= config.long_sentence_threshold)
                .count(),
            sentence_count,
        ),
        sentence_length_variation: variation,
        question_ratio: ratio(count_terminal(Terminal::Question), sentence_count),
        exclamation_ratio: ratio(count_terminal(Terminal::Exclamation), sentence_count),
        vocabulary_richness: ratio(distinct.len(), total_words),
        avg_word_length: round_to(word_chars as f64 / total_words as f64, 2),
        contraction_ratio: ratio(contractions, total_words),
        transition_density: per_hundred(connectives, total_words),
        avg_paragraph_length: round_to(sentence_count as f64 / paragraphs.max(1) as f64, 2),
        uses_bullet_points: bullet_lines > 0,
        bullet_frequency: ratio(bullet_lines, lines.max(1)),
        opens_with_short_sentence: ratio(short_openers, paragraphs.max(1)),
        emoji_frequency: per_hundred(emoji, total_words),
        ellipsis_frequency: per_hundred(ellipses, sentence_count),
        dash_frequency: per_hundred(dashes, total_words),
        parenthetical_frequency: per_hundred(parentheticals, sentence_count),
    };

    debug!(
        sentences = sentence_count,
        words = total_words,
        avg_sentence_length = metrics.avg_sentence_length,
        "Computed style metrics."
    );
    Ok(metrics)
}

fn population_std(lengths: &[usize], mean: f64) -> f64 {
    let variance = lengths
        .iter()
        .map(|&l| (l as f64 - mean).powi(2))
        .sum::<f64>()
        / lengths.len() as f64;
    variance.sqrt()
}

/// Coefficient of variation, bucketed. A single sentence has no variation.
fn length_variation(std: f64, mean: f64, sentence_count: usize) -> LengthVariation {
    let coefficient = if sentence_count >= 2 && mean > 0.0 {
        std / mean
    } else {
        0.0
    };
    let level = if coefficient > HIGH_VARIATION_CUTOFF {
        VariationLevel::High
    } else if coefficient > MODERATE_VARIATION_CUTOFF {
        VariationLevel::Moderate
    } else {
        VariationLevel::Low
    };
    LengthVariation {
        level,
        coefficient: round_to(coefficient, 3),
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to((count as f64 / total as f64).clamp(0.0, 1.0), 3)
}

fn per_hundred(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(count as f64 / total as f64 * 100.0, 3)
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::segment;

    fn metrics_for(samples: &[&str]) -> StyleMetrics {
        let segmentations: Vec<Segmentation> = samples.iter().map(|s| segment(s)).collect();
        compute(&segmentations, &AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn zero_sentences_is_insufficient_data() {
        let err = compute(&[segment("   ")], &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData(_)));
    }

    #[test]
    fn average_is_taken_over_the_union_of_sentences() {
        // A: two sentences of five words. B: one sentence of fifteen words.
        let a = "One two three four five. One two three four five.";
        let b = "One two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen.";
        let metrics = metrics_for(&[a, b]);
        assert_eq!(metrics.avg_sentence_length, 8.3);
        assert_ne!(metrics.avg_sentence_length, 10.0);
    }

    #[test]
    fn terminal_ratios_are_independent() {
        let metrics = metrics_for(&["Is it? Yes! Fine. Maybe"]);
        assert_eq!(metrics.question_ratio, 0.25);
        assert_eq!(metrics.exclamation_ratio, 0.25);
    }

    #[test]
    fn vocabulary_richness_is_case_folded() {
        let metrics = metrics_for(&["Ship ship SHIP fast."]);
        assert_eq!(metrics.vocabulary_richness, 0.5);
    }

    #[test]
    fn contractions_and_short_sentences_are_counted() {
        let metrics = metrics_for(&["Don't wait. That's it. We keep going with this plan today."]);
        // 11 words, two contractions.
        assert_eq!(metrics.contraction_ratio, round_to(2.0 / 11.0, 3));
        assert_eq!(metrics.short_sentence_ratio, round_to(2.0 / 3.0, 3));
    }

    #[test]
    fn emoji_are_normalized_per_hundred_words() {
        let metrics = metrics_for(&["Ship it now 🚀 please."]);
        assert_eq!(metrics.emoji_frequency, 25.0);
    }

    #[test]
    fn uniform_lengths_have_low_variation() {
        let metrics = metrics_for(&["One two three. Four five six. Seven eight nine."]);
        assert_eq!(metrics.sentence_length_variation.level, VariationLevel::Low);
        assert_eq!(metrics.sentence_length_variation.coefficient, 0.0);
    }

    #[test]
    fn mixed_lengths_have_high_variation() {
        let metrics = metrics_for(&[
            "No. Stop. This sentence goes on for quite a long while before it finally ends.",
        ]);
        assert_eq!(metrics.sentence_length_variation.level, VariationLevel::High);
        assert!(metrics.sentence_length_variation.coefficient > HIGH_VARIATION_CUTOFF);
    }

    #[test]
    fn formatting_metrics_follow_layout() {
        let metrics = metrics_for(&["Short one. Then another.\n\nNext part here.\n- a bullet\n- another bullet"]);
        assert!(metrics.uses_bullet_points);
        assert_eq!(metrics.bullet_frequency, 0.5);
        assert_eq!(metrics.avg_paragraph_length, 1.25);
        assert_eq!(metrics.opens_with_short_sentence, 1.0);
    }

    #[test]
    fn ratios_stay_in_unit_interval() {
        let metrics = metrics_for(&["Wow! Wow! Wow!", "Why? Why not?"]);
        for value in [
            metrics.question_ratio,
            metrics.exclamation_ratio,
            metrics.vocabulary_richness,
            metrics.contraction_ratio,
            metrics.short_sentence_ratio,
            metrics.long_sentence_ratio,
            metrics.bullet_frequency,
            metrics.opens_with_short_sentence,
        ] {
            assert!((0.0..=1.0).contains(&value));
        }
        assert!(metrics.avg_sentence_length >= 1.0);
    }
}
