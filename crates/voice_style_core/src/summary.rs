//! crates/voice_style_core/src/summary.rs
//!
//! Natural-language descriptions synthesized from computed metrics with fixed
//! sentence templates. No generative model is involved.

use crate::domain::{StyleMetrics, VariationLevel};
use crate::signals::Signals;

/// Describes paragraph, bullet and sentence formatting.
pub fn describe_formatting(metrics: &StyleMetrics) -> String {
    let mut parts: Vec<&str> = Vec::new();

    parts.push(if metrics.avg_paragraph_length <= 2.0 {
        "Uses very short paragraphs (1-2 sentences)"
    } else if metrics.avg_paragraph_length <= 4.0 {
        "Uses moderate-length paragraphs (3-4 sentences)"
    } else {
        "Uses longer paragraphs (5+ sentences)"
    });

    parts.push(match (metrics.uses_bullet_points, metrics.bullet_frequency > 0.2) {
        (true, true) => "Heavy use of bullet points and lists",
        (true, false) => "Occasional use of bullet points",
        (false, _) => "Rarely or never uses bullet points",
    });

    if metrics.short_sentence_ratio > 0.3 {
        parts.push("Frequently uses punchy, short sentences for emphasis");
    }
    if metrics.long_sentence_ratio > 0.2 {
        parts.push("Includes longer, detailed sentences");
    }

    format!("{}.", parts.join(". "))
}

/// Builds the one-paragraph voice summary stored on a profile.
pub fn summarize(metrics: &StyleMetrics, signals: &Signals) -> String {
    let mut parts: Vec<String> = Vec::new();

    let regime = if metrics.avg_sentence_length < 10.0 {
        "This writer uses notably short, punchy sentences"
    } else if metrics.avg_sentence_length < 15.0 {
        "This writer uses moderate-length sentences"
    } else {
        "This writer tends toward longer, more detailed sentences"
    };
    let rhythm = match metrics.sentence_length_variation.level {
        VariationLevel::High => {
            "with high variation between short and long sentences, creating a dynamic rhythm"
        }
        VariationLevel::Moderate => "with moderate variation in sentence length",
        VariationLevel::Low => "with consistent sentence lengths throughout",
    };
    parts.push(format!(
        "{regime} (about {:.1} words each) {rhythm}",
        metrics.avg_sentence_length
    ));

    if metrics.question_ratio > 0.15 {
        parts.push("They frequently use rhetorical questions to engage readers".to_string());
    } else if metrics.question_ratio > 0.05 {
        parts.push("They occasionally use questions".to_string());
    }
    if metrics.exclamation_ratio > 0.1 {
        parts.push("Exclamation marks are used liberally for emphasis and energy".to_string());
    }

    if metrics.vocabulary_richness > 0.6 {
        parts.push("The vocabulary is rich and varied".to_string());
    } else if metrics.vocabulary_richness < 0.4 {
        parts.push("The vocabulary is focused and repetitive, which creates familiarity".to_string());
    }

    if metrics.contraction_ratio > 0.03 {
        parts.push("Heavy use of contractions gives a conversational, informal tone".to_string());
    } else if metrics.contraction_ratio < 0.01 {
        parts.push("Minimal contractions suggest a more formal tone".to_string());
    }

    if metrics.uses_bullet_points {
        parts.push("Bullet points and lists are part of the formatting style".to_string());
    }
    if metrics.emoji_frequency > 0.5 {
        parts.push("Emojis are used frequently as part of the communication style".to_string());
    } else if metrics.emoji_frequency > 0.0 {
        parts.push("Emojis are used sparingly".to_string());
    }
    if metrics.dash_frequency > 0.5 {
        parts.push("Dashes are used frequently for emphasis or asides".to_string());
    }
    if metrics.opens_with_short_sentence > 0.5 {
        parts.push("Paragraphs often open with a short, punchy statement".to_string());
    }

    if let Some(phrase) = signals.signature_phrases.first() {
        parts.push(format!("A recurring signature phrase is \"{phrase}\""));
    }

    format!("{}.", parts.join(". "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LengthVariation;

    fn base_metrics() -> StyleMetrics {
        StyleMetrics {
            avg_sentence_length: 7.5,
            sentence_length_std: 2.0,
            short_sentence_ratio: 0.5,
            long_sentence_ratio: 0.0,
            sentence_length_variation: LengthVariation {
                level: VariationLevel::Low,
                coefficient: 0.2,
            },
            question_ratio: 0.0,
            exclamation_ratio: 0.2,
            vocabulary_richness: 0.7,
            avg_word_length: 4.1,
            contraction_ratio: 0.05,
            transition_density: 1.0,
            avg_paragraph_length: 1.5,
            uses_bullet_points: false,
            bullet_frequency: 0.0,
            opens_with_short_sentence: 0.8,
            emoji_frequency: 0.0,
            ellipsis_frequency: 0.0,
            dash_frequency: 0.0,
            parenthetical_frequency: 0.0,
        }
    }

    #[test]
    fn summary_states_regime_richness_and_top_phrase() {
        let signals = Signals {
            signature_phrases: vec!["ship it".to_string()],
            ..Signals::default()
        };
        let summary = summarize(&base_metrics(), &signals);
        assert!(summary.starts_with("This writer uses notably short, punchy sentences (about 7.5 words each)"));
        assert!(summary.contains("The vocabulary is rich and varied"));
        assert!(summary.contains("Exclamation marks are used liberally"));
        assert!(summary.contains("conversational, informal tone"));
        assert!(summary.ends_with("A recurring signature phrase is \"ship it\"."));
    }

    #[test]
    fn formatting_description_mentions_paragraphs_and_bullets() {
        let description = describe_formatting(&base_metrics());
        assert_eq!(
            description,
            "Uses very short paragraphs (1-2 sentences). Rarely or never uses bullet points. \
             Frequently uses punchy, short sentences for emphasis."
        );
    }
}
