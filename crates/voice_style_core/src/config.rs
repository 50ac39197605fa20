//! crates/voice_style_core/src/config.rs
//!
//! Tunable thresholds and caps for the engine. Both records are plain values
//! passed into the engine by the caller; the engine never reads the
//! environment itself.

/// Thresholds and caps used while building a style profile.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub min_samples: usize,
    pub max_samples: usize,
    /// Minimum trimmed character count of each sample.
    pub min_sample_length: usize,
    pub max_sample_length: usize,
    pub max_user_name_length: usize,
    /// Sentences with fewer words than this count as short.
    pub short_sentence_threshold: usize,
    /// Sentences with at least this many words count as long.
    pub long_sentence_threshold: usize,
    /// A paragraph "opens short" when its first sentence has at most this many words.
    pub short_opener_max_words: usize,
    /// An n-gram must occur at least this often to become a signature phrase.
    pub min_phrase_occurrences: usize,
    pub max_signature_phrases: usize,
    pub max_vocabulary_preferences: usize,
    pub max_sentence_starters: usize,
    pub max_transition_words: usize,
    pub max_excerpts: usize,
    /// Excerpts are cut to at most this many characters.
    pub max_excerpt_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_samples: 3,
            max_samples: 10,
            min_sample_length: 50,
            max_sample_length: 20_000,
            max_user_name_length: 100,
            short_sentence_threshold: 6,
            long_sentence_threshold: 20,
            short_opener_max_words: 6,
            min_phrase_occurrences: 2,
            max_signature_phrases: 10,
            max_vocabulary_preferences: 15,
            max_sentence_starters: 10,
            max_transition_words: 10,
            max_excerpts: 5,
            max_excerpt_chars: 200,
        }
    }
}

/// Tolerance bands and caps used when compiling a rewrite directive.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveConfig {
    pub min_draft_length: usize,
    pub max_draft_length: usize,
    /// Half-width of the average sentence length band, in words.
    pub sentence_length_tolerance: f64,
    /// Half-width of every ratio band.
    pub ratio_tolerance: f64,
    /// Half-width of the emoji-per-100-words band.
    pub emoji_tolerance: f64,
    /// Half-width of the coefficient of variation band.
    pub variation_tolerance: f64,
    pub max_phrases: usize,
    pub max_vocabulary: usize,
    /// Combined cap on injected phrases and vocabulary terms.
    pub max_injected_terms: usize,
    pub max_transition_hints: usize,
    pub max_starter_hints: usize,
    pub max_excerpts: usize,
}

impl Default for DirectiveConfig {
    fn default() -> Self {
        Self {
            min_draft_length: 20,
            max_draft_length: 20_000,
            sentence_length_tolerance: 2.0,
            ratio_tolerance: 0.05,
            emoji_tolerance: 0.5,
            variation_tolerance: 0.1,
            max_phrases: 5,
            max_vocabulary: 8,
            max_injected_terms: 10,
            max_transition_hints: 5,
            max_starter_hints: 5,
            max_excerpts: 3,
        }
    }
}
