//! crates/voice_style_core/src/signals.rs
//!
//! The signal extractor: signature phrases, vocabulary preferences, sentence
//! starters, transition words and representative excerpts.
//!
//! Every ranking breaks ties on frequency, then n-gram length, then
//! lexicographic order, so identical input always yields identical lists.

use crate::config::AnalysisConfig;
use crate::domain::{Segmentation, SentenceToken};
use crate::lexicon::{self, CONNECTIVES, CONNECTIVE_PHRASES};
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// The qualitative signals of a sample set, each list ranked most salient first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signals {
    pub signature_phrases: Vec<String>,
    pub vocabulary_preferences: Vec<String>,
    pub sentence_starters: Vec<String>,
    pub transition_words: Vec<String>,
    pub sample_excerpts: Vec<String>,
}

/// Extracts qualitative signals from segmented samples, in sample order.
pub fn extract(segmentations: &[Segmentation], config: &AnalysisConfig) -> Signals {
    let sentences: Vec<&SentenceToken> = segmentations
        .iter()
        .flat_map(|s| s.sentences.iter())
        .collect();

    let signature_phrases = signature_phrases(&sentences, config);
    let vocabulary_preferences = vocabulary_preferences(&sentences, &signature_phrases, config);
    let sentence_starters = sentence_starters(&sentences, config);
    let transition_words = rank(connective_counts(&sentences), 1, config.max_transition_words);
    let sample_excerpts =
        sample_excerpts(segmentations, &signature_phrases, &sentence_starters, config);

    debug!(
        phrases = signature_phrases.len(),
        vocabulary = vocabulary_preferences.len(),
        starters = sentence_starters.len(),
        transitions = transition_words.len(),
        excerpts = sample_excerpts.len(),
        "Extracted style signals."
    );

    Signals {
        signature_phrases,
        vocabulary_preferences,
        sentence_starters,
        transition_words,
        sample_excerpts,
    }
}

/// Counts discourse connectives, single words and multi-word phrases alike.
pub(crate) fn connective_counts(sentences: &[&SentenceToken]) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for sentence in sentences {
        for word in &sentence.folded {
            if CONNECTIVES.contains(&word.as_str()) {
                *counts.entry(word.clone()).or_default() += 1;
            }
        }
        for phrase in CONNECTIVE_PHRASES {
            let hits = sentence
                .folded
                .windows(phrase.len())
                .filter(|window| window.iter().zip(phrase.iter()).all(|(w, p)| w == p))
                .count();
            if hits > 0 {
                *counts.entry(phrase.join(" ")).or_default() += hits;
            }
        }
    }
    counts
}

/// Keeps entries seen at least `min_count` times, sorted by count then key.
fn rank(counts: HashMap<String, usize>, min_count: usize, cap: usize) -> Vec<String> {
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= min_count)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.into_iter().take(cap).map(|(key, _)| key).collect()
}

//=========================================================================================
// Signature Phrases and Vocabulary
//=========================================================================================

fn signature_phrases(sentences: &[&SentenceToken], config: &AnalysisConfig) -> Vec<String> {
    let mut counts: HashMap<Vec<&str>, usize> = HashMap::new();
    for sentence in sentences {
        for n in 2..=3 {
            for window in sentence.folded.windows(n) {
                if window.iter().all(|w| lexicon::is_stop_word(w)) {
                    continue;
                }
                let key: Vec<&str> = window.iter().map(String::as_str).collect();
                *counts.entry(key).or_default() += 1;
            }
        }
    }

    let mut ranked: Vec<(Vec<&str>, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count >= config.min_phrase_occurrences)
        .collect();
    ranked.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then_with(|| b.0.len().cmp(&a.0.len()))
            .then_with(|| a.0.cmp(&b.0))
    });

    let mut selected: Vec<(Vec<&str>, usize)> = Vec::new();
    for (words, count) in ranked {
        if selected.len() >= config.max_signature_phrases {
            break;
        }
        // A bigram that only ever occurs inside an already chosen trigram adds nothing.
        let redundant = selected.iter().any(|(longer, longer_count)| {
            *longer_count == count && longer.len() > words.len() && contains_run(longer, &words)
        });
        if !redundant {
            selected.push((words, count));
        }
    }
    selected.into_iter().map(|(words, _)| words.join(" ")).collect()
}

fn vocabulary_preferences(
    sentences: &[&SentenceToken],
    phrases: &[String],
    config: &AnalysisConfig,
) -> Vec<String> {
    let phrase_words: HashSet<&str> = phrases.iter().flat_map(|p| p.split(' ')).collect();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in sentences.iter().flat_map(|s| s.folded.iter()) {
        if lexicon::is_stop_word(word)
            || word.chars().count() <= 2
            || word.chars().all(|c| c.is_numeric())
            || phrase_words.contains(word.as_str())
        {
            continue;
        }
        *counts.entry(word.clone()).or_default() += 1;
    }
    rank(counts, 2, config.max_vocabulary_preferences)
}

fn sentence_starters(sentences: &[&SentenceToken], config: &AnalysisConfig) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for first in sentences.iter().filter_map(|s| s.folded.first()) {
        *counts.entry(first.clone()).or_default() += 1;
    }
    rank(counts, 2, config.max_sentence_starters)
}

fn contains_run<T: PartialEq>(haystack: &[T], needle: &[T]) -> bool {
    !needle.is_empty()
        && haystack.len() >= needle.len()
        && haystack.windows(needle.len()).any(|window| window == needle)
}

//=========================================================================================
// Excerpts
//=========================================================================================

fn sample_excerpts(
    segmentations: &[Segmentation],
    phrases: &[String],
    starters: &[String],
    config: &AnalysisConfig,
) -> Vec<String> {
    let phrase_words: Vec<Vec<&str>> = phrases.iter().map(|p| p.split(' ').collect()).collect();
    let starters: HashSet<&str> = starters.iter().map(String::as_str).collect();

    // (sample index, sentence index, sentence, score)
    let mut candidates: Vec<(usize, usize, &SentenceToken, usize)> = Vec::new();
    for (sample, segmentation) in segmentations.iter().enumerate() {
        for (index, sentence) in segmentation.sentences.iter().enumerate() {
            let folded: Vec<&str> = sentence.folded.iter().map(String::as_str).collect();
            let phrase_hits = phrase_words
                .iter()
                .filter(|words| contains_run(&folded, words))
                .count();
            let opens_with_starter = folded.first().is_some_and(|w| starters.contains(w));
            let score = phrase_hits * 2 + usize::from(opens_with_starter);
            candidates.push((sample, index, sentence, score));
        }
    }

    let mut matched: Vec<_> = candidates.iter().filter(|c| c.3 > 0).collect();
    matched.sort_by_key(|c| (Reverse(c.3), c.0, c.1));
    let mut longest: Vec<_> = candidates.iter().collect();
    longest.sort_by_key(|c| (Reverse(c.2.word_count()), c.0, c.1));

    let mut excerpts: Vec<String> = Vec::new();
    for (_, _, sentence, _) in matched.into_iter().chain(longest) {
        if excerpts.len() >= config.max_excerpts {
            break;
        }
        let excerpt = truncate_excerpt(&sentence.text, config.max_excerpt_chars);
        if !excerpt.is_empty() && !excerpts.iter().any(|e| e == excerpt) {
            excerpts.push(excerpt.to_string());
        }
    }
    excerpts
}

/// Cuts `text` to at most `max_chars` characters, preferring a word boundary.
/// The result is always a prefix of `text`.
fn truncate_excerpt(text: &str, max_chars: usize) -> &str {
    let Some((cut, _)) = text.char_indices().nth(max_chars) else {
        return text;
    };
    let head = &text[..cut];
    match head.rfind(char::is_whitespace) {
        Some(space) if space > 0 => head[..space].trim_end(),
        _ => head,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segmenter::segment;

    fn signals_for(samples: &[&str]) -> Signals {
        let segmentations: Vec<Segmentation> = samples.iter().map(|s| segment(s)).collect();
        extract(&segmentations, &AnalysisConfig::default())
    }

    #[test]
    fn recurring_phrases_rank_by_frequency_then_length() {
        let signals = signals_for(&[
            "Ship it fast. Ship it fast. Ship it fast.",
            "Keep shipping daily. Keep shipping daily.",
        ]);
        assert_eq!(
            signals.signature_phrases,
            vec!["ship it fast", "keep shipping daily"]
        );
    }

    #[test]
    fn stop_word_only_phrases_are_excluded() {
        let signals = signals_for(&["It is what it is. It is what it is."]);
        assert!(signals.signature_phrases.is_empty());
    }

    #[test]
    fn vocabulary_skips_stop_words_and_phrase_words() {
        let signals = signals_for(&[
            "Momentum matters. Momentum compounds quietly.",
            "Build momentum early. Shipping beats planning. Shipping wins.",
        ]);
        assert_eq!(signals.vocabulary_preferences, vec!["momentum", "shipping"]);
    }

    #[test]
    fn starters_need_more_than_one_use() {
        let signals = signals_for(&["So we ship. So we learn. Then we rest."]);
        assert_eq!(signals.sentence_starters, vec!["so"]);
    }

    #[test]
    fn transitions_include_multi_word_connectives() {
        let signals = signals_for(&[
            "In fact it works. However, it is slow. However, we ship. In fact we do.",
        ]);
        assert_eq!(signals.transition_words, vec!["however", "in fact"]);
    }

    #[test]
    fn ties_break_lexicographically() {
        let signals = signals_for(&["Zebra crossing. Apple picking. Zebra crossing. Apple picking."]);
        assert_eq!(signals.signature_phrases, vec!["apple picking", "zebra crossing"]);
    }

    #[test]
    fn excerpts_prefer_phrase_matches_and_stay_verbatim() {
        let samples = [
            "Momentum is everything. Keep shipping daily, always.",
            "Keep shipping daily. A much longer sentence without the phrase goes right here.",
        ];
        let signals = signals_for(&samples);
        assert_eq!(signals.sample_excerpts[0], "Keep shipping daily, always.");
        assert_eq!(signals.sample_excerpts[1], "Keep shipping daily.");
        for excerpt in &signals.sample_excerpts {
            assert!(samples.iter().any(|s| s.contains(excerpt.as_str())));
        }
    }

    #[test]
    fn excerpts_fall_back_to_longest_sentences() {
        let signals = signals_for(&["Short. This one is clearly the longest sentence. Medium one here."]);
        assert_eq!(signals.sample_excerpts[0], "This one is clearly the longest sentence.");
        assert_eq!(signals.sample_excerpts.len(), 3);
    }

    #[test]
    fn truncation_keeps_a_prefix() {
        assert_eq!(truncate_excerpt("alpha beta gamma", 12), "alpha beta");
        assert_eq!(truncate_excerpt("alpha", 12), "alpha");
        assert_eq!(truncate_excerpt("abcdefgh", 4), "abcd");
    }
}
