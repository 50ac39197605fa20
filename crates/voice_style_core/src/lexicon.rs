//! crates/voice_style_core/src/lexicon.rs
//!
//! Fixed English word lists shared by the segmenter, the metric calculator and
//! the signal extractor. All entries are lowercase and use a plain `'`.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Function words that never make a phrase or a vocabulary preference on their own.
pub static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "is", "are", "was", "were", "be", "been", "being", "am", "have",
        "has", "had", "do", "does", "did", "will", "would", "could", "should", "may",
        "might", "shall", "can", "need", "ought", "used", "to", "of", "in", "for", "on",
        "with", "at", "by", "from", "as", "into", "through", "during", "before", "after",
        "above", "below", "between", "out", "off", "over", "under", "again", "further",
        "then", "once", "here", "there", "when", "where", "why", "how", "all", "both",
        "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not", "only",
        "own", "same", "so", "than", "too", "very", "just", "now", "and", "but", "or", "if",
        "while", "that", "this", "these", "those", "it", "its", "i", "me", "my", "myself",
        "we", "us", "our", "ours", "you", "your", "yours", "he", "him", "his", "she", "her",
        "hers", "they", "them", "their", "what", "which", "who", "whom", "about", "up",
        "like", "get", "got", "make", "go", "going", "know", "think", "see", "come", "want",
        "look", "use", "find", "give", "tell", "say", "said", "also", "well", "back", "even",
        "still", "way", "take", "thing", "things", "much", "because", "good", "new",
        "first", "last", "long", "great", "little", "right", "old", "big", "high",
        "different", "small", "large", "next", "early", "young", "important", "people",
        "time", "year", "day", "let", "something", "really", "many", "every", "one", "two",
        "three", "anything", "nothing", "everything", "someone", "anyone", "everyone",
    ]
    .into_iter()
    .collect()
});

/// Single-word discourse connectives.
pub static CONNECTIVES: &[&str] = &[
    "actually", "also", "although", "and", "anyway", "basically", "because", "besides",
    "but", "clearly", "consequently", "essentially", "finally", "frankly", "furthermore",
    "hence", "honestly", "however", "instead", "listen", "literally", "look", "meanwhile",
    "moreover", "nevertheless", "nonetheless", "obviously", "rather", "simply", "since",
    "so", "still", "then", "therefore", "though", "thus", "ultimately", "yet",
];

/// Multi-word discourse connectives, matched as consecutive folded words.
pub static CONNECTIVE_PHRASES: &[&[&str]] = &[
    &["for", "example"],
    &["for", "instance"],
    &["here's", "the", "thing"],
    &["in", "fact"],
    &["the", "point", "is"],
    &["the", "truth", "is"],
];

/// Contractions that do not end in `n't`.
static CONTRACTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i'm", "i've", "i'll", "i'd", "you're", "you've", "you'll", "you'd", "he's",
        "he'll", "he'd", "she's", "she'll", "she'd", "it's", "it'll", "we're", "we've",
        "we'll", "we'd", "they're", "they've", "they'll", "they'd", "that's", "there's",
        "here's", "what's", "who's", "how's", "where's", "when's", "let's", "y'all",
        "gonna", "wanna", "gotta",
    ]
    .into_iter()
    .collect()
});

/// Abbreviations whose trailing period never ends a sentence.
static ABBREVIATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "approx",
        "dept", "inc", "ltd", "corp", "fig", "cf", "jan", "feb", "mar", "apr",
        "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "u.s", "a.m", "p.m",
    ]
    .into_iter()
    .collect()
});

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Whether a folded token is an apostrophe contraction.
pub fn is_contraction(folded: &str) -> bool {
    folded.ends_with("n't") || CONTRACTIONS.contains(folded)
}

pub fn is_abbreviation(folded: &str) -> bool {
    ABBREVIATIONS.contains(folded)
}

/// Pictographic emoji ranges. Joiners and variation selectors are excluded.
pub fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F300..=0x1FAFF | 0x2600..=0x27BF | 0x1F1E6..=0x1F1FF
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contractions_cover_negations_and_listed_forms() {
        assert!(is_contraction("don't"));
        assert!(is_contraction("wouldn't"));
        assert!(is_contraction("here's"));
        assert!(is_contraction("gonna"));
        assert!(!is_contraction("dont"));
        assert!(!is_contraction("john's"));
    }

    #[test]
    fn emoji_detection_skips_joiners() {
        assert!(is_emoji('🚀'));
        assert!(is_emoji('☀'));
        assert!(!is_emoji('\u{200D}'));
        assert!(!is_emoji('\u{FE0F}'));
        assert!(!is_emoji('a'));
    }

    #[test]
    fn contracted_forms_are_not_stop_words() {
        assert!(is_stop_word("it"));
        assert!(!is_stop_word("that's"));
    }
}
