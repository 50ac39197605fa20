//! crates/voice_style_core/src/segmenter.rs
//!
//! Splits raw text into paragraphs, sentences and word tokens. This is the
//! shared primitive under the metric calculator and the signal extractor, so
//! it must stay pure: identical text always yields an identical segmentation.

use crate::domain::{Segmentation, SentenceToken, SurfaceCounts, Terminal};
use crate::lexicon;
use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static WORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’][\p{L}\p{N}]+)*").expect("word pattern is valid")
});
static BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:[-*•]|\d+[.)])\s+").expect("bullet pattern is valid"));
static ELLIPSIS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\.{3,}|…").expect("ellipsis pattern is valid"));
static DASH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[—–]|[ \t]-{1,2}[ \t]").expect("dash pattern is valid"));
static PAREN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^)]+\)").expect("parenthetical pattern is valid"));

/// Segments `text` into sentences with per-sentence word lists.
///
/// Empty or whitespace-only text yields an empty segmentation. Text without
/// any terminal punctuation becomes a single sentence.
pub fn segment(text: &str) -> Segmentation {
    let layout = paragraph_layout(text);
    let mut sentences = Vec::new();

    for (paragraph_index, paragraph) in layout.paragraphs.iter().enumerate() {
        let body_start = BULLET_RE
            .find(&text[paragraph.clone()])
            .map_or(paragraph.start, |m| paragraph.start + m.end());
        let body = &text[body_start..paragraph.end];

        let mut first_in_paragraph = true;
        for (range, terminal) in sentence_spans(body) {
            let raw = &body[range.clone()];
            let leading = raw.len() - raw.trim_start().len();
            let trimmed = raw.trim();
            let words: Vec<String> = tokenize(trimmed);
            if words.is_empty() {
                continue;
            }
            let start = body_start + range.start + leading;
            let folded = words.iter().map(|w| fold(w)).collect();
            sentences.push(SentenceToken {
                text: trimmed.to_string(),
                span: start..start + trimmed.len(),
                terminal,
                paragraph_start: first_in_paragraph,
                paragraph_index,
                words,
                folded,
            });
            first_in_paragraph = false;
        }
    }

    let paragraph_count = sentences
        .iter()
        .filter(|s| s.paragraph_start)
        .count();

    Segmentation {
        sentences,
        paragraph_count,
        line_count: layout.line_count,
        bullet_lines: layout.bullet_lines,
        surface: surface_counts(text),
    }
}

/// Splits `text` into words: runs of Unicode letters and digits, keeping
/// inner apostrophes so contractions stay whole. Casing is preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Case-folds a word and normalizes typographic apostrophes.
pub fn fold(word: &str) -> String {
    word.to_lowercase().replace('’', "'")
}

struct Layout {
    paragraphs: Vec<Range<usize>>,
    line_count: usize,
    bullet_lines: usize,
}

/// Blank lines separate paragraphs, and every bullet line opens a new one.
fn paragraph_layout(text: &str) -> Layout {
    let mut paragraphs = Vec::new();
    let mut current: Option<Range<usize>> = None;
    let mut line_count = 0;
    let mut bullet_lines = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let start = offset;
        offset += line.len();
        let content = line.trim_end_matches(['\n', '\r']);
        if content.trim().is_empty() {
            if let Some(paragraph) = current.take() {
                paragraphs.push(paragraph);
            }
            continue;
        }

        line_count += 1;
        if BULLET_RE.is_match(content) {
            bullet_lines += 1;
            if let Some(paragraph) = current.take() {
                paragraphs.push(paragraph);
            }
        }

        let end = start + content.len();
        match current.as_mut() {
            Some(paragraph) => paragraph.end = end,
            None => current = Some(start..end),
        }
    }
    if let Some(paragraph) = current {
        paragraphs.push(paragraph);
    }

    Layout {
        paragraphs,
        line_count,
        bullet_lines,
    }
}

fn is_terminal_char(c: char) -> bool {
    matches!(c, '.' | '?' | '!' | '…')
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | '”' | '’' | ')' | ']' | '»')
}

/// Returns sentence byte ranges within a single paragraph body.
fn sentence_spans(body: &str) -> Vec<(Range<usize>, Terminal)> {
    let chars: Vec<(usize, char)> = body.char_indices().collect();
    let mut spans = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if !is_terminal_char(chars[i].1) {
            i += 1;
            continue;
        }

        let run_start = chars[i].0;
        while i < chars.len() && is_terminal_char(chars[i].1) {
            i += 1;
        }
        let run_end = chars.get(i).map_or(body.len(), |(at, _)| *at);
        while i < chars.len() && is_closer(chars[i].1) {
            i += 1;
        }

        // Decimals, URLs and inner dots ("e.g") are never followed by whitespace.
        if i < chars.len() && !chars[i].1.is_whitespace() {
            continue;
        }

        let run = &body[run_start..run_end];
        let next_visible = chars[i..].iter().map(|(_, c)| *c).find(|c| !c.is_whitespace());

        // A sentence only ends where the next one starts with something other
        // than a lowercase letter: `"Go!" she said.`, `wait... what`, `it. then`.
        if next_visible.is_some_and(char::is_lowercase) {
            continue;
        }
        if run == "." && ends_with_abbreviation(&body[start..run_start]) {
            continue;
        }

        let end = chars.get(i).map_or(body.len(), |(at, _)| *at);
        spans.push((start..end, classify(run)));
        start = end;
    }

    if !body[start..].trim().is_empty() {
        spans.push((start..body.len(), Terminal::Other));
    }
    spans
}

fn ends_with_abbreviation(preceding: &str) -> bool {
    let mut tokens = preceding.split_whitespace().rev();
    let Some(last) = tokens.next() else {
        return false;
    };
    let word = last.trim_start_matches(|c: char| !c.is_alphanumeric());
    if lexicon::is_abbreviation(&fold(word)) {
        return true;
    }
    // "J. R. Smith" and a leading "J. Smith" are initials; "Plan B." is not.
    is_initial(word)
        && tokens
            .next()
            .map_or(true, |before| {
                before
                    .strip_suffix('.')
                    .is_some_and(|b| is_initial(b.trim_start_matches(|c: char| !c.is_alphanumeric())))
            })
}

fn is_initial(word: &str) -> bool {
    let mut letters = word.chars();
    matches!(
        (letters.next(), letters.next()),
        (Some(c), None) if c.is_uppercase() && c != 'I'
    )
}

fn classify(run: &str) -> Terminal {
    for c in run.chars().rev() {
        match c {
            '?' => return Terminal::Question,
            '!' => return Terminal::Exclamation,
            _ => {}
        }
    }
    if run == "." {
        Terminal::Period
    } else {
        Terminal::Other
    }
}

fn surface_counts(text: &str) -> SurfaceCounts {
    SurfaceCounts {
        emoji: text.chars().filter(|c| lexicon::is_emoji(*c)).count(),
        ellipses: ELLIPSIS_RE.find_iter(text).count(),
        dashes: text
            .lines()
            .map(|line| {
                let body = BULLET_RE.find(line).map_or(line, |m| &line[m.end()..]);
                DASH_RE.find_iter(body).count()
            })
            .sum(),
        parentheticals: PAREN_RE.find_iter(text).count(),
    }
}
