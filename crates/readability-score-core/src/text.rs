//! Text tokenization.
//!
//! Provides the [`SentenceSplitter`] capability with a punctuation-driven
//! default implementation, and the `\w+` word extraction rule used for
//! letter and syllable counting.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Maximal runs of Unicode word characters (letters, marks, digits, connector punctuation).
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+").expect("valid regex"));

/// Abbreviations that never end a sentence, lowercase and without the final period.
///
/// Ordinary English words ("in", "no", "sat", "may") stay out of this list.
const ABBREVIATIONS: &[&str] = &[
    // Titles and honorifics
    "mr", "mrs", "ms", "dr", "prof", "rev", "fr", "sr", "jr", "st", "hon", "esq", "capt", "col",
    "gen", "lt", "maj", "sgt", "cpl", "adm", "cmdr", "sen", "gov", "pres",
    // Latin and reference shorthand
    "etc", "vs", "viz", "cf", "ibid", "al", "e.g", "i.e", "n.b", "p.s", "ca",
    // Degrees and times
    "ph.d", "m.d", "b.a", "b.sc", "m.a", "m.sc", "a.m", "p.m", "b.c", "a.d",
    // Months and weekdays
    "jan", "feb", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "mon", "tue",
    "tues", "wed", "thu", "thur", "thurs", "fri",
    // Places and organisations
    "ave", "blvd", "rd", "apt", "dept", "bldg", "inc", "corp", "ltd", "llc", "co", "bros",
    "assn", "intl", "u.s", "u.k", "e.u",
    // Units and references
    "approx", "est", "vol", "nos", "pp", "ch", "fig", "eq",
];

/// Capability: split raw text into an ordered sequence of sentences.
///
/// Implementations must be deterministic: the same input always yields the
/// same sentences.
pub trait SentenceSplitter: Send + Sync {
    /// Split `text` into sentences, in document order.
    fn split(&self, text: &str) -> Vec<String>;
}

/// Sentence splitter driven by terminal punctuation with abbreviation, initial,
/// decimal, and ellipsis awareness.
#[derive(Debug, Clone)]
pub struct PunctuationSplitter {
    abbreviations: HashSet<String>,
}

impl Default for PunctuationSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl PunctuationSplitter {
    /// Create a splitter using the built-in abbreviation list.
    pub fn new() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// Add extra abbreviations (case-insensitive, trailing period optional).
    #[must_use]
    pub fn with_abbreviations<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.abbreviations.extend(
            extra
                .into_iter()
                .map(|a| a.as_ref().trim().trim_end_matches('.').to_lowercase())
                .filter(|a| !a.is_empty()),
        );
        self
    }

    /// Whether `word` (with or without its trailing period) is a known abbreviation.
    pub fn is_abbreviation(&self, word: &str) -> bool {
        let key = word.trim_end_matches('.').to_lowercase();
        !key.is_empty() && self.abbreviations.contains(&key)
    }

    /// Decide whether the terminator run `chars[term..end]` closes a sentence.
    fn is_boundary(&self, chars: &[char], term: usize, end: usize) -> bool {
        // "3.14", "example.com", "e.g.x": the run is glued to the next token
        if end < chars.len() && !chars[end].is_whitespace() {
            return false;
        }
        let Some(next) = chars[end..].iter().copied().find(|c| !c.is_whitespace()) else {
            return true;
        };

        let run = &chars[term..end];
        if run.iter().any(|&c| matches!(c, '!' | '?')) {
            return !next.is_lowercase();
        }

        let periods = run.iter().take_while(|&&c| c == '.').count();
        if periods >= 3 {
            return next.is_uppercase();
        }

        let word = word_before(chars, term);
        if self.is_abbreviation(&word) || is_initial(&word) {
            return false;
        }

        !next.is_lowercase()
    }
}

impl SentenceSplitter for PunctuationSplitter {
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            if !is_terminator(chars[i]) {
                i += 1;
                continue;
            }

            let mut end = i + 1;
            while end < chars.len() && is_terminator(chars[end]) {
                end += 1;
            }
            while end < chars.len() && is_closer(chars[end]) {
                end += 1;
            }

            if self.is_boundary(&chars, i, end) {
                push_sentence(&mut sentences, &chars[start..end]);
                start = end;
            }
            i = end;
        }

        push_sentence(&mut sentences, &chars[start..]);
        tracing::trace!(count = sentences.len(), "split sentences");
        sentences
    }
}

/// Extract words: maximal runs of Unicode word characters.
///
/// Punctuation and whitespace never belong to a word.
pub fn extract_words(sentence: &str) -> impl Iterator<Item = &str> {
    WORD_PATTERN.find_iter(sentence).map(|m| m.as_str())
}

/// Letter count of a word, in Unicode scalar values.
pub fn letter_count(word: &str) -> usize {
    word.chars().count()
}

const fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '…')
}

const fn is_closer(ch: char) -> bool {
    matches!(ch, '"' | '\'' | ')' | ']' | '}' | '”' | '’' | '»')
}

fn push_sentence(sentences: &mut Vec<String>, fragment: &[char]) {
    let sentence: String = fragment.iter().collect();
    let sentence = sentence.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}

/// The token immediately before `pos`, keeping inner periods ("e.g", "U.S").
fn word_before(chars: &[char], pos: usize) -> String {
    let begin = chars[..pos]
        .iter()
        .rposition(|c| !(c.is_alphanumeric() || *c == '.'))
        .map_or(0, |p| p + 1);
    chars[begin..pos].iter().collect()
}

/// Single capitals ("J") and dotted capital runs ("U.S", "J.R.R").
fn is_initial(word: &str) -> bool {
    !word.is_empty()
        && word.split('.').all(|part| {
            let mut it = part.chars();
            matches!((it.next(), it.next()), (Some(c), None) if c.is_uppercase())
        })
}
