//! Text scoring: the raw counts and averages readability formulas consume.
//!
//! ```text
//! text ─► SentenceSplitter ─► (SMOG sample) ─► \w+ words ─► SyllableSplitter ─► ScoreResult
//! ```
//!
//! Formulas themselves (Flesch-Kincaid, SMOG, Coleman-Liau, ...) are left to
//! the caller; [`ScoreResult`] carries everything they need.

use std::ops::Range;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ScoreError, ScoringResult};
use crate::hyphenation::SyllableSplitter;
use crate::resolver::{CachedProvider, DictionaryResolver, SyllableProvider};
use crate::text::{self, PunctuationSplitter, SentenceSplitter};
use crate::word_list::SimpleWordList;

/// Sampling kicks in above this many sentences.
pub const SAMPLE_THRESHOLD: usize = 30;

/// Sentences taken from each of the beginning, middle and end.
pub const SAMPLE_SLICE: usize = 10;

/// Words with more syllables than this are polysyllabic.
const POLYSYLLABLE_MIN: usize = 2;

/// One scoring call's input.
#[derive(Debug, Clone, Copy)]
pub struct ScoreRequest<'a> {
    /// Text to score.
    pub text: &'a str,
    /// Locale selecting the syllable splitter (e.g. `en_GB`).
    pub locale: &'a str,
    /// Optional easy-vocabulary list; `None` or empty disables the count.
    pub simple_words: Option<&'a SimpleWordList>,
    /// Score a beginning/middle/end sample of long texts instead of all of it.
    pub sample_long_text: bool,
}

impl<'a> ScoreRequest<'a> {
    /// A request with no simple-word list and sampling off.
    pub const fn new(text: &'a str, locale: &'a str) -> Self {
        Self {
            text,
            locale,
            simple_words: None,
            sample_long_text: false,
        }
    }

    /// Decode `bytes` as UTF-8 once, up front, and build a request from it.
    ///
    /// # Errors
    ///
    /// [`ScoreError::Encoding`] if the bytes are not valid UTF-8.
    pub fn from_utf8(bytes: &'a [u8], locale: &'a str) -> ScoringResult<Self> {
        Ok(Self::new(std::str::from_utf8(bytes)?, locale))
    }

    /// Count words found in `list`.
    #[must_use]
    pub const fn with_simple_words(mut self, list: Option<&'a SimpleWordList>) -> Self {
        self.simple_words = list;
        self
    }

    /// Enable or disable long-text sampling.
    #[must_use]
    pub const fn with_sampling(mut self, enabled: bool) -> Self {
        self.sample_long_text = enabled;
        self
    }
}

/// Readability statistics for one text.
///
/// Serialized with the field names readability formula code conventionally
/// keys on (`sent_count`, `syll_count`, `wordlen_average`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreResult {
    /// Number of sentences scored (after sampling).
    #[serde(rename = "sent_count")]
    pub sentence_count: usize,
    /// Number of words.
    pub word_count: usize,
    /// Characters inside words; whitespace and punctuation excluded.
    pub letter_count: usize,
    /// Number of syllables.
    #[serde(rename = "syll_count")]
    pub syllable_count: usize,
    /// Words with more than two syllables.
    #[serde(rename = "polysyllword_count")]
    pub polysyllable_count: usize,
    /// Words found in the simple-word list.
    #[serde(rename = "simpleword_count")]
    pub simple_word_count: usize,
    /// Words per sentence.
    #[serde(rename = "sentlen_average")]
    pub words_per_sentence: f64,
    /// Syllables per word.
    #[serde(rename = "wordlen_average")]
    pub syllables_per_word: f64,
    /// Letters per word.
    #[serde(rename = "wordletter_average")]
    pub letters_per_word: f64,
    /// Sentences per word.
    #[serde(rename = "wordsent_average")]
    pub sentences_per_word: f64,
}

/// Orchestrates sentence splitting, syllable lookup and aggregation.
#[derive(Debug)]
pub struct TextScorer<S = PunctuationSplitter, P = CachedProvider<DictionaryResolver>> {
    sentences: S,
    syllables: P,
}

impl Default for TextScorer {
    fn default() -> Self {
        Self::new(
            PunctuationSplitter::new(),
            CachedProvider::new(DictionaryResolver::default()),
        )
    }
}

impl<S: SentenceSplitter, P: SyllableProvider> TextScorer<S, P> {
    /// Build a scorer from its two collaborators.
    pub const fn new(sentences: S, syllables: P) -> Self {
        Self {
            sentences,
            syllables,
        }
    }

    /// The sentence splitter in use.
    pub const fn sentence_splitter(&self) -> &S {
        &self.sentences
    }

    /// The syllable provider in use.
    pub const fn syllable_provider(&self) -> &P {
        &self.syllables
    }

    /// Score a text.
    ///
    /// The syllable splitter for the locale is acquired first, once, and
    /// reused for every word.
    ///
    /// # Errors
    ///
    /// - [`ScoreError::ResourceUnavailable`] (or a dictionary IO/parse error)
    ///   when the locale has no usable syllable resource.
    /// - [`ScoreError::EmptyInput`] when no sentences or no words are found.
    #[tracing::instrument(
        skip_all,
        fields(text_len = request.text.len(), locale = request.locale, sample = request.sample_long_text)
    )]
    pub fn score(&self, request: &ScoreRequest<'_>) -> ScoringResult<ScoreResult> {
        let splitter = self.syllables.splitter(request.locale)?;
        let sentences = self.sentences.split(request.text);
        tracing::debug!(sentences = sentences.len(), "split text");
        score_sentences(
            &sentences,
            splitter.as_ref(),
            request.simple_words,
            request.sample_long_text,
        )
    }
}

/// The three slices of a SMOG sample for `n` sentences, or `None` when
/// `n` does not exceed [`SAMPLE_THRESHOLD`].
///
/// Slices are `[0, 10)`, `[n/2 - 5, n/2 + 5)` and `[n - 10, n)`.
pub fn sample_ranges(n: usize) -> Option<[Range<usize>; 3]> {
    if n <= SAMPLE_THRESHOLD {
        return None;
    }
    let mid = n / 2;
    let half = SAMPLE_SLICE / 2;
    Some([
        0..SAMPLE_SLICE,
        mid - half..mid + half,
        n - SAMPLE_SLICE..n,
    ])
}

/// Select the SMOG sample from `sentences`.
///
/// The three slices are concatenated as they are: a sentence falling in two
/// slices would appear twice. Texts at or under the threshold come back whole.
pub fn sample<T>(sentences: &[T]) -> Vec<&T> {
    sample_ranges(sentences.len()).map_or_else(
        || sentences.iter().collect(),
        |ranges| {
            ranges
                .into_iter()
                .flat_map(|range| sentences[range].iter())
                .collect()
        },
    )
}

/// Score pre-split sentences with a given syllable splitter.
///
/// # Errors
///
/// [`ScoreError::EmptyInput`] when the (sampled) sentence list is empty or
/// contains no words.
pub fn score_sentences<T: AsRef<str>>(
    sentences: &[T],
    splitter: &dyn SyllableSplitter,
    simple_words: Option<&SimpleWordList>,
    sample_long_text: bool,
) -> ScoringResult<ScoreResult> {
    let selected: Vec<&T> = if sample_long_text {
        sample(sentences)
    } else {
        sentences.iter().collect()
    };
    if selected.len() != sentences.len() {
        tracing::debug!(
            total = sentences.len(),
            sampled = selected.len(),
            "sampled long text"
        );
    }

    let simple_words = simple_words.filter(|list| !list.is_empty());
    let mut tally = Tally {
        sentences: selected.len(),
        ..Tally::default()
    };

    for sentence in selected {
        for word in text::extract_words(sentence.as_ref()) {
            tally.add_word(word, splitter, simple_words);
        }
    }

    tally.finish()
}

/// Running counts for one scoring call.
#[derive(Debug, Default)]
struct Tally {
    sentences: usize,
    words: usize,
    letters: usize,
    syllables: usize,
    polysyllables: usize,
    simple_words: usize,
}

impl Tally {
    fn add_word(
        &mut self,
        word: &str,
        splitter: &dyn SyllableSplitter,
        simple_words: Option<&SimpleWordList>,
    ) {
        let syllables = splitter.syllables(word);
        self.words += 1;
        self.letters += text::letter_count(word);
        self.syllables += syllables;
        if syllables > POLYSYLLABLE_MIN {
            self.polysyllables += 1;
        }
        if simple_words.is_some_and(|list| list.contains(word)) {
            self.simple_words += 1;
        }
    }

    fn finish(self) -> ScoringResult<ScoreResult> {
        if self.sentences == 0 || self.words == 0 {
            return Err(ScoreError::EmptyInput {
                sentences: self.sentences,
                words: self.words,
            });
        }

        let sentences = self.sentences as f64;
        let words = self.words as f64;
        Ok(ScoreResult {
            sentence_count: self.sentences,
            word_count: self.words,
            letter_count: self.letters,
            syllable_count: self.syllables,
            polysyllable_count: self.polysyllables,
            simple_word_count: self.simple_words,
            words_per_sentence: words / sentences,
            syllables_per_word: self.syllables as f64 / words,
            letters_per_word: self.letters as f64 / words,
            sentences_per_word: sentences / words,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hyphenation::PatternHyphenator;
    use crate::resolver::SharedSplitter;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Splitter with hand-assigned boundary counts; unknown words have none.
    struct FixedSplitter(HashMap<&'static str, usize>);

    impl SyllableSplitter for FixedSplitter {
        fn boundaries(&self, word: &str) -> usize {
            self.0.get(word.to_lowercase().as_str()).copied().unwrap_or(0)
        }
    }

    fn fixed(entries: &[(&'static str, usize)]) -> FixedSplitter {
        FixedSplitter(entries.iter().copied().collect())
    }

    /// Provider that only knows `en`.
    struct FixedProvider;

    impl SyllableProvider for FixedProvider {
        fn splitter(&self, locale: &str) -> ScoringResult<SharedSplitter> {
            if locale != "en" {
                return Err(ScoreError::ResourceUnavailable {
                    locale: locale.to_string(),
                    searched: "<fixed>".to_string(),
                });
            }
            Ok(Arc::new(fixed(&[
                ("readability", 4),
                ("sentence", 1),
                ("another", 2),
            ])))
        }
    }

    /// One sentence per line.
    struct LineSplitter;

    impl SentenceSplitter for LineSplitter {
        fn split(&self, text: &str) -> Vec<String> {
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect()
        }
    }

    fn scorer() -> TextScorer<PunctuationSplitter, FixedProvider> {
        TextScorer::new(PunctuationSplitter::new(), FixedProvider)
    }

    fn numbered_lines(n: usize) -> String {
        (0..n).map(|i| format!("w{i}\n")).collect()
    }

    #[test]
    fn single_word_without_boundaries() {
        let result = scorer().score(&ScoreRequest::new("Strengths.", "en")).unwrap();
        assert_eq!(result.sentence_count, 1);
        assert_eq!(result.word_count, 1);
        assert_eq!(result.syllable_count, 1);
        assert_eq!(result.letter_count, 9);
        assert_eq!(result.syllables_per_word, 1.0);
        assert_eq!(result.letters_per_word, 9.0);
        assert_eq!(result.words_per_sentence, 1.0);
        assert_eq!(result.sentences_per_word, 1.0);
    }

    #[test]
    fn counts_and_averages() {
        let text = "Readability is a sentence. Another one!";
        let result = scorer().score(&ScoreRequest::new(text, "en")).unwrap();
        assert_eq!(result.sentence_count, 2);
        assert_eq!(result.word_count, 6);
        // readability 5, is 1, a 1, sentence 2, another 3, one 1
        assert_eq!(result.syllable_count, 13);
        assert_eq!(result.polysyllable_count, 2);
        assert_eq!(result.letter_count, 11 + 2 + 1 + 8 + 7 + 3);
        assert_eq!(result.words_per_sentence, 3.0);
        assert!((result.syllables_per_word - 13.0 / 6.0).abs() < f64::EPSILON);
        assert!((result.sentences_per_word - 2.0 / 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn punctuation_is_not_counted_as_letters() {
        let result = scorer()
            .score(&ScoreRequest::new("Well, well... (well)!", "en"))
            .unwrap();
        assert_eq!(result.word_count, 3);
        assert_eq!(result.letter_count, 12);
    }

    #[test]
    fn simple_words_match_case_insensitively() {
        let list: SimpleWordList = ["the", "cat"].into_iter().collect();
        let request = ScoreRequest::new("The cat sat.", "en").with_simple_words(Some(&list));
        let result = scorer().score(&request).unwrap();
        assert_eq!(result.simple_word_count, 2);
    }

    #[test]
    fn simple_words_disabled_without_list() {
        let result = scorer().score(&ScoreRequest::new("The cat sat.", "en")).unwrap();
        assert_eq!(result.simple_word_count, 0);

        let empty = SimpleWordList::default();
        let request = ScoreRequest::new("The cat sat.", "en").with_simple_words(Some(&empty));
        assert_eq!(scorer().score(&request).unwrap().simple_word_count, 0);
    }

    #[test]
    fn unknown_locale_is_resource_unavailable() {
        let err = scorer()
            .score(&ScoreRequest::new("Some text.", "xx"))
            .unwrap_err();
        assert!(matches!(err, ScoreError::ResourceUnavailable { .. }));
    }

    #[test]
    fn empty_text_is_empty_input() {
        let err = scorer().score(&ScoreRequest::new("", "en")).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::EmptyInput {
                sentences: 0,
                words: 0
            }
        ));
    }

    #[test]
    fn text_without_words_is_empty_input() {
        // one sentence, zero words: every ratio would divide by zero
        let err = scorer().score(&ScoreRequest::new("?!", "en")).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::EmptyInput {
                sentences: 1,
                words: 0
            }
        ));
    }

    #[test]
    fn invalid_utf8_fails_before_scoring() {
        let err = ScoreRequest::from_utf8(&[0x66, 0x6f, 0xff], "en").unwrap_err();
        assert!(matches!(err, ScoreError::Encoding(_)));
    }

    #[test]
    fn utf8_bytes_decode_once() {
        let request = ScoreRequest::from_utf8("Café au lait.".as_bytes(), "en").unwrap();
        let result = scorer().score(&request).unwrap();
        assert_eq!(result.word_count, 3);
        assert_eq!(result.letter_count, 4 + 2 + 4);
    }

    #[test]
    fn sample_ranges_for_31() {
        assert_eq!(sample_ranges(31), Some([0..10, 10..20, 21..31]));
    }

    #[test]
    fn sample_ranges_for_60() {
        assert_eq!(sample_ranges(60), Some([0..10, 25..35, 50..60]));
    }

    #[test]
    fn no_sample_at_or_below_threshold() {
        assert_eq!(sample_ranges(30), None);
        assert_eq!(sample_ranges(0), None);
        let items: Vec<usize> = (0..30).collect();
        assert_eq!(sample(&items).len(), 30);
    }

    #[test]
    fn sample_slices_are_disjoint_above_threshold() {
        // The slices are concatenated without de-duplication. With a 10-wide
        // middle slice they cannot overlap for any n > 30, so nothing is ever
        // double counted in practice; this pins that down.
        for n in 31..500 {
            let [first, middle, last] = sample_ranges(n).unwrap();
            assert!(first.end <= middle.start, "n={n}");
            assert!(middle.end <= last.start, "n={n}");
            let items: Vec<usize> = (0..n).collect();
            assert_eq!(sample(&items).len(), 3 * SAMPLE_SLICE, "n={n}");
        }
    }

    #[test]
    fn sample_keeps_slice_order() {
        let items: Vec<usize> = (0..60).collect();
        let picked: Vec<usize> = sample(&items).into_iter().copied().collect();
        let expected: Vec<usize> = (0..10).chain(25..35).chain(50..60).collect();
        assert_eq!(picked, expected);
    }

    #[test]
    fn sampling_through_the_scorer() {
        let scorer = TextScorer::new(LineSplitter, FixedProvider);
        let text = numbered_lines(31);

        let full = scorer.score(&ScoreRequest::new(&text, "en")).unwrap();
        assert_eq!(full.sentence_count, 31);

        let sampled = scorer
            .score(&ScoreRequest::new(&text, "en").with_sampling(true))
            .unwrap();
        assert_eq!(sampled.sentence_count, 30);
        assert_eq!(sampled.word_count, 30);

        // w15 sits in the middle slice; w20 falls between middle and last
        let middle: SimpleWordList = ["w15"].into_iter().collect();
        let gap: SimpleWordList = ["w20"].into_iter().collect();
        let request = ScoreRequest::new(&text, "en").with_sampling(true);
        assert_eq!(
            scorer
                .score(&request.with_simple_words(Some(&middle)))
                .unwrap()
                .simple_word_count,
            1
        );
        assert_eq!(
            scorer
                .score(&request.with_simple_words(Some(&gap)))
                .unwrap()
                .simple_word_count,
            0
        );
    }

    #[test]
    fn sampling_is_a_no_op_for_short_texts() {
        let scorer = TextScorer::new(LineSplitter, FixedProvider);
        let text = numbered_lines(30);
        let result = scorer
            .score(&ScoreRequest::new(&text, "en").with_sampling(true))
            .unwrap();
        assert_eq!(result.sentence_count, 30);
    }

    #[test]
    fn scoring_is_idempotent() {
        let scorer = scorer();
        let list: SimpleWordList = ["a", "is"].into_iter().collect();
        let request = ScoreRequest::new("Readability is a sentence. Another one!", "en")
            .with_simple_words(Some(&list));
        let first = scorer.score(&request).unwrap();
        let second = scorer.score(&request).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn pattern_hyphenator_drives_syllables() {
        let hyphenator =
            PatternHyphenator::from_patterns("hy3ph\nhe2n\nhena4\nhen5at\n1na\nn2at\n1tio\n2io\no2n\n")
                .unwrap();
        let result = score_sentences(&["Hyphenation rules."], &hyphenator, None, false).unwrap();
        assert_eq!(result.word_count, 2);
        assert_eq!(result.syllable_count, 3 + 1);
        assert_eq!(result.polysyllable_count, 1);
    }

    #[test]
    fn serializes_with_conventional_keys() {
        let result = score_sentences(&["The cat sat."], &fixed(&[]), None, false).unwrap();
        let json = serde_json::to_value(result).unwrap();
        for key in [
            "sent_count",
            "word_count",
            "letter_count",
            "syll_count",
            "polysyllword_count",
            "simpleword_count",
            "sentlen_average",
            "wordlen_average",
            "wordletter_average",
            "wordsent_average",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}
