//! Property-based invariant tests for text scoring.
//!
//! 1. polysyllable and simple-word counts never exceed the word count
//! 2. syllables per word is at least one
//! 3. the averages agree with the raw counts
//! 4. scoring the same text twice gives the same result
//! 5. sampled texts over the threshold score exactly thirty sentences
//! 6. hyphenation never places a break inside the edge minimums

use std::sync::Arc;

use proptest::prelude::*;
use readability_score_core::scores::{self, SAMPLE_THRESHOLD};
use readability_score_core::{
    PatternHyphenator, PunctuationSplitter, ScoreError, ScoreRequest, ScoringResult,
    SharedSplitter, SimpleWordList, SyllableProvider, SyllableSplitter, TextScorer,
};

/// Breaks after every vowel, subject to the 2/2 edge minimums.
const VOWEL_PATTERNS: &str = "a1\ne1\ni1\no1\nu1\ny1\n";

struct PatternProvider(SharedSplitter);

impl PatternProvider {
    fn new() -> Self {
        let hyphenator = PatternHyphenator::from_patterns(VOWEL_PATTERNS).expect("valid patterns");
        Self(Arc::new(hyphenator))
    }
}

impl SyllableProvider for PatternProvider {
    fn splitter(&self, locale: &str) -> ScoringResult<SharedSplitter> {
        if locale == "xx" {
            Ok(Arc::clone(&self.0))
        } else {
            Err(ScoreError::ResourceUnavailable {
                locale: locale.to_string(),
                searched: String::new(),
            })
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn arb_word() -> impl Strategy<Value = String> {
    "[a-z]{1,12}"
}

fn arb_sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_word(), 1..10).prop_map(|words| {
        let mut sentence = words.join(" ");
        if let Some(first) = sentence.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        sentence.push('.');
        sentence
    })
}

fn arb_text(max_sentences: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(arb_sentence(), 1..max_sentences).prop_map(|s| s.join(" "))
}

fn scorer() -> TextScorer<PunctuationSplitter, PatternProvider> {
    TextScorer::new(PunctuationSplitter::new(), PatternProvider::new())
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. count relationships
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn counts_are_bounded_by_word_count(
        text in arb_text(20),
        simple in prop::collection::vec(arb_word(), 0..20),
    ) {
        let list: SimpleWordList = simple.iter().collect();
        let result = scorer()
            .score(&ScoreRequest::new(&text, "xx").with_simple_words(Some(&list)))
            .expect("non-empty text scores");

        prop_assert!(result.polysyllable_count <= result.word_count);
        prop_assert!(result.simple_word_count <= result.word_count);
        prop_assert!(result.syllable_count >= result.word_count);
        prop_assert!(result.syllables_per_word >= 1.0);
    }

    #[test]
    fn averages_match_counts(text in arb_text(20)) {
        let r = scorer()
            .score(&ScoreRequest::new(&text, "xx"))
            .expect("non-empty text scores");

        let words = r.word_count as f64;
        let sentences = r.sentence_count as f64;
        prop_assert!((r.words_per_sentence - words / sentences).abs() < 1e-9);
        prop_assert!((r.sentences_per_word - sentences / words).abs() < 1e-9);
        prop_assert!((r.letters_per_word - r.letter_count as f64 / words).abs() < 1e-9);
        prop_assert!((r.words_per_sentence * r.sentences_per_word - 1.0).abs() < 1e-9);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn scoring_is_deterministic(text in arb_text(40), sample in any::<bool>()) {
        let scorer = scorer();
        let request = ScoreRequest::new(&text, "xx").with_sampling(sample);
        let first = scorer.score(&request).expect("scores");
        let second = scorer.score(&request).expect("scores");
        prop_assert_eq!(first, second);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. sampling
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn sampled_long_text_scores_thirty_sentences(n in (SAMPLE_THRESHOLD + 1)..200usize) {
        let sentences: Vec<String> = (0..n).map(|i| format!("word{i} here")).collect();
        let splitter = PatternHyphenator::from_patterns(VOWEL_PATTERNS).expect("valid patterns");
        let result = scores::score_sentences(&sentences, &splitter, None, true)
            .expect("scores");
        prop_assert_eq!(result.sentence_count, 30);
        prop_assert_eq!(result.word_count, 60);
    }

    #[test]
    fn short_text_is_never_sampled(n in 1..=SAMPLE_THRESHOLD) {
        let sentences: Vec<String> = (0..n).map(|i| format!("word{i}")).collect();
        prop_assert_eq!(scores::sample(&sentences).len(), n);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. hyphenation edge minimums
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn breaks_respect_edge_minimums(word in "[a-z]{1,20}") {
        let hyphenator = PatternHyphenator::from_patterns(VOWEL_PATTERNS).expect("valid patterns");
        let len = word.chars().count();
        for pos in hyphenator.positions(&word) {
            prop_assert!(pos >= hyphenator.left_min());
            prop_assert!(pos <= len - hyphenator.right_min());
        }
        prop_assert_eq!(hyphenator.syllables(&word), hyphenator.boundaries(&word) + 1);
    }
}
