//! Core library for readability-score.
//!
//! Computes the raw statistics readability formulas are built from:
//! sentence, word, letter, syllable, polysyllable and simple-word counts,
//! plus words per sentence, syllables per word, letters per word and
//! sentences per word.
//!
//! # Modules
//!
//! - [`scores`] - The text scorer and its result record
//! - [`text`] - Sentence splitting and word extraction
//! - [`hyphenation`] - Syllable splitting with Liang hyphenation patterns
//! - [`resolver`] - Locale to hyphenation dictionary resolution and caching
//! - [`word_list`] - Simple-word lists
//! - [`markdown`] - Markdown to prose reduction
//! - [`age`] - US grade to reader age
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use readability_score_core::{ScoreRequest, TextScorer};
//!
//! let scorer = TextScorer::default();
//! let result = scorer
//!     .score(&ScoreRequest::new("The cat sat on the mat.", "en_GB"))
//!     .expect("hyphenation dictionary for en_GB");
//!
//! println!("{} syllables per word", result.syllables_per_word);
//! ```
#![deny(unsafe_code)]

pub mod age;
pub mod config;
pub mod error;
pub mod hyphenation;
pub mod markdown;
pub mod resolver;
pub mod scores;
pub mod text;
pub mod word_list;

pub use age::minimum_age_from_us_grade;
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, ScoreError, ScoringResult};
pub use hyphenation::{PatternHyphenator, SyllableSplitter};
pub use resolver::{CachedProvider, DictionaryResolver, SharedSplitter, SyllableProvider};
pub use scores::{ScoreRequest, ScoreResult, TextScorer};
pub use text::{PunctuationSplitter, SentenceSplitter};
pub use word_list::SimpleWordList;

/// Default maximum input size: 5 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
