//! Error types for readability-score-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while scoring text.
#[derive(Error, Debug)]
pub enum ScoreError {
    /// No syllable-splitting resource exists for the requested locale.
    #[error("no hyphenation dictionary for locale {locale:?} (searched: {searched})")]
    ResourceUnavailable {
        /// The locale that was requested.
        locale: String,
        /// Human-readable list of the locations that were tried.
        searched: String,
    },

    /// A hyphenation dictionary exists but could not be read.
    #[error("failed to read hyphenation dictionary {path}")]
    DictionaryIo {
        /// Path of the dictionary file.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A hyphenation dictionary is malformed.
    #[error("malformed hyphenation dictionary {path} (line {line}): {message}")]
    DictionaryParse {
        /// Path of the dictionary file (or `<memory>` for in-memory patterns).
        path: Utf8PathBuf,
        /// 1-based line number of the offending line.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// A simple-word list could not be read.
    #[error("failed to read word list {path}")]
    WordListIo {
        /// Path of the word list.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The text produced no sentences or no words, so the averages are undefined.
    #[error("no scorable text in input ({sentences} sentences, {words} words)")]
    EmptyInput {
        /// Sentences found after sampling.
        sentences: usize,
        /// Words found across those sentences.
        words: usize,
    },
}

/// Result type alias using [`ScoreError`].
pub type ScoringResult<T> = Result<T, ScoreError>;
