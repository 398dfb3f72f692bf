//! Simple-word lists.
//!
//! Some readability formulas (Dale-Chall, Spache) count how many words come
//! from a reference list of easy vocabulary. The list is caller-supplied;
//! this module only owns the set and its plain-text loading format.

use std::collections::HashSet;

use camino::Utf8Path;

use crate::error::{ScoreError, ScoringResult};

/// A set of lowercase "easy" words.
///
/// Membership tests are case-insensitive on the probe side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimpleWordList {
    words: HashSet<String>,
}

impl SimpleWordList {
    /// Parse one word per line. Blank lines and `#` comments are skipped,
    /// entries are trimmed and lowercased.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    /// Read a word list file (UTF-8).
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn from_path(path: &Utf8Path) -> ScoringResult<Self> {
        let text =
            std::fs::read_to_string(path.as_std_path()).map_err(|source| ScoreError::WordListIo {
                path: path.to_path_buf(),
                source,
            })?;
        let list = Self::parse(&text);
        tracing::debug!(words = list.len(), "loaded simple word list");
        Ok(list)
    }

    /// Whether `word` (any case) is on the list.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SimpleWordList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }
}
