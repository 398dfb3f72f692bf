//! Syllable splitting via hyphenation patterns.
//!
//! [`SyllableSplitter`] is the capability the scorer consumes. The
//! [`PatternHyphenator`] implementation applies Liang's algorithm to the
//! pattern dictionaries shipped as `hyph_<locale>.dic` by LibreOffice,
//! Hunspell and friends.
//!
//! # Dictionary format
//!
//! ```text
//! UTF-8
//! LEFTHYPHENMIN 2
//! RIGHTHYPHENMIN 3
//! % comment
//! .ab4i
//! hy3ph
//! ```
//!
//! The first line names the charset, any label `encoding_rs` knows
//! (`UTF-8`, `ISO8859-1`, `ISO8859-2`, `KOI8-R`, ...). Every other
//! non-comment line holds one or more patterns: letters interleaved with
//! digits, where odd digits allow a break and even digits forbid one.
//!
//! Keyword lines are skipped, `LEFTHYPHENMIN`/`RIGHTHYPHENMIN` included:
//! breaks keep two characters on each side unless the caller asks for
//! other minimums with [`PatternHyphenator::with_minimums`].

use std::collections::HashMap;
use std::fmt;

use camino::Utf8Path;
use encoding_rs::{Encoding, UTF_8};

use crate::error::{ScoreError, ScoringResult};

/// Default minimum number of characters before the first break.
const DEFAULT_LEFT_MIN: usize = 2;
/// Default minimum number of characters after the last break.
const DEFAULT_RIGHT_MIN: usize = 2;

/// Capability: count syllable boundaries within a single word.
pub trait SyllableSplitter: Send + Sync {
    /// Number of syllable boundaries detected in `word`.
    fn boundaries(&self, word: &str) -> usize;

    /// Number of syllables in `word`: boundaries plus one.
    fn syllables(&self, word: &str) -> usize {
        self.boundaries(word) + 1
    }

    /// `word` with `hyphen` at each boundary, when the splitter can say where they are.
    fn hyphenated(&self, _word: &str, _hyphen: char) -> Option<String> {
        None
    }
}

/// Liang hyphenator backed by a pattern dictionary.
#[derive(Clone)]
pub struct PatternHyphenator {
    /// Pattern letters -> (offset of first non-zero slot, slot values from there).
    patterns: HashMap<String, (usize, Vec<u8>)>,
    /// Longest pattern, in chars.
    max_len: usize,
    left_min: usize,
    right_min: usize,
}

impl fmt::Debug for PatternHyphenator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternHyphenator")
            .field("patterns", &self.patterns.len())
            .field("max_len", &self.max_len)
            .field("left_min", &self.left_min)
            .field("right_min", &self.right_min)
            .finish()
    }
}

impl PatternHyphenator {
    /// Load a dictionary file, honouring the charset named on its first line.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn from_path(path: &Utf8Path) -> ScoringResult<Self> {
        let bytes = std::fs::read(path.as_std_path()).map_err(|source| ScoreError::DictionaryIo {
            path: path.to_path_buf(),
            source,
        })?;
        let hyphenator = Self::from_bytes(&bytes, path)?;
        tracing::debug!(patterns = hyphenator.patterns.len(), "loaded hyphenation dictionary");
        Ok(hyphenator)
    }

    /// Parse raw dictionary bytes. `origin` is only used in error messages.
    pub fn from_bytes(bytes: &[u8], origin: &Utf8Path) -> ScoringResult<Self> {
        let header_end = bytes.iter().position(|&b| b == b'\n').unwrap_or(bytes.len());
        let header = String::from_utf8_lossy(&bytes[..header_end]);
        let charset = header.trim().trim_start_matches("charset ").trim();

        let encoding = Encoding::for_label(charset.as_bytes())
            .ok_or_else(|| parse_error(origin, 1, &format!("unsupported charset {charset:?}")))?;
        let text = encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| {
                let line = if encoding == UTF_8 {
                    std::str::from_utf8(bytes)
                        .err()
                        .map_or(0, |e| line_of(bytes, e.valid_up_to()))
                } else {
                    0
                };
                parse_error(origin, line, &format!("invalid {} data", encoding.name()))
            })?;

        Self::parse_body(text.lines().enumerate().skip(1), origin)
    }

    /// Parse patterns from already-decoded text that has no charset line.
    ///
    /// Handy for embedding small pattern sets.
    pub fn from_patterns(patterns: &str) -> ScoringResult<Self> {
        Self::parse_body(patterns.lines().enumerate(), Utf8Path::new("<memory>"))
    }

    fn parse_body<'a>(
        lines: impl Iterator<Item = (usize, &'a str)>,
        origin: &Utf8Path,
    ) -> ScoringResult<Self> {
        let mut hyphenator = Self {
            patterns: HashMap::new(),
            max_len: 0,
            left_min: DEFAULT_LEFT_MIN,
            right_min: DEFAULT_RIGHT_MIN,
        };

        for (idx, raw) in lines {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('%') || line.starts_with('#') {
                continue;
            }

            // minimums from the file are ignored; see with_minimums
            if line.split_whitespace().next().is_some_and(is_keyword) {
                continue;
            }

            for token in line.split_whitespace() {
                let decoded = decode_hex_escapes(token)
                    .ok_or_else(|| parse_error(origin, idx + 1, "bad ^^ escape"))?;
                // non-standard hyphenation: keep the pattern, drop the replacement
                let pattern = decoded.split('/').next().unwrap_or_default();
                hyphenator.insert(pattern);
            }
        }

        if hyphenator.patterns.is_empty() {
            return Err(parse_error(origin, 0, "no hyphenation patterns"));
        }
        Ok(hyphenator)
    }

    fn insert(&mut self, pattern: &str) {
        let mut letters = String::with_capacity(pattern.len());
        let mut values = vec![0u8];
        for ch in pattern.chars() {
            if let Some(digit) = ch.to_digit(10) {
                if let Some(slot) = values.last_mut() {
                    *slot = u8::try_from(digit).unwrap_or(0);
                }
            } else {
                letters.push(ch);
                values.push(0);
            }
        }

        let Some(start) = values.iter().position(|&v| v != 0) else {
            return;
        };
        let end = values.iter().rposition(|&v| v != 0).map_or(start, |e| e + 1);

        self.max_len = self.max_len.max(letters.chars().count());
        self.patterns
            .insert(letters, (start, values[start..end].to_vec()));
    }

    /// Override the 2/2 break minimums.
    #[must_use]
    pub const fn with_minimums(mut self, left: usize, right: usize) -> Self {
        self.left_min = left;
        self.right_min = right;
        self
    }

    /// Minimum characters kept before the first break.
    pub const fn left_min(&self) -> usize {
        self.left_min
    }

    /// Minimum characters kept after the last break.
    pub const fn right_min(&self) -> usize {
        self.right_min
    }

    /// Number of distinct patterns loaded.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Character offsets in `word` where a hyphen may be inserted.
    pub fn positions(&self, word: &str) -> Vec<usize> {
        let lower = word.to_lowercase();
        let prepared: Vec<char> = std::iter::once('.')
            .chain(lower.chars())
            .chain(std::iter::once('.'))
            .collect();
        let n = prepared.len();
        let mut slots = vec![0u8; n + 1];

        for i in 0..n.saturating_sub(1) {
            let mut key = String::new();
            for j in i + 1..=(i + self.max_len).min(n) {
                key.push(prepared[j - 1]);
                if let Some((offset, values)) = self.patterns.get(&key) {
                    for (k, &value) in values.iter().enumerate() {
                        let slot = &mut slots[i + offset + k];
                        *slot = (*slot).max(value);
                    }
                }
            }
        }

        let Some(last) = (n - 2).checked_sub(self.right_min) else {
            return Vec::new();
        };
        slots
            .iter()
            .enumerate()
            .filter(|(_, v)| *v % 2 == 1)
            .filter_map(|(slot, _)| slot.checked_sub(1))
            .filter(|&pos| self.left_min <= pos && pos <= last)
            .collect()
    }

    /// Render `word` with `hyphen` inserted at every break position.
    pub fn inserted(&self, word: &str, hyphen: char) -> String {
        let mut chars: Vec<char> = word.chars().collect();
        for pos in self.positions(word).into_iter().rev() {
            if pos <= chars.len() {
                chars.insert(pos, hyphen);
            }
        }
        chars.into_iter().collect()
    }
}

impl SyllableSplitter for PatternHyphenator {
    fn boundaries(&self, word: &str) -> usize {
        self.positions(word).len()
    }

    fn hyphenated(&self, word: &str, hyphen: char) -> Option<String> {
        Some(self.inserted(word, hyphen))
    }
}

/// Uppercase directive lines such as `LEFTHYPHENMIN` or `NEXTLEVEL`.
fn is_keyword(token: &str) -> bool {
    token.len() > 1 && token.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

/// Replace TeX-style `^^hh` escapes with the character they encode.
fn decode_hex_escapes(token: &str) -> Option<String> {
    if !token.contains("^^") {
        return Some(token.to_string());
    }
    let mut out = String::with_capacity(token.len());
    let mut rest = token;
    while let Some(idx) = rest.find("^^") {
        out.push_str(&rest[..idx]);
        let hex = rest.get(idx + 2..idx + 4)?;
        let code = u32::from_str_radix(hex, 16).ok()?;
        out.push(char::from_u32(code)?);
        rest = &rest[idx + 4..];
    }
    out.push_str(rest);
    Some(out)
}

fn line_of(bytes: &[u8], offset: usize) -> usize {
    bytes[..offset].iter().filter(|&&b| b == b'\n').count() + 1
}

fn parse_error(origin: &Utf8Path, line: usize, message: &str) -> ScoreError {
    ScoreError::DictionaryParse {
        path: origin.to_path_buf(),
        line,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Liang's worked example patterns for "hyphenation".
    const LIANG: &str = "hy3ph\nhe2n\nhena4\nhen5at\n1na\nn2at\n1tio\n2io\no2n\n";

    fn liang() -> PatternHyphenator {
        PatternHyphenator::from_patterns(LIANG).unwrap()
    }

    #[test]
    fn liang_example() {
        let h = liang();
        assert_eq!(h.positions("hyphenation"), vec![2, 6]);
        assert_eq!(h.inserted("hyphenation", '-'), "hy-phen-ation");
        assert_eq!(h.boundaries("hyphenation"), 2);
        assert_eq!(h.syllables("hyphenation"), 3);
    }

    #[test]
    fn case_insensitive_matching_preserves_original_case() {
        let h = liang();
        assert_eq!(h.inserted("Hyphenation", '-'), "Hy-phen-ation");
    }

    #[test]
    fn no_match_means_one_syllable() {
        let h = liang();
        assert_eq!(h.boundaries("cat"), 0);
        assert_eq!(h.syllables("cat"), 1);
    }

    #[test]
    fn hyphen_minimums_are_respected() {
        // "1b" would allow a break before every b
        let h = PatternHyphenator::from_patterns("1b\n").unwrap();
        // a|b|b|b|b, breaks at 1..=4; left 2 and right 2 keep only 2 and 3
        assert_eq!(h.positions("abbbb"), vec![2, 3]);
        assert!(h.positions("ab").is_empty());
    }

    #[test]
    fn dictionary_minimums_are_ignored() {
        let dict = b"UTF-8\nLEFTHYPHENMIN 1\nRIGHTHYPHENMIN 1\n% comment\n1b\n";
        let h = PatternHyphenator::from_bytes(dict, Utf8Path::new("hyph_xx.dic")).unwrap();
        assert_eq!(h.left_min(), 2);
        assert_eq!(h.right_min(), 2);
        assert_eq!(h.positions("abbbb"), vec![2, 3]);
    }

    #[test]
    fn two_letter_final_syllables_survive_righthyphenmin_3() {
        // LibreOffice's English dictionaries declare RIGHTHYPHENMIN 3
        let dict = b"UTF-8\nLEFTHYPHENMIN 2\nRIGHTHYPHENMIN 3\np1py\nm1i\ni1l\n";
        let h = PatternHyphenator::from_bytes(dict, Utf8Path::new("hyph_en_GB.dic")).unwrap();
        assert_eq!(h.inserted("happy", '-'), "hap-py");
        assert_eq!(h.syllables("happy"), 2);
        assert_eq!(h.inserted("family", '-'), "fam-i-ly");
        assert_eq!(h.syllables("family"), 3);
    }

    #[test]
    fn caller_minimums_apply() {
        let h = PatternHyphenator::from_patterns("1b\n").unwrap().with_minimums(1, 1);
        assert_eq!(h.positions("abbbb"), vec![1, 2, 3, 4]);

        let h = PatternHyphenator::from_patterns("p1py\n").unwrap().with_minimums(2, 3);
        assert_eq!(h.boundaries("happy"), 0);
    }

    #[test]
    fn latin1_dictionary_decodes() {
        // "1ß" encoded as ISO8859-1
        let dict = [b"ISO8859-1\n".as_slice(), &[b'1', 0xDF, b'\n']].concat();
        let h = PatternHyphenator::from_bytes(&dict, Utf8Path::new("hyph_de.dic")).unwrap();
        assert_eq!(h.positions("aaßaa"), vec![2]);
    }

    #[test]
    fn latin2_dictionary_decodes() {
        // "1ł" encoded as ISO8859-2, as hyph_pl_PL.dic ships
        let dict = [b"ISO8859-2\n".as_slice(), &[b'1', 0xB3, b'\n']].concat();
        let h = PatternHyphenator::from_bytes(&dict, Utf8Path::new("hyph_pl_PL.dic")).unwrap();
        assert_eq!(h.positions("aałaa"), vec![2]);
    }

    #[test]
    fn koi8r_dictionary_decodes() {
        // "1а" (Cyrillic a) encoded as KOI8-R
        let dict = [b"KOI8-R\n".as_slice(), &[b'1', 0xC1, b'\n']].concat();
        let h = PatternHyphenator::from_bytes(&dict, Utf8Path::new("hyph_ru_RU.dic")).unwrap();
        assert_eq!(h.positions("ббабб"), vec![2]);
    }

    #[test]
    fn invalid_utf8_reports_its_line() {
        let dict = [b"UTF-8\n1b\n".as_slice(), &[b'1', 0xFF, b'\n']].concat();
        let err = PatternHyphenator::from_bytes(&dict, Utf8Path::new("x.dic")).unwrap_err();
        assert!(matches!(err, ScoreError::DictionaryParse { line: 3, .. }));
    }

    #[test]
    fn charset_prefix_is_accepted() {
        let dict = b"charset UTF-8\n1b\n";
        assert!(PatternHyphenator::from_bytes(dict, Utf8Path::new("x.dic")).is_ok());
    }

    #[test]
    fn unsupported_charset_errors() {
        let dict = b"EBCDIC-037\n1b\n";
        let err = PatternHyphenator::from_bytes(dict, Utf8Path::new("x.dic")).unwrap_err();
        assert!(matches!(err, ScoreError::DictionaryParse { line: 1, .. }));
    }

    #[test]
    fn hex_escapes_decode() {
        let h = PatternHyphenator::from_patterns("1^^e9\n").unwrap();
        assert_eq!(h.positions("caféé"), vec![3]);
    }

    #[test]
    fn nonstandard_patterns_keep_pattern_part() {
        let h = PatternHyphenator::from_patterns("c1k/k=k,1,2\n").unwrap();
        assert_eq!(h.positions("backen"), vec![3]);
    }

    #[test]
    fn all_zero_patterns_are_dropped() {
        let err = PatternHyphenator::from_patterns("abc\n0x0\n").unwrap_err();
        assert!(matches!(err, ScoreError::DictionaryParse { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err =
            PatternHyphenator::from_path(Utf8Path::new("/nonexistent/hyph_zz.dic")).unwrap_err();
        assert!(matches!(err, ScoreError::DictionaryIo { .. }));
    }

    #[test]
    fn empty_word_has_no_boundaries() {
        assert_eq!(liang().boundaries(""), 0);
    }
}
