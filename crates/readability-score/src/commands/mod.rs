//! Command implementations.

use std::io::Read;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use readability_score_core::config::Config;
use readability_score_core::{
    CachedProvider, DictionaryResolver, PunctuationSplitter, SimpleWordList, TextScorer,
};

pub mod age;
pub mod doctor;
pub mod info;
pub mod score;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod syllables;

/// Path argument meaning standard input.
pub const STDIN_PATH: &str = "-";

/// Read a file (or stdin for `-`) as raw bytes, enforcing the size limit.
///
/// Bytes are returned undecoded; UTF-8 validation happens once, in the
/// scoring request.
pub fn read_input(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<Vec<u8>> {
    if path.as_str() == STDIN_PATH {
        return read_stdin(max_bytes);
    }

    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    std::fs::read(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

fn read_stdin(max_bytes: Option<usize>) -> anyhow::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let stdin = std::io::stdin().lock();
    match max_bytes {
        Some(max) => {
            // one extra byte tells "exactly at the limit" from "over it"
            let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
            stdin
                .take(limit)
                .read_to_end(&mut buf)
                .context("failed to read stdin")?;
            if buf.len() > max {
                anyhow::bail!("input too large: stdin exceeds {max} bytes");
            }
        }
        None => {
            let mut stdin = stdin;
            stdin.read_to_end(&mut buf).context("failed to read stdin")?;
        }
    }
    Ok(buf)
}

/// Build a scorer from configuration.
///
/// `extra_dirs` are searched before the configured dictionary directories.
pub fn build_scorer(config: &Config, extra_dirs: &[Utf8PathBuf]) -> TextScorer {
    let resolver = if extra_dirs.is_empty() {
        config.dictionary_resolver()
    } else {
        DictionaryResolver::new(
            extra_dirs
                .iter()
                .cloned()
                .chain(config.effective_dictionary_dirs()),
        )
    };
    let sentences = PunctuationSplitter::new().with_abbreviations(&config.abbreviations);
    TextScorer::new(sentences, CachedProvider::new(resolver))
}

/// Load the simple-word list named on the command line or in config.
pub fn load_simple_words(
    cli_path: Option<&Utf8Path>,
    config: &Config,
) -> anyhow::Result<Option<SimpleWordList>> {
    let Some(path) = cli_path.or(config.simple_words.as_deref()) else {
        return Ok(None);
    };
    let list = SimpleWordList::from_path(path)
        .with_context(|| format!("failed to load simple-word list {path}"))?;
    tracing::debug!(%path, words = list.len(), "loaded simple-word list");
    Ok(Some(list))
}
