//! Syllables command: hyphenate individual words.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use readability_score_core::config::Config;
use readability_score_core::{SyllableProvider, SyllableSplitter};

use super::build_scorer;

/// Arguments for the `syllables` subcommand.
#[derive(Args, Debug)]
pub struct SyllablesArgs {
    /// Words to hyphenate.
    #[arg(required = true)]
    pub words: Vec<String>,

    /// Hyphenation locale (e.g. en_GB, en_US, de_DE).
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Extra directory searched for hyphenation dictionaries (repeatable).
    #[arg(long = "dict-dir", value_name = "DIR")]
    pub dict_dirs: Vec<Utf8PathBuf>,
}

/// One hyphenated word.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WordSyllables {
    /// The word as given.
    pub word: String,
    /// The word with `-` at each syllable boundary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hyphenated: Option<String>,
    /// Syllable count (boundaries + 1).
    pub syllables: usize,
}

/// Count syllables for each word with the given splitter.
pub fn count_words<S: AsRef<str>>(
    words: &[S],
    splitter: &dyn SyllableSplitter,
) -> Vec<WordSyllables> {
    words
        .iter()
        .map(|w| WordSyllables {
            word: w.as_ref().to_string(),
            hyphenated: splitter.hyphenated(w.as_ref(), '-'),
            syllables: splitter.syllables(w.as_ref()),
        })
        .collect()
}

/// Print syllable counts for the given words.
#[instrument(name = "cmd_syllables", skip_all, fields(words = args.words.len()))]
pub fn cmd_syllables(args: SyllablesArgs, global_json: bool, config: &Config) -> anyhow::Result<()> {
    let locale = args.locale.as_deref().unwrap_or(&config.locale);
    debug!(%locale, "executing syllables command");

    let scorer = build_scorer(config, &args.dict_dirs);
    let splitter = scorer
        .syllable_provider()
        .splitter(locale)
        .with_context(|| format!("cannot count syllables for locale {locale}"))?;

    let counts = count_words(&args.words, splitter.as_ref());

    if global_json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else {
        for entry in &counts {
            let shown = entry.hyphenated.as_deref().unwrap_or(&entry.word);
            println!("{:<24} {}", shown.bold(), entry.syllables.cyan());
        }
    }

    Ok(())
}
