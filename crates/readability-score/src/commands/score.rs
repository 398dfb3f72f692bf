//! Score command: raw readability statistics for a file or stdin.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use readability_score_core::config::Config;
use readability_score_core::{ScoreRequest, ScoreResult, markdown};

use super::{STDIN_PATH, build_scorer, load_simple_words, read_input};

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// File to score (`-` reads stdin).
    #[arg(default_value = STDIN_PATH)]
    pub file: Utf8PathBuf,

    /// Hyphenation locale (e.g. en_GB, en_US, de_DE).
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Simple-word list, one word per line.
    #[arg(long, value_name = "FILE")]
    pub simple_words: Option<Utf8PathBuf>,

    /// Score a 30-sentence sample (start, middle, end) of long texts.
    #[arg(long, overrides_with = "no_sample")]
    pub sample: bool,

    /// Score every sentence, even when config enables sampling.
    #[arg(long, overrides_with = "sample")]
    pub no_sample: bool,

    /// Extra directory searched for hyphenation dictionaries (repeatable).
    #[arg(long = "dict-dir", value_name = "DIR")]
    pub dict_dirs: Vec<Utf8PathBuf>,

    /// Treat input as markdown (implied for .md files).
    #[arg(long)]
    pub markdown: bool,
}

impl ScoreArgs {
    fn is_markdown(&self) -> bool {
        self.markdown || matches!(self.file.extension(), Some("md" | "markdown"))
    }

    /// Flags win over the configured `sample_long_text`.
    const fn sampling(&self, configured: bool) -> bool {
        if self.no_sample {
            false
        } else {
            self.sample || configured
        }
    }
}

/// Score a file and print its statistics.
#[instrument(name = "cmd_score", skip_all, fields(file = %args.file))]
pub fn cmd_score(
    args: ScoreArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let locale = args.locale.as_deref().unwrap_or(&config.locale);
    let sample = args.sampling(config.sample_long_text);
    let strip_md = args.is_markdown();
    debug!(%locale, sample, strip_md, "executing score command");

    let bytes = read_input(&args.file, max_input_bytes)?;
    let simple_words = load_simple_words(args.simple_words.as_deref(), config)?;
    let scorer = build_scorer(config, &args.dict_dirs);

    let request = ScoreRequest::from_utf8(&bytes, locale)
        .with_context(|| format!("{} is not valid UTF-8", args.file))?;
    let prose;
    let request = if strip_md {
        prose = markdown::to_prose(request.text);
        ScoreRequest {
            text: &prose,
            ..request
        }
    } else {
        request
    };
    let request = request
        .with_simple_words(simple_words.as_ref())
        .with_sampling(sample);

    let result = scorer
        .score(&request)
        .with_context(|| format!("failed to score {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&args.file, locale, &result, simple_words.is_some());
    }

    Ok(())
}

fn print_result(file: &Utf8Path, locale: &str, result: &ScoreResult, with_simple: bool) {
    let name = if file.as_str() == STDIN_PATH {
        "<stdin>"
    } else {
        file.as_str()
    };
    println!("{} ({})", name.bold(), locale.dimmed());

    let counts: [(&str, usize); 5] = [
        ("Sentences", result.sentence_count),
        ("Words", result.word_count),
        ("Letters", result.letter_count),
        ("Syllables", result.syllable_count),
        ("Polysyllables", result.polysyllable_count),
    ];
    for (label, value) in counts {
        println!("  {:<20} {:>10}", label.dimmed(), value);
    }
    if with_simple {
        println!("  {:<20} {:>10}", "Simple words".dimmed(), result.simple_word_count);
    }

    let averages: [(&str, f64); 4] = [
        ("Words/sentence", result.words_per_sentence),
        ("Syllables/word", result.syllables_per_word),
        ("Letters/word", result.letters_per_word),
        ("Sentences/word", result.sentences_per_word),
    ];
    for (label, value) in averages {
        println!("  {:<20} {:>10.3}", label.dimmed(), value.cyan());
    }
}
