//! Doctor command: diagnose configuration and hyphenation dictionaries.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use readability_score_core::config::{self, Config, ConfigSources};
use readability_score_core::{DictionaryResolver, PatternHyphenator, SimpleWordList};

/// Arguments for the `doctor` subcommand.
#[derive(Args, Debug, Default)]
pub struct DoctorArgs {
    /// Check this locale instead of the configured one.
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Extra directory searched for hyphenation dictionaries (repeatable).
    #[arg(long = "dict-dir", value_name = "DIR")]
    pub dict_dirs: Vec<Utf8PathBuf>,
}

#[derive(Debug, Serialize)]
struct DirCheck {
    path: String,
    exists: bool,
}

#[derive(Debug, Serialize)]
struct DictionaryCheck {
    locale: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    patterns: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl DictionaryCheck {
    fn ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Serialize)]
struct WordListCheck {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    words: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    cwd: String,
    config_files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_config_dir: Option<String>,
    dictionary_dirs: Vec<DirCheck>,
    dictionary: DictionaryCheck,
    #[serde(skip_serializing_if = "Option::is_none")]
    simple_words: Option<WordListCheck>,
}

impl DoctorReport {
    fn healthy(&self) -> bool {
        self.dictionary.ok()
            && self
                .simple_words
                .as_ref()
                .is_none_or(|check| check.error.is_none())
    }
}

fn check_dictionary(resolver: &DictionaryResolver, locale: &str) -> DictionaryCheck {
    let mut check = DictionaryCheck {
        locale: locale.to_string(),
        path: None,
        patterns: None,
        error: None,
    };
    match resolver.path_for(locale) {
        Ok(path) => {
            check.path = Some(path.to_string());
            match PatternHyphenator::from_path(&path) {
                Ok(hyphenator) => check.patterns = Some(hyphenator.pattern_count()),
                Err(e) => check.error = Some(e.to_string()),
            }
        }
        Err(e) => check.error = Some(e.to_string()),
    }
    check
}

fn check_word_list(path: &Utf8Path) -> WordListCheck {
    match SimpleWordList::from_path(path) {
        Ok(list) => WordListCheck {
            path: path.to_string(),
            words: Some(list.len()),
            error: None,
        },
        Err(e) => WordListCheck {
            path: path.to_string(),
            words: None,
            error: Some(e.to_string()),
        },
    }
}

fn build_report(
    args: &DoctorArgs,
    config: &Config,
    sources: &ConfigSources,
    cwd: &Utf8Path,
) -> DoctorReport {
    let dirs: Vec<Utf8PathBuf> = args
        .dict_dirs
        .iter()
        .cloned()
        .chain(config.effective_dictionary_dirs())
        .collect();
    let resolver = DictionaryResolver::new(dirs.iter().cloned());
    let locale = args.locale.as_deref().unwrap_or(&config.locale);

    let config_files = sources
        .project_files
        .iter()
        .chain(sources.user_file.iter())
        .chain(sources.explicit_files.iter())
        .map(ToString::to_string)
        .collect();

    DoctorReport {
        cwd: cwd.to_string(),
        config_files,
        user_config_dir: config::user_config_dir().map(|d| d.to_string()),
        dictionary_dirs: dirs
            .iter()
            .map(|d| DirCheck {
                path: d.to_string(),
                exists: d.is_dir(),
            })
            .collect(),
        dictionary: check_dictionary(&resolver, locale),
        simple_words: config.simple_words.as_deref().map(check_word_list),
    }
}

/// Diagnose the environment.
///
/// Fails when the checked locale has no loadable dictionary or the
/// configured simple-word list cannot be read.
#[instrument(name = "cmd_doctor", skip_all)]
pub fn cmd_doctor(
    args: DoctorArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
    cwd: &Utf8Path,
) -> anyhow::Result<()> {
    debug!(locale = ?args.locale, "executing doctor command");
    let report = build_report(&args, config, sources, cwd);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if !report.healthy() {
        anyhow::bail!("doctor found problems");
    }
    Ok(())
}

fn print_report(report: &DoctorReport) {
    println!("{}", "Configuration".bold().underline());
    println!("{}: {}", "Working directory".dimmed(), report.cwd);
    if report.config_files.is_empty() {
        println!("{}: {}", "Config files".dimmed(), "none loaded".yellow());
    } else {
        for file in &report.config_files {
            println!("{}: {}", "Config file".dimmed(), file.cyan());
        }
    }
    if let Some(ref dir) = report.user_config_dir {
        println!("{}: {}", "User config dir".dimmed(), dir);
    }

    println!();
    println!("{}", "Dictionaries".bold().underline());
    for dir in &report.dictionary_dirs {
        if dir.exists {
            println!("  {} {}", "ok".green(), dir.path);
        } else {
            println!("  {} {}", "missing".yellow(), dir.path);
        }
    }
    let dict = &report.dictionary;
    match (&dict.path, dict.patterns, &dict.error) {
        (_, _, Some(err)) => println!("{} {}: {}", "FAIL".red(), dict.locale, err),
        (Some(path), Some(patterns), None) => println!(
            "{} {} -> {} ({} patterns)",
            "PASS".green(),
            dict.locale,
            path.cyan(),
            patterns
        ),
        _ => println!("{} {}", "PASS".green(), dict.locale),
    }

    if let Some(ref words) = report.simple_words {
        println!();
        println!("{}", "Simple words".bold().underline());
        match (&words.words, &words.error) {
            (_, Some(err)) => println!("{} {}: {}", "FAIL".red(), words.path, err),
            (Some(n), None) => println!("{} {} ({} words)", "PASS".green(), words.path, n),
            (None, None) => println!("{} {}", "PASS".green(), words.path),
        }
    }
}
