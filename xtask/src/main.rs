//! Development tasks: man pages and shell completions.
//!
//! ```text
//! cargo xtask man [--out DIR]
//! cargo xtask completions [--out DIR]
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

const BIN_NAME: &str = "readability-score";

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for readability-score")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages (one per subcommand)
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
    /// Generate shell completion scripts
    Completions {
        /// Output directory
        #[arg(long, default_value = "target/completions")]
        out: PathBuf,
    },
}

fn main() -> io::Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => generate_man(&out),
        Task::Completions { out } => generate_completions(&out),
    }
}

fn generate_man(out: &Path) -> io::Result<()> {
    fs::create_dir_all(out)?;
    let cmd = readability_score::command().name(BIN_NAME);
    clap_mangen::generate_to(cmd, out)?;
    println!("man pages written to {}", out.display());
    Ok(())
}

fn generate_completions(out: &Path) -> io::Result<()> {
    fs::create_dir_all(out)?;
    let mut cmd = readability_score::command();
    for shell in Shell::value_variants() {
        let path = clap_complete::generate_to(*shell, &mut cmd, BIN_NAME, out)?;
        println!("{shell} completions written to {}", path.display());
    }
    Ok(())
}
