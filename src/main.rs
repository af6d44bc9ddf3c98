//! gitex-blame - git blame with author colors, age emphasis and highlighted source
//!
//! # Usage
//! ```bash
//! gitex-blame src/main.cpp                 # Blame the working tree version
//! gitex-blame src/main.cpp HEAD~10         # Extra arguments go to git blame
//! gitex-blame --json tool.py               # Dump parsed records as JSON
//! gitex-blame --now 1718409600 tool.py     # Fix the reference time
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Local};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gitex_blame::highlight::DEFAULT_THEME;
use gitex_blame::source::GitBlame;
use gitex_blame::RenderOptions;

/// Show who last changed each line of a file, color-coded by author and age
#[derive(Parser)]
#[command(name = "gitex-blame")]
#[command(about = "Color-coded git blame with syntax-highlighted content", long_about = None)]
struct Cli {
    /// Print the parsed blame records as JSON instead of the report
    #[arg(long)]
    json: bool,

    /// syntect theme used to highlight file content
    #[arg(long, default_value = DEFAULT_THEME)]
    theme: String,

    /// Reference time for age emphasis, as a unix timestamp (defaults to now)
    #[arg(long, value_name = "EPOCH")]
    now: Option<i64>,

    /// Path to the file to blame
    #[arg(value_name = "FILE")]
    file_path: PathBuf,

    /// Arguments passed through to `git blame` (revisions, options)
    #[arg(value_name = "GIT_ARGS", trailing_var_arg = true, allow_hyphen_values = true)]
    git_args: Vec<String>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let source = GitBlame;

    let result = if cli.json {
        gitex_blame::blame_file_json(&source, &cli.file_path, &cli.git_args)
    } else {
        let mut options = RenderOptions {
            theme: cli.theme,
            ..RenderOptions::default()
        };
        if let Some(epoch) = cli.now {
            options.now = DateTime::from_timestamp(epoch, 0)
                .with_context(|| format!("--now out of range: {}", epoch))?
                .with_timezone(&Local)
                .naive_local();
        }
        gitex_blame::blame_file(&source, &cli.file_path, &cli.git_args, &options)
    };
    let report =
        result.with_context(|| format!("Failed to blame {}", cli.file_path.display()))?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", report).context("Failed to write report")?;
    Ok(())
}
