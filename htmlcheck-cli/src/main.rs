//! htmlcheck CLI
//!
//! Validates `index.html` in the working directory: tags must balance and
//! every local `script[src]` / `link[href]` must exist next to this
//! executable. Problems go to stderr, one per line, and the exit code is 1.
//!
//! Set `RUST_LOG=debug` to trace the tokenizer and validator.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use htmlcheck_validator::validate_document;
use owo_colors::{OwoColorize, Stream};

/// The document checked, relative to the working directory.
const DOCUMENT: &str = "index.html";

/// Printed on stdout when nothing is wrong.
const SUCCESS_MESSAGE: &str = "index.html looks valid and all assets exist.";

/// htmlcheck - check tag balance and local assets of index.html
#[derive(Parser, Debug)]
#[command(name = "htmlcheck")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r"CHECKS:
    - every non-void start tag is closed, in nesting order
    - every local <script src> and <link href> exists, relative to the
      directory containing this executable (http:// and https:// are skipped)

EXIT STATUS:
    0  index.html is valid
    1  problems were found (listed on stderr), or index.html is unreadable")]
struct Cli {
    /// Accepted for compatibility and ignored; there are no options.
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    ignored: Vec<String>,
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    let cli = Cli::parse();
    if !cli.ignored.is_empty() {
        log::debug!("ignoring arguments: {:?}", cli.ignored);
    }

    let source =
        fs::read_to_string(DOCUMENT).with_context(|| format!("failed to read {DOCUMENT}"))?;
    let asset_root = asset_root();
    log::info!("resolving local assets against {}", asset_root.display());

    let report = validate_document(&source, &asset_root);
    if report.is_valid() {
        println!(
            "{}",
            SUCCESS_MESSAGE.if_supports_color(Stream::Stdout, |text| text.green())
        );
        return Ok(ExitCode::SUCCESS);
    }

    for message in report.messages() {
        eprintln!(
            "{}",
            message.if_supports_color(Stream::Stderr, |text| text.red())
        );
    }
    Ok(ExitCode::FAILURE)
}

/// The directory containing the running executable.
///
/// Falls back to the working directory if the executable cannot be located.
fn asset_root() -> PathBuf {
    match env::current_exe() {
        Ok(exe) => exe
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf),
        Err(error) => {
            log::warn!("cannot locate executable ({error}), resolving assets against .");
            PathBuf::from(".")
        }
    }
}
