//! End-to-end tests for the `htmlcheck` binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Run the binary with `dir` as the working directory, colors and logging off.
fn run_in(dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_htmlcheck"))
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("FORCE_COLOR")
        .env_remove("CLICOLOR_FORCE")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run htmlcheck")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn stderr_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_valid_document() {
    let output = run_in(&fixture_dir("valid"));
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_lines(&output),
        ["index.html looks valid and all assets exist."]
    );
    assert!(output.stderr.is_empty());
}

#[test]
fn test_invalid_document_lists_every_problem() {
    let output = run_in(&fixture_dir("invalid"));
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert_eq!(
        stderr_lines(&output),
        [
            "Missing asset: no-such-dir/missing.css",
            "Mismatched tag: expected </span> got </div>",
            "Mismatched tag: expected </div> got </span>",
            "Mismatched tag: expected </body> got </section>",
            "Mismatched tag: expected </p> got </body>",
            "Mismatched tag: expected </main> got </html>",
            "Unclosed tags: html",
        ]
    );
}

#[test]
fn test_parse_error_reported_with_unclosed_tags() {
    let output = run_in(&fixture_dir("broken"));
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr_lines(&output),
        [
            "unknown-marked-section \"foo\" at line 3, column 1",
            "Unclosed tags: html, body",
        ]
    );
}

#[test]
fn test_unterminated_trailing_comment_is_valid() {
    let output = run_in(&fixture_dir("truncated"));
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_lines(&output),
        ["index.html looks valid and all assets exist."]
    );
}

#[test]
fn test_missing_document_fails() {
    // The fixtures directory itself has no index.html.
    let output = run_in(&fixture_dir(""));
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read index.html"));
}

#[test]
fn test_extra_arguments_ignored() {
    let output = Command::new(env!("CARGO_BIN_EXE_htmlcheck"))
        .args(["--strict", "other.html"])
        .current_dir(fixture_dir("valid"))
        .env("NO_COLOR", "1")
        .output()
        .expect("failed to run htmlcheck");
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout_lines(&output),
        ["index.html looks valid and all assets exist."]
    );
}

#[test]
fn test_extra_arguments_do_not_hide_problems() {
    let output = Command::new(env!("CARGO_BIN_EXE_htmlcheck"))
        .arg("valid/index.html")
        .current_dir(fixture_dir("broken"))
        .output()
        .expect("failed to run htmlcheck");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_version_flag() {
    let output = Command::new(env!("CARGO_BIN_EXE_htmlcheck"))
        .arg("--version")
        .output()
        .expect("failed to run htmlcheck");
    assert!(output.status.success());
    assert!(stdout_lines(&output)[0].starts_with("htmlcheck "));
}
