//! Functional tests running the `tcode` binary against project files.

use std::path::Path;
use std::process::{Command, Output};
use tcode_model::Column;
use tcode_store::{ColumnStore, FileStore};
use tcode_test_utils::{column, looking_column, trial_column};

fn tcode(project: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tcode"))
        .arg("--project")
        .arg(project)
        .args(args)
        .env_remove("TCODE_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn project_with(dir: &Path, columns: &[Column]) -> std::path::PathBuf {
    let path = dir.join("study.json");
    let store = FileStore::open(&path).unwrap();
    for column in columns {
        store.store_column(column).unwrap();
    }
    path
}

/// Tenet: `mutex` stores the merged column in the project file.
#[test]
fn mutex_writes_merged_column() {
    let dir = tempfile::tempdir().unwrap();
    let project = project_with(dir.path(), &[looking_column(), trial_column()]);

    let output = tcode(
        &project,
        &["mutex", "--name", "look_trial", "--a", "looking", "--b", "trial"],
    );

    assert!(output.status.success());
    assert!(stdout(&output).contains("with 7 cells"));
    let merged = FileStore::open(&project).unwrap().load_column("look_trial").unwrap();
    assert_eq!(merged.len(), 7);
}

/// Tenet: `scan` exits nonzero and names the faulty cell.
#[test]
fn scan_reports_inverted_cell() {
    let dir = tempfile::tempdir().unwrap();
    let bad = column("bad", &["x"], &[(0, 100, &["a"]), (500, 200, &["b"])]);
    let project = project_with(dir.path(), &[bad, trial_column()]);

    let output = tcode(&project, &["scan", "bad", "trial"]);

    assert!(!output.status.success());
    let text = stdout(&output);
    assert!(text.contains("cell 2 in column 'bad'"));
    assert!(!text.contains("column 'trial':"));
}

/// Tenet: `export` prints a header row followed by one row per cell.
#[test]
fn export_prints_tsv() {
    let dir = tempfile::tempdir().unwrap();
    let project = project_with(dir.path(), &[looking_column()]);

    let output = tcode(&project, &["export", "looking"]);

    assert!(output.status.success());
    let text = stdout(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "ordinal\tonset\toffset\ttarget\thand");
    assert_eq!(lines[1], "1\t1000\t2000\ttoy\tleft");
}

/// Tenet: a missing column is an error, not an empty result.
#[test]
fn unknown_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let project = project_with(dir.path(), &[]);

    let output = tcode(&project, &["export", "nope"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope"));
}

/// Tenet: `check-codes` fails when a value is outside the allowed set.
#[test]
fn check_codes_flags_violation() {
    let dir = tempfile::tempdir().unwrap();
    let project = project_with(dir.path(), &[looking_column()]);

    let output = tcode(
        &project,
        &["check-codes", "--column", "looking", "--rule", "target=toy"],
    );

    assert!(!output.status.success());
    assert!(stdout(&output).contains("mom"));
}

/// Tenet: `combine` merges every listed column into one stored column.
#[test]
fn combine_stores_folded_merge() {
    let dir = tempfile::tempdir().unwrap();
    let phase = column("phase", &["name"], &[(0, 8_000, &["test"])]);
    let project = project_with(dir.path(), &[looking_column(), trial_column(), phase]);

    let output = tcode(
        &project,
        &["combine", "--name", "all", "looking", "trial", "phase"],
    );

    assert!(output.status.success());
    assert!(stdout(&output).contains("with 9 cells"));
    let combined = FileStore::open(&project).unwrap().load_column("all").unwrap();
    assert!(combined.has_argument("phase_name"));
}
