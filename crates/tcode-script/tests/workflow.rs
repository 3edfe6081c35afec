//! Functional tests for a full coding workflow on a project file.
//!
//! The workflow mirrors how a lab uses the session:
//! - Code primary columns and merge them.
//! - Thin a column for a second coder and compare the codings.
//! - Check codes and smooth before export.

use pretty_assertions::assert_eq;
use tcode_model::Column;
use tcode_script::{transfer_columns, CodeRule, ScriptConfig, ScriptError, Session};
use tcode_store::{ColumnStore, FileStore, MemoryStore};
use tcode_test_utils::{column, looking_column, spans, trial_column};

/// Tenet: a merge stored through the session is readable after reopening.
#[test]
fn merge_persists_through_project_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("study.json");
    {
        let session = Session::new(FileStore::open(&path).unwrap());
        session.set_column(&looking_column()).unwrap();
        session.set_column(&trial_column()).unwrap();
        let outcome = session
            .create_mutually_exclusive("look_trial", "looking", "trial", None, None)
            .unwrap();
        assert_eq!(outcome.report.cells_created, 7);
    }

    let session = Session::new(FileStore::open(&path).unwrap());
    let merged = session.get_column("look_trial").unwrap();
    assert_eq!(merged.len(), 7);
    assert_eq!(merged.arg_value(3, "looking_target").unwrap(), "mom");
}

/// Tenet: merge failures surface as session errors and store nothing.
#[test]
fn invalid_source_aborts_and_stores_nothing() {
    let bad = column("bad", &["x"], &[(50, 10, &["oops"])]);
    let session = Session::new(MemoryStore::with_columns([bad, trial_column()]));

    let err = session
        .create_mutually_exclusive("out", "bad", "trial", None, None)
        .unwrap_err();

    assert!(matches!(err, ScriptError::Merge(_)));
    assert!(err.to_string().contains("column 'bad'"));
    assert!(!session.store().contains("out"));
}

/// Tenet: a reliability column coded identically agrees fully.
#[test]
fn reliability_round_trip() {
    let session = Session::new(MemoryStore::with_columns([trial_column()]));
    let rel = session
        .make_reliability("rel_trial", "trial", 1, &["trialnum", "onset", "offset"])
        .unwrap();
    assert_eq!(rel.arg_value(0, "unit").unwrap(), "");

    let mut recoded = rel;
    recoded.set_arg_value(0, "unit", "a").unwrap();
    recoded.set_arg_value(1, "unit", "x").unwrap();
    session.set_column(&recoded).unwrap();

    let report = session
        .check_reliability("trial", "rel_trial", "trialnum", None)
        .unwrap();
    assert_eq!(report.errors["unit"], 1);
    assert_eq!(report.errors["onset"], 0);
    assert_eq!(report.agreement("unit"), Some(50.0));
}

/// Tenet: code checks and smoothing operate on stored columns by name.
#[test]
fn codes_and_smoothing() {
    let session = Session::with_config(
        MemoryStore::with_columns([looking_column()]),
        ScriptConfig::new().with_smoothing_tolerance(600),
    );

    let rules: Vec<CodeRule> = ["target=toy,mom", "hand=left,right,"]
        .iter()
        .map(|r| r.parse().unwrap())
        .collect();
    assert!(session.check_valid_codes("looking", &rules).unwrap().is_empty());

    assert_eq!(session.smooth_column("looking", None).unwrap(), 1);
    let smoothed = session.get_column("looking").unwrap();
    assert_eq!(smoothed.interval(1).unwrap().onset(), 2_000);
}

/// Tenet: transfers move columns between projects without loss.
#[test]
fn transfer_between_projects() {
    let dir = tempfile::tempdir().unwrap();
    let from = FileStore::open(dir.path().join("a.yaml")).unwrap();
    let to = FileStore::open(dir.path().join("b.json")).unwrap();
    from.store_column(&looking_column()).unwrap();

    transfer_columns(&from, &to, &["looking"], true).unwrap();

    assert!(FileStore::open(dir.path().join("a.yaml")).unwrap().column_names().is_empty());
    assert_eq!(
        FileStore::open(dir.path().join("b.json")).unwrap().load_column("looking").unwrap(),
        looking_column()
    );
}

/// Tenet: combining folds the merge over every listed column and stores the result.
#[test]
fn combine_three_columns() {
    let phase = spans("phase", "name", &[(0, 8_000)]);
    let session = Session::new(MemoryStore::with_columns([looking_column(), trial_column(), phase]));

    let combined = session
        .combine_columns("all", &["looking", "trial", "phase"])
        .unwrap();

    assert_eq!(combined.len(), 9);
    assert_eq!(
        combined.argument_names(),
        vec![
            "looking_ordinal",
            "looking_target",
            "looking_hand",
            "trial_ordinal",
            "trial_trialnum",
            "trial_unit",
            "phase_ordinal",
            "phase_name",
        ]
    );
    assert_eq!(combined.arg_value(0, "trial_trialnum").unwrap(), "");
    assert_eq!(combined.arg_value(0, "phase_ordinal").unwrap(), "1");
    assert_eq!(combined.arg_value(4, "looking_target").unwrap(), "mom");
    assert_eq!(session.get_column("all").unwrap(), combined);
}

/// Tenet: duration-block reliability stores both the empty copy and its blocks.
#[test]
fn duration_block_reliability_is_stored() {
    let session = Session::new(MemoryStore::with_columns([looking_column(), trial_column()]));

    let out = session
        .make_duration_block_reliability("rel_looking", "looking", "trial", 1_000, 2)
        .unwrap();

    assert!(out.rel.is_empty());
    let blocks: Vec<_> = out
        .blocks
        .intervals()
        .iter()
        .map(|iv| (iv.onset(), iv.offset()))
        .collect();
    assert_eq!(blocks, vec![(500, 1_500), (3_000, 4_000), (5_000, 6_000)]);
    assert_eq!(
        session.column_names(),
        vec!["looking", "trial", "rel_looking", "rel_looking_blocks"]
    );
    assert_eq!(session.get_column("rel_looking_blocks").unwrap(), out.blocks);
}

/// Tenet: stored ordinals never leak into a merge; loading renumbers by onset.
#[test]
fn unnumbered_columns_merge_by_onset_rank() {
    let mut a = Column::with_arguments("a", ["x"]).unwrap();
    a.add_interval().set_onset(10).set_offset(20).set_arg("x", "second").unwrap();
    a.add_interval().set_onset(0).set_offset(10).set_arg("x", "first").unwrap();
    for interval in a.intervals_mut() {
        interval.set_ordinal(0);
    }
    let session = Session::new(MemoryStore::with_columns([a, trial_column()]));

    let merged = session
        .create_mutually_exclusive("m", "a", "trial", None, None)
        .unwrap()
        .column;

    assert_eq!(merged.arg_value(0, "a_x").unwrap(), "first");
    assert_eq!(merged.arg_value(0, "a_ordinal").unwrap(), "1");
    assert_eq!(merged.arg_value(1, "a_ordinal").unwrap(), "2");
}
