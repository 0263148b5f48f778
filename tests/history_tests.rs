mod common;

use cipherforge::config::InitStrategy;
use cipherforge::engine::history::{format_rate, History};
use cipherforge::engine::RunOptions;
use cipherforge::error::DecipherError;
use common::{graded_model, seeded_decryptor};
use tempfile::NamedTempFile;

#[test]
fn test_rate_needs_steps() {
    let history = History::default();
    assert!(matches!(
        history.acceptance_rate(),
        Err(DecipherError::EmptyHistory)
    ));
}

#[test]
fn test_rate_is_a_percentage() {
    let mut history = History::default();
    history.record(true, -3.0);
    history.record(false, -3.0);
    history.record(false, -3.0);
    history.record(true, -1.0);

    assert_eq!(history.accepted_count(), 2);
    assert_eq!(history.acceptance_rate().unwrap(), 50.0);
    assert_eq!(format_rate(100.0 / 3.0), "33.33%");

    history.clear();
    assert!(history.is_empty());
}

#[test]
fn test_csv_has_one_row_per_step() {
    let mut history = History::default();
    history.record(true, -2.5);
    history.record(false, -2.5);

    let mut buf = Vec::new();
    history.write_csv(&mut buf).unwrap();
    let csv = String::from_utf8(buf).unwrap();
    assert_eq!(csv, "step,accepted,score\n1,true,-2.5\n2,false,-2.5\n");
}

#[test]
fn test_run_history_export() {
    let mut dec = seeded_decryptor(graded_model("abcdef"), 4);
    dec.start_from("fedcbaabcdef", InitStrategy::Frequency).unwrap();
    dec.run(&RunOptions {
        steps: 64,
        early_stop: None,
        ..Default::default()
    })
    .unwrap();

    let history = dec.history().unwrap();
    assert_eq!(history.len(), 64);
    assert_eq!(history.scores().last().copied(), Some(dec.current_score().unwrap()));

    let file = NamedTempFile::new().unwrap();
    history.save_csv(file.path()).unwrap();
    let mut reader = csv::Reader::from_path(file.path()).unwrap();
    assert_eq!(reader.records().count(), 64);
}
