//! Integration tests for the JSON-lines run log

use codeenergy_storage::{ErrorKind, JsonlRecordLog, RecordLog};
use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Record {
    sample_id: String,
    input_size: u64,
    time_s: Option<f64>,
}

fn record(id: &str, size: u64, time: Option<f64>) -> Record {
    Record {
        sample_id: id.to_string(),
        input_size: size,
        time_s: time,
    }
}

#[test]
fn test_records_roundtrip_in_append_order() {
    let dir = TempDir::new().unwrap();
    let mut log = JsonlRecordLog::open(dir.path().join("dataset.jsonl"));

    let written = vec![
        record("sort", 100, Some(0.01)),
        record("sort", 400, Some(0.04)),
        record("sort", 1600, None),
    ];
    for r in &written {
        log.append(r).unwrap();
    }

    let read: Vec<Record> = log.load_all().unwrap();
    assert_eq!(read, written);
    assert_eq!(log.len().unwrap(), 3);
}

#[test]
fn test_reopening_appends_rather_than_truncates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dataset.jsonl");

    JsonlRecordLog::open(&path)
        .append(&record("a", 1, Some(1.0)))
        .unwrap();
    JsonlRecordLog::open(&path)
        .append(&record("b", 2, Some(2.0)))
        .unwrap();

    let read: Vec<Record> = JsonlRecordLog::open(&path).load_all().unwrap();
    assert_eq!(read.len(), 2);
    assert_eq!(read[1].sample_id, "b");
}

#[test]
fn test_malformed_line_fails_whole_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dataset.jsonl");

    let mut log = JsonlRecordLog::open(&path);
    log.append(&record("a", 1, Some(1.0))).unwrap();

    // Simulate a truncated write from a crashed collector
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .open(&path)
        .unwrap();
    writeln!(file, "{{\"sample_id\":\"b\",\"input_").unwrap();
    drop(file);

    log.append(&record("c", 3, Some(3.0))).unwrap();

    let err = JsonlRecordLog::<Record>::open(&path).load_all().unwrap_err();
    assert_eq!(err.kind, ErrorKind::MalformedRecord);
    assert_eq!(err.line, Some(2));
}

#[test]
fn test_wrong_shape_is_malformed_too() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dataset.jsonl");
    std::fs::write(&path, "{\"unexpected\":true}\n").unwrap();

    let err = JsonlRecordLog::<Record>::open(&path).load_all().unwrap_err();
    assert!(err.is_malformed());
    assert_eq!(err.line, Some(1));
}
