//! Tests for output module

use super::writer::write_and_close;
use super::*;
use crate::error::Error;
use crate::types::Record;
use pretty_assertions::assert_eq;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::json;
use std::fs;
use std::io::{self, Write};
use tempfile::tempdir;

/// Serializes as its id unless poisoned
struct Flaky {
    id: u64,
    poisoned: bool,
}

impl Serialize for Flaky {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.poisoned {
            Err(S::Error::custom("poisoned record"))
        } else {
            serializer.serialize_u64(self.id)
        }
    }
}

/// In-memory target whose release always fails
#[derive(Default)]
struct UnreleasableTarget {
    buffer: Vec<u8>,
}

impl Write for UnreleasableTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl LineTarget for UnreleasableTarget {
    fn release(self) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "device full"))
    }
}

fn sample_records() -> Vec<Record> {
    vec![
        Record::new(5)
            .with_field("text", "hello @rustlang")
            .with_field("user", json!({"screen_name": "ferris", "followers": 10})),
        Record::new(4).with_field("text", "line\nbreak and \"quotes\""),
        Record::new(3).with_field("entities", json!({"hashtags": [], "urls": [null]})),
        Record::new(3),
    ]
}

// ============================================================================
// Sink Tests
// ============================================================================

#[test]
fn test_destination_name() {
    let sink = JsonLinesSink::new("/tmp/out");
    assert_eq!(
        sink.destination("rustlang"),
        std::path::PathBuf::from("/tmp/out/rustlang-all-records.json")
    );
}

#[test]
fn test_persist_round_trip() {
    let dir = tempdir().unwrap();
    let sink = JsonLinesSink::new(dir.path());
    let records = sample_records();

    let summary = sink.persist("rustlang", &records).unwrap();
    assert_eq!(summary.lines, records.len());
    assert_eq!(summary.path, dir.path().join("rustlang-all-records.json"));

    let contents = fs::read_to_string(&summary.path).unwrap();
    assert!(contents.ends_with('\n'));

    let parsed: Vec<Record> = contents
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(parsed, records);
}

#[test]
fn test_persist_is_not_an_array() {
    let dir = tempdir().unwrap();
    let sink = JsonLinesSink::new(dir.path());

    let summary = sink.persist("rustlang", &sample_records()).unwrap();
    let contents = fs::read_to_string(summary.path).unwrap();

    assert!(!contents.starts_with('['));
    assert!(contents.lines().all(|line| line.starts_with('{')));
}

#[test]
fn test_persist_empty_records() {
    let dir = tempdir().unwrap();
    let sink = JsonLinesSink::new(dir.path());

    let summary = sink.persist::<Record>("quiet", &[]).unwrap();
    assert_eq!(summary.lines, 0);
    assert_eq!(fs::read_to_string(summary.path).unwrap(), "");
}

#[test]
fn test_persist_overwrites_previous_export() {
    let dir = tempdir().unwrap();
    let sink = JsonLinesSink::new(dir.path());

    sink.persist("rustlang", &sample_records()).unwrap();
    let summary = sink.persist("rustlang", &[Record::new(1)]).unwrap();

    let contents = fs::read_to_string(summary.path).unwrap();
    assert_eq!(contents, "{\"id\":1}\n");
}

#[test]
fn test_serialization_failure_leaves_earlier_lines() {
    let dir = tempdir().unwrap();
    let sink = JsonLinesSink::new(dir.path());
    let records = vec![
        Flaky { id: 1, poisoned: false },
        Flaky { id: 2, poisoned: false },
        Flaky { id: 3, poisoned: true },
        Flaky { id: 4, poisoned: false },
    ];

    let err = sink.persist("rustlang", &records).unwrap_err();
    assert!(matches!(err, Error::Serialization { index: 2, .. }));

    let contents = fs::read_to_string(sink.destination("rustlang")).unwrap();
    assert_eq!(contents.lines().collect::<Vec<_>>(), vec!["1", "2"]);
}

#[test]
fn test_missing_directory_is_storage_error() {
    let dir = tempdir().unwrap();
    let sink = JsonLinesSink::new(dir.path().join("does-not-exist"));

    let err = sink.persist("rustlang", &sample_records()).unwrap_err();
    assert!(matches!(err, Error::Storage { .. }));
}

#[test]
fn test_release_failure_after_clean_write_is_storage_error() {
    let writer = JsonLinesWriter::from_target(UnreleasableTarget::default(), "rustlang.json");

    let err = write_and_close(writer, &sample_records()).unwrap_err();
    match err {
        Error::Storage { path, source } => {
            assert_eq!(path, std::path::PathBuf::from("rustlang.json"));
            assert_eq!(source.to_string(), "device full");
        }
        other => panic!("Expected Storage, got {other:?}"),
    }
}

#[test]
fn test_release_failure_does_not_mask_write_error() {
    let writer = JsonLinesWriter::from_target(UnreleasableTarget::default(), "rustlang.json");
    let records = vec![
        Flaky { id: 1, poisoned: false },
        Flaky { id: 2, poisoned: true },
    ];

    let err = write_and_close(writer, &records).unwrap_err();
    assert!(matches!(err, Error::Serialization { index: 1, .. }));
}

// ============================================================================
// Writer Tests
// ============================================================================

#[test]
fn test_writer_counts_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("out.json");

    let mut writer = JsonLinesWriter::create(&path).unwrap();
    assert_eq!(writer.path(), path.as_path());
    writer.write(0, &json!({"id": 1})).unwrap();
    writer.write(1, &json!({"id": 2})).unwrap();
    assert_eq!(writer.lines_written(), 2);

    let lines = writer.close().unwrap();
    assert_eq!(lines, 2);
    assert_eq!(fs::read_to_string(path).unwrap(), "{\"id\":1}\n{\"id\":2}\n");
}
