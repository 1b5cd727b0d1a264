//! Error taxonomy as seen by callers of the public loading API.
//!
//! These tests trigger each error kind and check the context attached to it.

use std::io::Write;

use jsv_rust::config::{ConfigError, LoaderConfig};
use jsv_rust::{ErrorKind, ScheduleBuilder, ScheduleError, SourceFormat};
use tempfile::{NamedTempFile, TempDir};

mod support;

// =========================================================
// Unsupported format
// =========================================================

#[test]
fn test_csv_tag_is_unsupported() {
    let err = ScheduleBuilder::default()
        .build("schedule.csv", "csv")
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    assert!(matches!(err, ScheduleError::UnsupportedFormatError { ref tag, .. } if tag == "csv"));
    assert!(err.to_string().contains("csv"));
}

#[test]
fn test_tag_is_case_insensitive() {
    assert_eq!("XLSX".parse::<SourceFormat>().unwrap(), SourceFormat::Xlsx);
    assert_eq!("Ods".parse::<SourceFormat>().unwrap(), SourceFormat::Ods);
    assert!("".parse::<SourceFormat>().unwrap_err().is_unsupported_format());
}

#[test]
fn test_unknown_extension_is_unsupported() {
    let err = ScheduleBuilder::default()
        .build_from_path("schedule.numbers")
        .unwrap_err();
    assert!(err.is_unsupported_format());

    let err = ScheduleBuilder::default()
        .build_from_path("no_extension")
        .unwrap_err();
    assert!(err.is_unsupported_format());
}

// =========================================================
// I/O failures
// =========================================================

#[test]
fn test_missing_file_is_io_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.xlsx");

    let err = ScheduleBuilder::default().build(&path, "xlsx").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(
        err.context().path.as_deref(),
        Some(path.to_string_lossy().as_ref())
    );
}

#[test]
fn test_wrong_container_is_io_failure() {
    // a valid xlsx opened with the ods reader
    let dir = TempDir::new().unwrap();
    let path = support::write_jobs_xlsx(&dir, &[support::job("A", "1", "08:00:00")]);

    let err = ScheduleBuilder::default().build(&path, "ods").unwrap_err();
    assert!(err.is_io());
}

#[test]
fn test_truncated_file_is_io_failure() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"PK\x03\x04 truncated").unwrap();

    let err = ScheduleBuilder::default()
        .build(file.path(), "xlsx")
        .unwrap_err();
    assert!(err.is_io());
}

// =========================================================
// Context rendering
// =========================================================

#[test]
fn test_error_display_includes_context() {
    let dir = TempDir::new().unwrap();
    let path = support::write_jobs_xlsx(&dir, &[support::job("Bad", "abc", "08:00:00")]);

    let err = ScheduleBuilder::default().build(&path, "xlsx").unwrap_err();
    let message = err.to_string();
    assert!(message.starts_with("Format error"), "{}", message);
    assert!(message.contains("row=1"), "{}", message);
    assert!(message.contains("column=4"), "{}", message);
}

// =========================================================
// Configuration errors
// =========================================================

#[test]
fn test_malformed_config_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[time]\nanchor_date = \"yesterday\"").unwrap();

    let err = LoaderConfig::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_no_default_config() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    std::fs::create_dir_all(&nested).unwrap();

    let result = support::with_current_dir(&nested, LoaderConfig::from_default_location);
    assert!(matches!(result, Err(ConfigError::NotFound)));
}
