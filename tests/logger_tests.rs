use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::sync::Arc;
use std::thread;

use chrono::{DateTime, Duration, FixedOffset};
use logwheel::{Error, Logger};
use tempfile::tempdir;

fn epoch() -> DateTime<FixedOffset> {
    DateTime::from_timestamp(0, 0).unwrap().fixed_offset()
}

fn epoch_logger(directory: &std::path::Path) -> Logger {
    let logger = Logger::open(directory).unwrap();
    logger.set_time_source(|| epoch());
    logger
}

#[test]
fn test_open_requires_existing_writable_directory() {
    let dir = tempdir().unwrap();
    assert!(Logger::open(dir.path()).is_ok());

    let missing = dir.path().join("noexist");
    let err = Logger::open(&missing).unwrap_err();
    assert!(
        matches!(err, Error::DirectoryUnwritable { .. }),
        "expected a probe failure, got {err}"
    );
}

#[test]
fn test_probe_leaves_no_files_behind() {
    let dir = tempdir().unwrap();
    let _logger = Logger::open(dir.path()).unwrap();
    assert_eq!(
        fs::read_dir(dir.path()).unwrap().count(),
        0,
        "the writability probe must clean up after itself"
    );
}

#[test]
fn test_first_write_creates_exactly_one_file() {
    let dir = tempdir().unwrap();
    let logger = epoch_logger(dir.path());

    // No file exists for any window before the first write.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

    logger.append(b"hello\n").unwrap();

    let names: Vec<OsString> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![OsString::from("1970-01-01T00.log")]);
}

#[test]
fn test_append_returns_byte_count() {
    let dir = tempdir().unwrap();
    let logger = epoch_logger(dir.path());

    let line = b"test line 1\n";
    let written = logger.append(line).unwrap();
    assert_eq!(written, line.len());
}

#[test]
fn test_end_to_end_writes_land_in_window_file() {
    let dir = tempdir().unwrap();
    let logger = epoch_logger(dir.path());

    logger.append(b"test line 1\n").unwrap();
    logger.append_str("test line 2\n").unwrap();

    let contents = fs::read_to_string(dir.path().join("1970-01-01T00.log")).unwrap();
    assert_eq!(contents, "test line 1\ntest line 2\n");
}

#[test]
fn test_clock_advance_rotates_without_touching_old_files() {
    let dir = tempdir().unwrap();
    let logger = epoch_logger(dir.path());

    logger.append_str("first window\n").unwrap();

    logger.set_time_source(|| epoch() + Duration::hours(1));
    logger.append_str("second window\n").unwrap();
    logger.append_str("second window again\n").unwrap();

    let first = fs::read_to_string(dir.path().join("1970-01-01T00.log")).unwrap();
    let second = fs::read_to_string(dir.path().join("1970-01-01T01.log")).unwrap();
    assert_eq!(first, "first window\n", "past window left untouched");
    assert_eq!(second, "second window\nsecond window again\n");
}

#[test]
fn test_failed_open_does_not_poison_later_writes() {
    let dir = tempdir().unwrap();
    let logger = epoch_logger(dir.path());

    // A path-breaking prefix is accepted as-is and makes the open fail
    // because the subdirectory does not exist.
    logger.set_prefix("noexist/");
    let err = logger.append(b"lost\n").unwrap_err();
    assert!(matches!(err, Error::Open { .. }), "got {err}");

    logger.set_prefix("");
    logger.append(b"recovered\n").unwrap();

    let contents = fs::read_to_string(dir.path().join("1970-01-01T00.log")).unwrap();
    assert_eq!(contents, "recovered\n");
}

#[test]
fn test_concurrent_writers_never_interleave() {
    const THREADS: usize = 8;
    const LINES_PER_THREAD: usize = 50;

    let dir = tempdir().unwrap();
    let logger = Arc::new(epoch_logger(dir.path()));

    let mut handles = Vec::new();
    for thread_id in 0..THREADS {
        let logger = Arc::clone(&logger);
        handles.push(thread::spawn(move || {
            for line_id in 0..LINES_PER_THREAD {
                logger
                    .append_str(&format!("thread {thread_id} line {line_id}\n"))
                    .unwrap();
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let contents = fs::read_to_string(dir.path().join("1970-01-01T00.log")).unwrap();

    let expected_len: usize = (0..THREADS)
        .flat_map(|t| (0..LINES_PER_THREAD).map(move |l| format!("thread {t} line {l}\n").len()))
        .sum();
    assert_eq!(contents.len(), expected_len, "no bytes lost or duplicated");

    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), THREADS * LINES_PER_THREAD);
    for t in 0..THREADS {
        for l in 0..LINES_PER_THREAD {
            let needle = format!("thread {t} line {l}");
            assert_eq!(
                lines.iter().filter(|line| **line == needle).count(),
                1,
                "every line should appear intact exactly once: {needle:?}"
            );
        }
    }
}

#[test]
fn test_write_trait_appends_to_current_window() {
    let dir = tempdir().unwrap();
    let logger = epoch_logger(dir.path());

    let mut sink = &logger;
    sink.write_all(b"via io::Write\n").unwrap();
    sink.flush().unwrap();

    let contents = fs::read_to_string(dir.path().join("1970-01-01T00.log")).unwrap();
    assert_eq!(contents, "via io::Write\n");
}

#[test]
fn test_serves_as_tracing_subscriber_sink() {
    let dir = tempdir().unwrap();
    let logger = epoch_logger(dir.path());
    let path = dir.path().join(logger.file_name());

    let subscriber = tracing_subscriber::fmt()
        .with_writer(logger)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, || {
        tracing::info!("sink line");
    });

    let contents = fs::read_to_string(path).unwrap();
    assert!(
        contents.contains("sink line"),
        "event should land in the window file, got {contents:?}"
    );
}
