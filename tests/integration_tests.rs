//! Integration tests for the logger
//!
//! These tests verify:
//! - Exact console line format
//! - Level gating
//! - Processor ordering
//! - Detail mode
//! - Hourly file persistence and rotation
//! - File open failures and recovery

use chrono::{Duration, Local, TimeZone};
use leveled_logger::prelude::*;
use leveled_logger::{error, info};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn console_logger(level: LogLevel) -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .level(level)
        .writer(buffer.clone())
        .build()
        .expect("Failed to build logger");
    (logger, buffer)
}

fn clock_at(hour: u32, minute: u32) -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Local.with_ymd_and_hms(2024, 3, 1, hour, minute, 0).unwrap(),
    ))
}

fn file_logger(dir: &Path, clock: Arc<ManualClock>) -> Logger {
    Logger::builder()
        .writer(SharedBuffer::new())
        .log_dir(dir)
        .log_to_file(true)
        .clock(clock)
        .build()
        .expect("Failed to build logger")
}

fn log_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read log dir")
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_info_line_is_byte_exact() {
    let (logger, buffer) = console_logger(LogLevel::Info);
    logger.set_colors(false);
    logger.info("x", vec![]);
    assert_eq!(buffer.contents(), "[INFO] x \n");
}

#[test]
fn test_colored_tags_per_level() {
    let (logger, buffer) = console_logger(LogLevel::Debug);

    logger.debug("test debug message", vec![]);
    assert_eq!(buffer.take(), "\x1b[33m[DEBUG]\x1b[0m test debug message \n");

    logger.info("test info message", vec![]);
    assert_eq!(buffer.take(), "\x1b[32m[INFO]\x1b[0m test info message \n");

    logger.error("test error message", vec![]);
    assert_eq!(buffer.take(), "\x1b[31m[ERROR]\x1b[0m test error message \n");
}

#[test]
fn test_threshold_suppresses_lower_levels() {
    for threshold in LogLevel::ALL {
        let (logger, buffer) = console_logger(threshold);
        logger.set_colors(false);

        logger.debug("d", vec![]);
        logger.info("i", vec![]);
        logger.error("e", vec![]);

        let expected: String = LogLevel::ALL
            .iter()
            .filter(|level| **level >= threshold)
            .map(|level| format!("{} {} \n", level.tag(), &level.to_str()[..1].to_lowercase()))
            .collect();
        assert_eq!(buffer.contents(), expected, "threshold {}", threshold);
    }
}

#[test]
fn test_level_change_applies_to_next_call() {
    let (logger, buffer) = console_logger(LogLevel::Info);
    logger.debug("hidden", vec![]);
    logger.set_level(LogLevel::Debug);
    assert_eq!(logger.level(), LogLevel::Debug);
    logger.debug("shown", vec![]);
    assert!(!buffer.contents().contains("hidden"));
    assert!(buffer.contents().contains("shown"));
}

#[test]
fn test_processors_compose_in_registration_order() {
    let (logger, buffer) = console_logger(LogLevel::Info);
    logger.set_colors(false);

    // P1 appends "A" to the format, P2 appends "B" to whatever P1 produced
    logger.add_processor(|format, args| (format!("{}A", format), args));
    logger.add_processor(|format, args| (format!("{}B", format), args));
    logger.info("", vec![]);
    assert_eq!(buffer.take(), "[INFO] AB \n");

    logger.add_processor(|format, args| (format!("[PREFIX] {}", format), args));
    logger.info("msg ", vec![]);
    assert_eq!(buffer.take(), "[INFO] [PREFIX] msg AB \n");
}

#[test]
fn test_processor_sees_arguments() {
    let (logger, buffer) = console_logger(LogLevel::Info);
    logger.set_colors(false);
    logger.add_processor(|format, args| {
        let redacted = args.into_iter().map(|_| LogArg::from("***")).collect();
        (format, redacted)
    });

    info!(logger: logger, "password={}", "hunter2");
    assert_eq!(buffer.contents(), "[INFO] password=*** \n");
}

#[test]
fn test_detail_mode_off_has_no_location() {
    let (logger, buffer) = console_logger(LogLevel::Info);
    logger.set_colors(false);
    logger.info("plain", vec![]);
    let content = buffer.contents();
    assert_eq!(content, "[INFO] plain \n");
    assert!(!content.contains("integration_tests.rs"));
}

#[test]
fn test_detail_mode_reports_caller() {
    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .writer(buffer.clone())
        .colors(false)
        .show_detail(true)
        .clock(clock_at(14, 5))
        .timestamp_format(TimestampFormat::Custom("%Y-%m-%d %H:%M".to_string()))
        .build()
        .unwrap();

    logger.info("with detail", vec![]);
    let first_line = line!() - 1;
    error!(logger: logger, "via macro {}", 1);
    let second_line = line!() - 1;

    let content = buffer.contents();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        format!("[INFO] 2024-03-01 14:05 integration_tests.rs:{} with detail ", first_line)
    );
    assert_eq!(
        lines[1],
        format!("[ERROR] 2024-03-01 14:05 integration_tests.rs:{} via macro 1 ", second_line)
    );
}

#[test]
fn test_lines_within_one_hour_land_in_one_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let clock = clock_at(9, 0);
    let logger = file_logger(temp_dir.path(), clock.clone());

    for i in 0..25 {
        logger.info("Message {}", vec![i.into()]);
        clock.advance(Duration::minutes(2));
    }
    logger.flush().expect("Failed to flush");

    assert_eq!(log_files(temp_dir.path()), vec!["log_2024-03-01_09.log"]);
    let content = fs::read_to_string(temp_dir.path().join("log_2024-03-01_09.log")).unwrap();
    let expected: String = (0..25).map(|i| format!("[INFO] Message {} \n", i)).collect();
    assert_eq!(content, expected);
}

#[test]
fn test_hour_boundary_splits_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let clock = clock_at(10, 58);
    let logger = file_logger(temp_dir.path(), clock.clone());

    logger.info("first", vec![]);
    logger.error("second", vec![]);
    logger.flush().unwrap();

    clock.advance(Duration::minutes(5));
    logger.info("third", vec![]);
    logger.flush().unwrap();

    assert_eq!(
        log_files(temp_dir.path()),
        vec!["log_2024-03-01_10.log", "log_2024-03-01_11.log"]
    );
    let first = fs::read_to_string(temp_dir.path().join("log_2024-03-01_10.log")).unwrap();
    let second = fs::read_to_string(temp_dir.path().join("log_2024-03-01_11.log")).unwrap();
    assert_eq!(first, "[INFO] first \n[ERROR] second \n");
    assert_eq!(second, "[INFO] third \n");
    assert_eq!(logger.metrics().rotations(), 2);
}

#[test]
fn test_file_persistence_toggle() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let logger = file_logger(temp_dir.path(), clock_at(8, 0));

    logger.info("kept", vec![]);
    logger.set_log_file(false);
    assert!(!logger.logs_to_file());
    logger.info("console only", vec![]);
    logger.set_log_file(true);
    logger.info("kept again", vec![]);
    logger.flush().unwrap();

    let content = fs::read_to_string(temp_dir.path().join("log_2024-03-01_08.log")).unwrap();
    assert_eq!(content, "[INFO] kept \n[INFO] kept again \n");
}

#[test]
fn test_file_line_matches_console_line_with_detail() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .writer(buffer.clone())
        .colors(false)
        .show_detail(true)
        .log_dir(temp_dir.path())
        .log_to_file(true)
        .clock(clock_at(16, 20))
        .build()
        .unwrap();

    logger.info("same {}", vec!["shape".into()]);
    logger.flush().unwrap();

    let file = fs::read_to_string(temp_dir.path().join("log_2024-03-01_16.log")).unwrap();
    assert_eq!(file, buffer.contents());
}

#[test]
fn test_open_failure_is_reported_and_recovers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let blocked = temp_dir.path().join("logs");
    fs::write(&blocked, "a file where the log directory should be").unwrap();

    let reported = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&reported);
    let logger = Logger::builder()
        .writer(SharedBuffer::new())
        .log_dir(&blocked)
        .log_to_file(true)
        .clock(clock_at(12, 0))
        .on_error(Arc::new(move |err: &LoggerError| {
            assert!(err.to_string().starts_with("Error opening file"));
            counter.fetch_add(1, Ordering::SeqCst);
        }))
        .build()
        .unwrap();

    logger.error("lost one", vec![]);
    logger.error("lost two", vec![]);
    logger.flush().unwrap();
    assert_eq!(reported.load(Ordering::SeqCst), 2);
    assert_eq!(logger.metrics().file_open_failures(), 2);
    assert_eq!(logger.metrics().dropped_count(), 2);

    fs::remove_file(&blocked).unwrap();
    logger.info("recovered", vec![]);
    logger.flush().unwrap();

    let content = fs::read_to_string(blocked.join("log_2024-03-01_12.log")).unwrap();
    assert_eq!(content, "[INFO] recovered \n");
}

#[test]
fn test_drop_drains_queue() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    {
        let logger = Logger::builder()
            .writer(SharedBuffer::new())
            .log_dir(temp_dir.path())
            .log_to_file(true)
            .queue_capacity(4)
            .clock(clock_at(7, 0))
            .build()
            .unwrap();
        for i in 0..40 {
            logger.info("line {}", vec![i.into()]);
        }
    }

    let content = fs::read_to_string(temp_dir.path().join("log_2024-03-01_07.log")).unwrap();
    assert_eq!(content.lines().count(), 40);
}

#[test]
fn test_config_from_json() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let json = format!(
        r#"{{ "level": "Debug", "log_to_file": true, "colors": false, "log_dir": {:?} }}"#,
        temp_dir.path().to_str().unwrap()
    );
    let config = LoggerConfig::from_json(&json).unwrap();
    let buffer = SharedBuffer::new();
    let logger = Logger::builder()
        .config(config)
        .writer(buffer.clone())
        .clock(clock_at(6, 0))
        .build()
        .unwrap();

    logger.debug("configured", vec![]);
    logger.flush().unwrap();

    assert_eq!(buffer.contents(), "[DEBUG] configured \n");
    assert!(temp_dir.path().join("log_2024-03-01_06.log").exists());
}
