// Unit tests for logger module initialization logic
// Tests focus on thread-safety and error handling

use crate::error::AppError;
use crate::logger::{
    DEFAULT_LOG_LEVEL, LOG_FILE_NAME, effective_level, initialize, log_file_path, open_log_file,
};

use std::path::PathBuf;

use log::LevelFilter;
use tempfile::tempdir;

/// **VALUE**: Verifies that calling initialize() multiple times doesn't panic or fail.
///
/// **WHY THIS MATTERS**: The bridge may be embedded or tested in ways that reach startup
/// more than once. A second call must not crash the process.
///
/// **BUG THIS CATCHES**: Would catch if the Once or AtomicBool guards are removed,
/// causing fern to panic when trying to set a global logger twice.
#[test]
fn given_logger_initialized_when_called_again_then_returns_ok() {
    // GIVEN: A valid temporary directory
    let temp_dir = tempdir().unwrap();

    // WHEN: Calling initialize twice
    let result1 = initialize(temp_dir.path(), Some(LevelFilter::Info));
    let result2 = initialize(temp_dir.path(), None);

    // THEN: Both should return Ok (second one logs warning but doesn't error)
    assert!(result1.is_ok(), "First initialization should succeed");
    assert!(
        result2.is_ok(),
        "Second initialization should succeed (idempotent)"
    );
}

/// **VALUE**: An unwritable log location is a recoverable error, not a panic.
///
/// **WHY THIS MATTERS**: The log file lives beside the executable, which may sit on a
/// read-only mount. The bridge must still run.
///
/// **BUG THIS CATCHES**: Would catch if `fern::log_file()` unwraps instead of returning
/// a Result, causing panics when the log file can't be created.
#[test]
fn given_invalid_log_dir_when_opening_log_file_then_returns_logger_error() {
    // GIVEN: A path that cannot contain files
    let invalid_dir = PathBuf::from("/dev/null/invalid-path");

    // WHEN: Opening the log file
    let result = open_log_file(&invalid_dir);

    // THEN: Logger error naming the file
    match result {
        Err(AppError::Logger { message, .. }) => {
            assert!(message.contains(LOG_FILE_NAME), "Got: {message}");
        }
        other => panic!("Expected Logger error, got {other:?}"),
    }
}

#[test]
fn given_log_dir_when_building_path_then_file_sits_inside() {
    let dir = PathBuf::from("/opt/bridge");

    assert_eq!(
        log_file_path(&dir),
        PathBuf::from("/opt/bridge/chromedriver_wsl.log")
    );
}

#[test]
fn given_configured_level_when_resolving_then_configured_level_wins() {
    assert_eq!(effective_level(Some(LevelFilter::Trace)), LevelFilter::Trace);
    assert_eq!(effective_level(Some(LevelFilter::Off)), LevelFilter::Off);
}

#[test]
fn given_no_configured_level_when_resolving_then_build_default_used() {
    let expected = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    assert_eq!(effective_level(None), DEFAULT_LOG_LEVEL);
    assert_eq!(effective_level(None), expected);
}
