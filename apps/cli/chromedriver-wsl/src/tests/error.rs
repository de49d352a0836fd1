// Unit tests for the application error type

use crate::error::{AppError, STARTUP_FAILURE_EXIT_CODE};

use bridge_core::config::BridgeConfig;
use bridge_core::error::BridgeError;

use common::ErrorLocation;

use std::error::Error as StdError;
use std::panic::Location;

/// **VALUE**: Startup failures carry the underlying diagnostic and exit with code 1.
///
/// **WHY THIS MATTERS**: The message printed before exiting is the user's only hint. It must
/// include the config error's own text, not just "startup failed".
///
/// **BUG THIS CATCHES**: Would catch dropping the source's message from the wrapped error,
/// or a startup failure mapping to exit code 0.
#[test]
fn given_config_error_when_wrapped_then_message_and_exit_code_preserved() {
    // GIVEN: A validation failure from an empty config
    let config_error = BridgeConfig::default().validate().unwrap_err();
    let inner = config_error.to_string();

    // WHEN: Wrapping as a startup error
    let error = AppError::startup("Failed to load configuration", config_error);

    // THEN: Display includes context and inner message; code is 1
    let display = error.to_string();
    assert!(display.starts_with("Startup Error: Failed to load configuration: "));
    assert!(display.contains(&inner));
    assert!(display.contains("Please setup chromedriver_bin"));
    assert_eq!(error.exit_code(), STARTUP_FAILURE_EXIT_CODE);
    assert_eq!(error.exit_code(), 1);
}

#[test]
fn given_startup_error_when_inspected_then_source_is_bridge_error() {
    let error = AppError::startup(
        "Failed to load configuration",
        BridgeConfig::default().validate().unwrap_err(),
    );

    let source = error.source().expect("startup error has a source");

    assert!(source.downcast_ref::<BridgeError>().is_some());
}

#[test]
fn given_logger_error_when_displayed_then_shows_kind() {
    let error = AppError::Logger {
        message: String::from("Failed to create log file"),
        location: ErrorLocation::from(Location::caller()),
    };

    assert!(error.to_string().starts_with("Logger Error: Failed to create log file"));
    assert_eq!(error.exit_code(), 1);
}
