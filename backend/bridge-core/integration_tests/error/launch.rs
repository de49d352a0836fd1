use bridge_core::error::BridgeError;
use bridge_core::error::launch::LaunchError;
use bridge_core::launcher::{launch, rewrite_arguments};

use std::error::Error as StdError;
use std::path::Path;

/// **VALUE**: Errors carry both a kind prefix and the caller's source location.
///
/// **WHY THIS MATTERS**: These messages are the only diagnostics a user sees before exit 1.
/// The location pinpoints which call produced them.
#[test]
fn given_invalid_port_when_rewriting_then_error_displays_kind_and_location() {
    // GIVEN/WHEN: A rejected listen port
    let error = rewrite_arguments(["--port=nope"], "9515", "172.20.1.5").unwrap_err();

    // THEN: Kind prefix, offending value and this file's location
    let display = error.to_string();
    assert!(display.starts_with("Validation Error:"), "Got: {display}");
    assert!(display.contains("nope"), "Got: {display}");
    assert!(display.contains("launch.rs"), "Got: {display}");
}

#[tokio::test]
async fn given_spawn_error_when_inspected_then_source_is_preserved() {
    let args = rewrite_arguments(Vec::<String>::new(), "9515", "").unwrap();
    let error = launch(Path::new("/nonexistent/driver"), &args).unwrap_err();

    assert!(matches!(error, LaunchError::Spawn { .. }));
    assert!(error.source().is_some());
}

#[test]
fn given_launch_error_when_converted_then_bridge_error_is_transparent() {
    let error = rewrite_arguments(["--port=0"], "9515", "").unwrap_err();
    let expected = error.to_string();

    let bridge: BridgeError = error.into();

    assert!(matches!(bridge, BridgeError::Launch(_)));
    assert_eq!(bridge.to_string(), expected);
}
