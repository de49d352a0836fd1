use bridge_core::error::launch::LaunchError;
use bridge_core::launcher::{launch, rewrite_arguments};

use std::path::Path;
use std::time::Duration;

/// **VALUE**: A missing driver binary surfaces as a spawn error, not a panic.
///
/// **WHY THIS MATTERS**: A wrong `chromedriver_bin` is the most common misconfiguration
/// after a missing one. The bridge must report it and exit 1.
#[tokio::test]
async fn given_nonexistent_driver_when_launching_then_returns_spawn_error() {
    // GIVEN: A path that does not exist
    let args = rewrite_arguments(Vec::<String>::new(), "9515", "127.0.0.1").unwrap();

    // WHEN: Launching
    let result = launch(Path::new("/nonexistent/chromedriver.exe"), &args);

    // THEN: Spawn error naming the path
    match result {
        Err(LaunchError::Spawn { message, .. }) => {
            assert!(message.contains("/nonexistent/chromedriver.exe"));
        }
        other => panic!("Expected Spawn error, got {other:?}"),
    }
}

/// **VALUE**: Killing the driver happens at most once.
///
/// **BUG THIS CATCHES**: Would catch a second kill attempt erroring out (or signalling a
/// recycled PID) when both `/shutdown` and Ctrl-C arrive.
#[cfg(unix)]
#[tokio::test]
async fn given_running_driver_when_killed_twice_then_second_kill_is_noop() {
    // GIVEN: A long-running stand-in for the driver. `sh -c` ignores the trailing
    // `--allowed-ips <addr>` as positional parameters.
    let args = rewrite_arguments(["-c", "sleep 30"], "9515", "127.0.0.1").unwrap();
    let mut driver = launch(Path::new("/bin/sh"), &args).unwrap();
    assert!(driver.id().is_some());
    assert!(driver.try_exit_status().is_none());

    // WHEN: Killing twice
    let first = driver.kill().await.unwrap();
    let second = driver.kill().await.unwrap();

    // THEN: Only the first call killed it
    assert!(first);
    assert!(!second);
}

#[cfg(unix)]
#[tokio::test]
async fn given_driver_that_exits_when_polled_then_exit_status_reported() {
    let args = rewrite_arguments(["-c", "exit 0"], "9515", "127.0.0.1").unwrap();
    let mut driver = launch(Path::new("/bin/sh"), &args).unwrap();

    let mut status = None;
    for _ in 0..50 {
        status = driver.try_exit_status();
        if status.is_some() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    assert!(status.is_some_and(|status| status.success()));
}
