use crate::helpers::write_config;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::{TempDir, tempdir};

/// Test helper: Copy the built binary into a fresh directory so it finds (or misses) the
/// config file we control.
fn isolated_binary() -> (TempDir, PathBuf) {
    let dir = tempdir().expect("temp dir");
    let binary = dir.path().join("chromedriver-wsl");
    fs::copy(env!("CARGO_BIN_EXE_chromedriver-wsl"), &binary).expect("copy binary");
    (dir, binary)
}

fn run_binary(binary: &Path, args: &[&str]) -> Output {
    Command::new(binary)
        .args(args)
        .output()
        .expect("binary runs")
}

/// **VALUE**: Without a config file the bridge exits 1 and names the file it wanted.
///
/// **WHY THIS MATTERS**: A WebDriver client that launches the bridge only sees the exit code
/// and stderr. Both must say what went wrong.
#[test]
fn given_no_config_file_when_binary_runs_then_exits_one_naming_config_file() {
    // GIVEN: The binary alone in a directory
    let (_dir, binary) = isolated_binary();

    // WHEN: Running it
    let output = run_binary(&binary, &["--port=4444"]);

    // THEN: Exit code 1 with the config file in the diagnostic
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("chromedriver_wsl_config.json"), "Got: {stderr}");
}

/// **VALUE**: A missing `chromedriver_bin` exits 1 with the setup hint, before listening.
///
/// **BUG THIS CATCHES**: Would catch the bridge opening its port (or launching nothing)
/// while misconfigured, leaving the client to time out instead of failing fast.
#[test]
fn given_config_without_driver_bin_when_binary_runs_then_exits_one_with_setup_hint() {
    let (dir, binary) = isolated_binary();
    write_config(dir.path(), r#"{ "windows_host_ip": "127.0.0.1" }"#);

    let output = run_binary(&binary, &[]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Please setup chromedriver_bin to chromedriver_wsl_config.json."),
        "Got: {stderr}"
    );
}

#[test]
fn given_nonexistent_driver_bin_when_binary_runs_then_exits_one() {
    let (dir, binary) = isolated_binary();
    write_config(
        dir.path(),
        r#"{ "chromedriver_bin": "/nonexistent/chromedriver.exe", "windows_host_ip": "127.0.0.1" }"#,
    );

    let output = run_binary(&binary, &["--port=4444"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Spawn Error"), "Got: {stderr}");
}
