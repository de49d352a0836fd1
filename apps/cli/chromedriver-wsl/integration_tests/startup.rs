use crate::helpers::{config_dir, free_port};

use chromedriver_wsl::app::run;
use chromedriver_wsl::error::AppError;

use bridge_core::error::BridgeError;
use bridge_core::lifecycle::ShutdownReason;

use std::time::Duration;

use reqwest::Client;
use tokio::net::TcpListener;
use tokio::time::timeout as TokioTimeout;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test helper: Config using `/bin/sh` as the driver and `backend` as the host side.
fn shell_driver_config(backend: &MockServer) -> String {
    format!(
        r#"{{
            "chromedriver_bin": "/bin/sh",
            "windows_host_ip": "127.0.0.1",
            "windows_host_port": "{}",
            "log_level": "debug"
        }}"#,
        backend.address().port()
    )
}

fn client() -> Client {
    Client::builder()
        .no_proxy()
        .build()
        .expect("HTTP client builds")
}

/// **VALUE**: End to end: arguments rewritten, proxy serving, `/shutdown` ends the run.
///
/// **WHY THIS MATTERS**: This is the whole bridge as a Selenium session sees it. Start,
/// forward, quit, exit 0.
#[cfg(unix)]
#[tokio::test]
async fn given_valid_config_when_shutdown_requested_then_run_returns_report() {
    // GIVEN: A fake driver backend and a shell standing in for chromedriver
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ready"))
        .mount(&backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/shutdown"))
        .respond_with(ResponseTemplate::new(200).set_body_string("bye"))
        .expect(1)
        .mount(&backend)
        .await;
    let dir = config_dir(&shell_driver_config(&backend));
    let listen_port = free_port().await;
    let args = vec![
        "-c".to_string(),
        "sleep 30".to_string(),
        format!("--port={listen_port}"),
    ];

    // WHEN: Running the bridge and talking to it
    let bridge = tokio::spawn(async move { run(dir.path(), args).await });

    let status_url = format!("http://127.0.0.1:{listen_port}/status");
    let mut status = None;
    for _ in 0..50 {
        if let Ok(response) = client().get(&status_url).send().await {
            status = Some(response);
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let status = status.expect("bridge starts listening");
    assert_eq!(status.text().await.unwrap(), "ready");

    let shutdown = client()
        .get(format!("http://127.0.0.1:{listen_port}/shutdown"))
        .send()
        .await
        .unwrap();
    assert_eq!(shutdown.text().await.unwrap(), "bye");

    // THEN: The run ends cleanly after /shutdown
    let report = TokioTimeout(Duration::from_secs(10), bridge)
        .await
        .expect("bridge shuts down")
        .unwrap()
        .unwrap();
    assert_eq!(report.reason, ShutdownReason::ShutdownRequest);
    assert!(report.driver_killed);
}

#[tokio::test]
async fn given_missing_config_when_running_then_startup_error() {
    let dir = tempfile::tempdir().unwrap();

    let result = run(dir.path(), Vec::<String>::new()).await;

    match result {
        Err(AppError::Startup { source, .. }) => {
            assert!(matches!(source, BridgeError::Config(_)));
        }
        other => panic!("Expected Startup error, got {other:?}"),
    }
}

/// **VALUE**: An invalid `--port=` fails startup before the driver is launched.
#[tokio::test]
async fn given_invalid_listen_port_when_running_then_startup_error_before_launch() {
    let dir = config_dir(
        r#"{ "chromedriver_bin": "/nonexistent/chromedriver.exe", "windows_host_ip": "127.0.0.1" }"#,
    );

    let result = run(dir.path(), vec!["--port=http"]).await;

    match result {
        Err(error @ AppError::Startup { .. }) => {
            assert!(matches!(
                &error,
                AppError::Startup {
                    source: BridgeError::Launch(_),
                    ..
                }
            ));
            assert!(error.to_string().contains("Validation Error"));
            assert_eq!(error.exit_code(), 1);
        }
        other => panic!("Expected Startup error, got {other:?}"),
    }
}

/// **VALUE**: An occupied listen port is a startup failure, and the driver is not leaked.
///
/// **BUG THIS CATCHES**: Would catch the bridge exiting with the driver still running on the
/// Windows side after failing to bind.
#[cfg(unix)]
#[tokio::test]
async fn given_listen_port_taken_when_running_then_bind_error() {
    let backend = MockServer::start().await;
    let dir = config_dir(&shell_driver_config(&backend));
    let occupied = TcpListener::bind("0.0.0.0:0").await.unwrap();
    let port = occupied.local_addr().unwrap().port();

    let result = run(
        dir.path(),
        vec!["-c".to_string(), "sleep 30".to_string(), format!("--port={port}")],
    )
    .await;

    match result {
        Err(error) => {
            assert!(matches!(
                &error,
                AppError::Startup {
                    source: BridgeError::Proxy(_),
                    ..
                }
            ));
            assert!(error.to_string().contains("Bind Error"), "Got: {error}");
        }
        Ok(report) => panic!("Expected bind failure, got {report:?}"),
    }
}
