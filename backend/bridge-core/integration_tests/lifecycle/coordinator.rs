use crate::helpers::{client, start_proxy, target_for};

use bridge_core::launcher::{DriverProcess, launch, rewrite_arguments};
use bridge_core::lifecycle::{LifecycleCoordinator, LifecycleState, ShutdownReason, ShutdownSignal};
use bridge_core::proxy::ServerHandle;

use std::path::Path;
use std::time::{Duration, Instant};

use tokio::time::timeout as TokioTimeout;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test helper: A long-running stand-in for the driver.
fn sleeping_driver() -> DriverProcess {
    let args = rewrite_arguments(["-c", "sleep 30"], "9515", "127.0.0.1").unwrap();
    launch(Path::new("/bin/sh"), &args).unwrap()
}

/// Test helper: A server task that never finishes on its own.
fn idle_server() -> ServerHandle {
    tokio::spawn(std::future::pending())
}

/// **VALUE**: The full `/shutdown` flow: response delivered, driver killed, server drained.
///
/// **WHY THIS MATTERS**: This is how every Selenium session ends. If any step is missed the
/// Windows chromedriver lingers or the WebDriver client hangs waiting for its reply.
#[cfg(unix)]
#[tokio::test]
async fn given_shutdown_request_when_coordinating_then_driver_killed_and_server_drained() {
    // GIVEN: A backend that answers /shutdown, a proxy in front of it, a live driver
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shutdown"))
        .respond_with(ResponseTemplate::new(200).set_body_string("bye"))
        .mount(&backend)
        .await;

    let proxy = start_proxy(target_for(&backend)).await;
    let url = proxy.url("/shutdown");
    let mut coordinator =
        LifecycleCoordinator::new(proxy.signal.clone(), Some(sleeping_driver()), proxy.handle)
            .with_os_signals(false);
    assert_eq!(coordinator.state(), LifecycleState::Running);

    // WHEN: The client requests /shutdown while the coordinator runs
    let request = tokio::spawn(async move { client().get(url).send().await });
    let report = TokioTimeout(Duration::from_secs(10), coordinator.run())
        .await
        .expect("coordinator finishes");

    // THEN: Client got the driver's reply; driver killed; server drained
    let response = request.await.unwrap().unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "bye");

    assert_eq!(report.reason, ShutdownReason::ShutdownRequest);
    assert!(report.driver_killed);
    assert!(report.drained);
    assert_eq!(coordinator.state(), LifecycleState::Terminated);
}

/// **VALUE**: A request stuck in flight cannot hold shutdown past the deadline.
///
/// **BUG THIS CATCHES**: Would catch an unbounded graceful drain, where a hung driver call
/// keeps the bridge alive forever after Ctrl-C. Also catches abandoning only the accept
/// loop: the stuck connection must be dropped, not left to deliver a late response.
#[cfg(unix)]
#[tokio::test]
async fn given_hung_request_when_shutting_down_then_drain_abandoned_at_deadline() {
    // GIVEN: A backend that takes far longer than the deadline to answer
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(4)))
        .mount(&backend)
        .await;

    let proxy = start_proxy(target_for(&backend)).await;
    let signal = proxy.signal.clone();
    let url = proxy.url("/session");
    let mut coordinator =
        LifecycleCoordinator::new(signal.clone(), Some(sleeping_driver()), proxy.handle)
            .with_shutdown_deadline(Duration::from_millis(500))
            .with_os_signals(false);

    let in_flight = tokio::spawn(async move { client().post(url).body("{}").send().await });
    tokio::time::sleep(Duration::from_millis(300)).await;

    // WHEN: Shutdown is requested while the request hangs
    signal.fire(ShutdownReason::Interrupt);
    let started = Instant::now();
    let report = TokioTimeout(Duration::from_secs(10), coordinator.run())
        .await
        .expect("coordinator finishes");

    // THEN: Finished shortly after the deadline without a clean drain
    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(report.reason, ShutdownReason::Interrupt);
    assert!(report.driver_killed);
    assert!(!report.drained);
    assert_eq!(coordinator.state(), LifecycleState::Terminated);

    // AND: The stuck request was cut off instead of completing late
    let outcome = TokioTimeout(Duration::from_secs(10), in_flight)
        .await
        .expect("in-flight request resolves")
        .unwrap();
    assert!(
        outcome.is_err(),
        "Expected dropped connection, got {:?}",
        outcome.map(|response| response.status())
    );
}

/// **VALUE**: The server dying on its own still tears the driver down.
#[cfg(unix)]
#[tokio::test]
async fn given_server_stops_early_when_coordinating_then_shuts_down_with_server_stopped() {
    let signal = ShutdownSignal::new();
    let server: ServerHandle = tokio::spawn(async {});
    let mut coordinator = LifecycleCoordinator::new(signal.clone(), Some(sleeping_driver()), server)
        .with_os_signals(false);

    let report = TokioTimeout(Duration::from_secs(5), coordinator.run())
        .await
        .expect("coordinator finishes");

    assert_eq!(report.reason, ShutdownReason::ServerStopped);
    assert!(report.driver_killed);
    assert!(report.drained);
    assert_eq!(signal.reason(), Some(ShutdownReason::ServerStopped));
}

#[tokio::test]
async fn given_no_driver_when_signal_fires_then_report_shows_nothing_killed() {
    let signal = ShutdownSignal::new();
    let mut coordinator = LifecycleCoordinator::new(signal.clone(), None, idle_server())
        .with_shutdown_deadline(Duration::from_millis(100))
        .with_os_signals(false);

    signal.fire(ShutdownReason::Terminate);
    let report = coordinator.run().await;

    assert_eq!(report.reason, ShutdownReason::Terminate);
    assert!(!report.driver_killed);
    assert!(!report.drained);
}

/// **VALUE**: A driver that already exited is not killed again.
#[cfg(unix)]
#[tokio::test]
async fn given_driver_already_exited_when_shutting_down_then_kill_skipped() {
    let args = rewrite_arguments(["-c", "exit 0"], "9515", "127.0.0.1").unwrap();
    let driver = launch(Path::new("/bin/sh"), &args).unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;

    let signal = ShutdownSignal::new();
    let server: ServerHandle = tokio::spawn(async {});
    signal.fire(ShutdownReason::ShutdownRequest);
    let mut coordinator =
        LifecycleCoordinator::new(signal, Some(driver), server).with_os_signals(false);

    let report = coordinator.run().await;

    assert_eq!(report.reason, ShutdownReason::ShutdownRequest);
    assert!(!report.driver_killed);
}
