use crate::helpers::{client, closed_port, start_proxy, target_for};

use models::ProxyTarget;

use std::time::Duration;

use tokio::time::timeout as TokioTimeout;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: `/shutdown` is forwarded, answered, and only then stops the bridge.
///
/// **WHY THIS MATTERS**: Selenium waits for the driver's reply to `/shutdown`. If the bridge
/// stopped before relaying it the client would report a failed quit.
#[tokio::test]
async fn given_shutdown_request_when_driver_answers_then_response_delivered_and_signal_fired() {
    // GIVEN: A driver that answers /shutdown
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/shutdown"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Shutting down"))
        .expect(1)
        .mount(&backend)
        .await;
    let proxy = start_proxy(target_for(&backend)).await;

    // WHEN: Requesting /shutdown through the proxy
    let response = client().get(proxy.url("/shutdown")).send().await.unwrap();

    // THEN: Caller gets the driver's reply and the signal has fired
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "Shutting down");
    assert!(proxy.signal.is_fired());

    // AND: The server drains on its own
    let drained = TokioTimeout(Duration::from_secs(5), proxy.handle)
        .await
        .expect("server drains");
    assert!(drained.is_ok());
}

/// **VALUE**: The trigger matches the path exactly, for any method or status.
///
/// **BUG THIS CATCHES**: Would catch a substring match shutting the bridge down on
/// `/session/x/shutdown`-style paths or a query-string variant being missed.
#[tokio::test]
async fn given_other_paths_when_proxied_then_signal_not_fired() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&backend)
        .await;
    let proxy = start_proxy(target_for(&backend)).await;

    for path in ["/", "/status", "/shutdownx", "/session/abc/shutdown", "/shutdown/now"] {
        let response = client().get(proxy.url(path)).send().await.unwrap();
        assert_eq!(response.status(), 200, "{path}");
    }

    assert!(!proxy.signal.is_fired());
}

#[tokio::test]
async fn given_shutdown_with_query_and_error_status_when_proxied_then_signal_fired() {
    let backend = MockServer::start().await;
    Mock::given(path("/shutdown"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&backend)
        .await;
    let proxy = start_proxy(target_for(&backend)).await;

    let response = client()
        .post(proxy.url("/shutdown?reason=test"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    assert!(proxy.signal.is_fired());
}

/// **VALUE**: Without a driver response there is nothing to relay, so no shutdown.
#[tokio::test]
async fn given_unreachable_driver_when_shutdown_requested_then_signal_not_fired() {
    let port = closed_port().await;
    let target = ProxyTarget::new("127.0.0.1", &port.to_string()).unwrap();
    let proxy = start_proxy(target).await;

    let response = client().get(proxy.url("/shutdown")).send().await.unwrap();

    assert_eq!(response.status(), 502);
    assert!(!proxy.signal.is_fired());
    assert!(!proxy.handle.is_finished());
}
