use crate::helpers::{client, closed_port, start_proxy, target_for};

use models::ProxyTarget;

use wiremock::matchers::{body_string, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Method, path, end-to-end headers and response pass through unchanged.
///
/// **WHY THIS MATTERS**: WebDriver clients depend on exact paths (`/session/{id}/...`) and
/// JSON bodies. Any rewriting breaks the protocol.
#[tokio::test]
async fn given_get_request_when_proxied_then_driver_response_returned_verbatim() {
    // GIVEN: A driver answering GET /status
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .and(header("accept", "application/json"))
        .and(header("x-forwarded-for", "127.0.0.1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-driver", "chromedriver")
                .set_body_string(r#"{"value":{"ready":true}}"#),
        )
        .expect(1)
        .mount(&backend)
        .await;
    let proxy = start_proxy(target_for(&backend)).await;

    // WHEN: Requesting through the proxy
    let response = client()
        .get(proxy.url("/status"))
        .header("accept", "application/json")
        .send()
        .await
        .unwrap();

    // THEN: Status, headers and body are the driver's
    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["x-driver"], "chromedriver");
    assert_eq!(response.text().await.unwrap(), r#"{"value":{"ready":true}}"#);
    assert!(!proxy.signal.is_fired());
}

/// **VALUE**: The driver sees the `Host` the client sent, not its own authority.
///
/// **BUG THIS CATCHES**: Would catch the proxy letting the HTTP client substitute the
/// Windows-side `host:port`, which changes what chromedriver's host checks evaluate.
#[tokio::test]
async fn given_client_host_header_when_proxied_then_host_forwarded_unchanged() {
    // GIVEN: A driver that only answers when Host is the proxy's address
    let backend = MockServer::start().await;
    let proxy = start_proxy(target_for(&backend)).await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .and(header("host", proxy.addr.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&backend)
        .await;

    // WHEN: Requesting through the proxy
    let response = client().get(proxy.url("/status")).send().await.unwrap();

    // THEN: The Host header reached the driver unchanged
    assert_eq!(response.status(), 200);
    assert_ne!(proxy.addr, *backend.address());
}

#[tokio::test]
async fn given_post_with_body_when_proxied_then_body_forwarded() {
    let backend = MockServer::start().await;
    let payload = r#"{"capabilities":{"alwaysMatch":{"browserName":"chrome"}}}"#;
    Mock::given(method("POST"))
        .and(path("/session"))
        .and(body_string(payload))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"value":{"sessionId":"abc"}}"#))
        .expect(1)
        .mount(&backend)
        .await;
    let proxy = start_proxy(target_for(&backend)).await;

    let response = client()
        .post(proxy.url("/session"))
        .header("content-type", "application/json")
        .body(payload)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.text().await.unwrap().contains("abc"));
}

#[tokio::test]
async fn given_query_string_when_proxied_then_query_preserved() {
    let backend = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/session/abc/window"))
        .and(query_param("force", "true"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&backend)
        .await;
    let proxy = start_proxy(target_for(&backend)).await;

    let response = client()
        .delete(proxy.url("/session/abc/window?force=true"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 204);
}

/// **VALUE**: Driver errors are relayed, not replaced by proxy errors.
///
/// **BUG THIS CATCHES**: Would catch the proxy turning a driver-side 404/500 into a 502,
/// hiding the WebDriver error payload from the client.
#[tokio::test]
async fn given_driver_error_status_when_proxied_then_status_and_body_passed_through() {
    let backend = MockServer::start().await;
    Mock::given(path("/session/missing/url"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"value":{"error":"invalid session id"}}"#),
        )
        .mount(&backend)
        .await;
    Mock::given(path("/session/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&backend)
        .await;
    let proxy = start_proxy(target_for(&backend)).await;

    let not_found = client()
        .get(proxy.url("/session/missing/url"))
        .send()
        .await
        .unwrap();
    let server_error = client()
        .get(proxy.url("/session/broken"))
        .send()
        .await
        .unwrap();

    assert_eq!(not_found.status(), 404);
    assert!(not_found.text().await.unwrap().contains("invalid session id"));
    assert_eq!(server_error.status(), 500);
    assert_eq!(server_error.text().await.unwrap(), "boom");
}

/// **VALUE**: An unreachable driver fails only that request with 502.
///
/// **WHY THIS MATTERS**: chromedriver on Windows may still be starting when the first
/// request arrives. The bridge has to survive that and serve the retry.
#[tokio::test]
async fn given_unreachable_driver_when_proxied_then_bad_gateway_and_server_keeps_running() {
    // GIVEN: A target port with nothing listening
    let port = closed_port().await;
    let target = ProxyTarget::new("127.0.0.1", &port.to_string()).unwrap();
    let proxy = start_proxy(target).await;

    // WHEN: Two requests in a row
    let first = client().get(proxy.url("/status")).send().await.unwrap();
    let second = client().get(proxy.url("/status")).send().await.unwrap();

    // THEN: Both 502, server still alive
    assert_eq!(first.status(), 502);
    assert!(first.text().await.unwrap().starts_with("Upstream Error:"));
    assert_eq!(second.status(), 502);
    assert!(!proxy.handle.is_finished());
    assert!(!proxy.signal.is_fired());
}
