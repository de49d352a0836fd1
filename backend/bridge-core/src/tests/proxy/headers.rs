// Unit tests for header rewriting applied by the forwarding proxy

use crate::proxy::headers::{inbound_response_headers, outbound_request_headers, strip_hop_by_hop};

use std::net::{IpAddr, Ipv4Addr};

use axum::http::header::{CONNECTION, CONTENT_LENGTH, CONTENT_TYPE, HOST, TRANSFER_ENCODING};
use axum::http::{HeaderMap, HeaderValue};

fn peer() -> Option<IpAddr> {
    Some(IpAddr::V4(Ipv4Addr::new(172, 20, 1, 5)))
}

/// **VALUE**: Verifies end-to-end headers survive while hop-by-hop headers are removed.
///
/// **WHY THIS MATTERS**: WebDriver clients send `Content-Type` and custom headers the driver
/// relies on. Connection-scoped headers like `Transfer-Encoding` would corrupt the new hop.
#[test]
fn given_mixed_headers_when_stripped_then_only_end_to_end_headers_remain() {
    // GIVEN: End-to-end and hop-by-hop headers
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("x-session-tag", HeaderValue::from_static("abc"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert("keep-alive", HeaderValue::from_static("timeout=5"));
    headers.insert(TRANSFER_ENCODING, HeaderValue::from_static("chunked"));

    // WHEN: Stripping
    strip_hop_by_hop(&mut headers);

    // THEN: Only end-to-end headers remain
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    assert_eq!(headers.get("x-session-tag").unwrap(), "abc");
    assert!(headers.get(CONNECTION).is_none());
    assert!(headers.get("keep-alive").is_none());
    assert!(headers.get(TRANSFER_ENCODING).is_none());
}

/// **BUG THIS CATCHES**: Would catch headers listed in `Connection` leaking to the driver.
#[test]
fn given_connection_named_header_when_stripped_then_named_header_removed() {
    let mut headers = HeaderMap::new();
    headers.insert(CONNECTION, HeaderValue::from_static("close, X-Hop-Only"));
    headers.insert("x-hop-only", HeaderValue::from_static("1"));
    headers.insert("x-keep", HeaderValue::from_static("1"));

    strip_hop_by_hop(&mut headers);

    assert!(headers.get("x-hop-only").is_none());
    assert!(headers.get("x-keep").is_some());
}

/// **VALUE**: Verifies the caller's `Host` survives while `Content-Length` is recomputed.
///
/// **BUG THIS CATCHES**: Replacing the caller's `Host: localhost:9515` with the Windows
/// authority, which changes what chromedriver's host checks see, or a stale
/// `Content-Length` next to the re-sent body.
#[test]
fn given_request_headers_when_prepared_then_host_kept_and_length_dropped() {
    let mut headers = HeaderMap::new();
    headers.insert(HOST, HeaderValue::from_static("localhost:9515"));
    headers.insert(CONTENT_LENGTH, HeaderValue::from_static("17"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let headers = outbound_request_headers(headers, None);

    assert_eq!(headers.get(HOST).unwrap(), "localhost:9515");
    assert!(headers.get(CONTENT_LENGTH).is_none());
    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    assert!(headers.get("x-forwarded-for").is_none());
}

#[test]
fn given_peer_when_prepared_then_sets_forwarded_for() {
    let headers = outbound_request_headers(HeaderMap::new(), peer());

    assert_eq!(headers.get("x-forwarded-for").unwrap(), "172.20.1.5");
}

#[test]
fn given_prior_forwarded_for_when_prepared_then_appends_peer() {
    let mut headers = HeaderMap::new();
    headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.9"));

    let headers = outbound_request_headers(headers, peer());

    assert_eq!(
        headers.get("x-forwarded-for").unwrap(),
        "10.0.0.9, 172.20.1.5"
    );
}

#[test]
fn given_response_headers_when_prepared_then_keeps_content_type() {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_LENGTH, HeaderValue::from_static("2"));
    headers.insert(TRANSFER_ENCODING, HeaderValue::from_static("chunked"));

    let headers = inbound_response_headers(headers);

    assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    assert!(headers.get(CONTENT_LENGTH).is_none());
    assert!(headers.get(TRANSFER_ENCODING).is_none());
}
