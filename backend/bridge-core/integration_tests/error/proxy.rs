use bridge_core::error::proxy::ProxyError;

use common::ErrorLocation;

use std::io::{Error as IoError, ErrorKind};
use std::panic::Location;

use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;

fn upstream_error() -> ProxyError {
    ProxyError::Upstream {
        message: "Failed to reach driver at 172.20.0.1:9515".to_string(),
        location: ErrorLocation::from(Location::caller()),
        source: Box::new(IoError::from(ErrorKind::ConnectionRefused)),
    }
}

/// **VALUE**: An unreachable driver becomes a 502 carrying the diagnostic.
///
/// **WHY THIS MATTERS**: The WebDriver client must see a gateway failure for that one
/// request while the bridge keeps serving.
#[tokio::test]
async fn given_upstream_error_when_rendered_then_bad_gateway_with_message() {
    // GIVEN: A connection failure
    let error = upstream_error();

    // WHEN: Rendering as a response
    let response = error.into_response();

    // THEN: 502 with the diagnostic in the body
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.starts_with("Upstream Error:"), "Got: {text}");
    assert!(text.contains("172.20.0.1:9515"), "Got: {text}");
}

#[test]
fn given_each_variant_when_status_requested_then_maps_to_expected_code() {
    let bind = ProxyError::Bind {
        addr: "0.0.0.0:9515".parse().unwrap(),
        message: "Address in use".to_string(),
        location: ErrorLocation::from(Location::caller()),
        source: IoError::from(ErrorKind::AddrInUse),
    };
    let invalid = ProxyError::InvalidTarget {
        message: "bad url".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };
    let body = ProxyError::Body {
        message: "truncated".to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    assert_eq!(upstream_error().status(), StatusCode::BAD_GATEWAY);
    assert_eq!(invalid.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body.status(), StatusCode::BAD_REQUEST);
    assert_eq!(bind.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn given_bind_error_when_displayed_then_includes_address() {
    let error = ProxyError::Bind {
        addr: "0.0.0.0:4444".parse().unwrap(),
        message: "Failed to bind proxy listener".to_string(),
        location: ErrorLocation::from(Location::caller()),
        source: IoError::from(ErrorKind::AddrInUse),
    };

    let display = error.to_string();

    assert!(display.starts_with("Bind Error: 0.0.0.0:4444"), "Got: {display}");
}
