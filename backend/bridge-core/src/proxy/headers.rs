use std::net::IpAddr;

use axum::http::header::{CONNECTION, CONTENT_LENGTH};
use axum::http::{HeaderMap, HeaderName, HeaderValue};

const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Headers that describe a single connection and must not be forwarded (RFC 9110 §7.6.1).
const HOP_BY_HOP_HEADERS: [&str; 9] = [
    "connection",
    "proxy-connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Remove hop-by-hop headers, including any named in `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let named: Vec<String> = headers
        .get_all(CONNECTION)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|token| token.trim().to_ascii_lowercase())
        .filter(|token| !token.is_empty())
        .collect();

    for name in named {
        headers.remove(name.as_str());
    }

    for name in HOP_BY_HOP_HEADERS {
        headers.remove(name);
    }
}

/// Prepare inbound request headers for the driver.
///
/// The caller's `Host` is kept, so the driver sees the authority the client
/// used. `Content-Length` is dropped and recomputed for the buffered body. The
/// caller's IP is appended to `X-Forwarded-For`.
pub fn outbound_request_headers(mut headers: HeaderMap, peer: Option<IpAddr>) -> HeaderMap {
    strip_hop_by_hop(&mut headers);
    headers.remove(CONTENT_LENGTH);

    if let Some(peer) = peer {
        let forwarded = match headers
            .get(&X_FORWARDED_FOR)
            .and_then(|value| value.to_str().ok())
        {
            Some(prior) => format!("{prior}, {peer}"),
            None => peer.to_string(),
        };

        if let Ok(value) = HeaderValue::from_str(&forwarded) {
            headers.insert(X_FORWARDED_FOR, value);
        }
    }

    headers
}

/// Prepare the driver's response headers for the caller.
pub fn inbound_response_headers(mut headers: HeaderMap) -> HeaderMap {
    strip_hop_by_hop(&mut headers);
    headers.remove(CONTENT_LENGTH);
    headers
}
