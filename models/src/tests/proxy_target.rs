use crate::{ModelError, ProxyTarget};

use std::net::Ipv4Addr;

/// **VALUE**: Verifies the URL pieces the proxy splices into every forwarded request.
///
/// **WHY THIS MATTERS**: Each request's scheme and authority are replaced with these values.
/// A wrong format here sends every WebDriver command to the wrong place.
#[test]
fn given_valid_host_and_port_when_created_then_exposes_authority_and_base_url() {
    // GIVEN/WHEN: A target on the Windows host
    let target = ProxyTarget::new("172.20.0.1", "9515").unwrap();

    // THEN: Pieces are formatted for URL rewriting
    assert_eq!(target.scheme(), "http");
    assert_eq!(target.host(), Ipv4Addr::new(172, 20, 0, 1));
    assert_eq!(target.port(), 9515);
    assert_eq!(target.authority(), "172.20.0.1:9515");
    assert_eq!(target.base_url(), "http://172.20.0.1:9515");
}

/// **VALUE**: Rejects ports that cannot be listened on.
///
/// **BUG THIS CATCHES**: Would catch accepting "0", a non-numeric value, or an
/// out-of-range value, each of which would make the driver fail long after startup.
#[test]
fn given_invalid_ports_when_created_then_returns_validation_error() {
    for port in ["0", "abc", "65536", "", "-1"] {
        let result = ProxyTarget::new("172.20.0.1", port);

        match result {
            Err(ModelError::Validation { message, .. }) => {
                assert!(message.contains("port"), "Message should mention port: {message}");
            }
            Ok(target) => panic!("Port '{port}' should be rejected, got {target:?}"),
        }
    }
}

#[test]
fn given_non_ipv4_host_when_created_then_returns_validation_error() {
    for host in ["", "localhost", "::1", "300.1.1.1"] {
        assert!(
            ProxyTarget::new(host, "9515").is_err(),
            "Host '{host}' should be rejected"
        );
    }
}
