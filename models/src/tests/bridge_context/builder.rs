use crate::{BridgeContextBuilder, ModelError, NetworkAddressPair};

use std::path::Path;

fn resolved_addresses() -> NetworkAddressPair {
    NetworkAddressPair::new("172.20.1.5", "172.20.0.1")
}

/// **VALUE**: Verifies the host IP falls back to the discovered gateway address.
///
/// **WHY THIS MATTERS**: Most users never set `windows_host_ip`. The discovered address
/// is the only way the proxy knows where the driver is.
///
/// **BUG THIS CATCHES**: Would catch if the fallback is removed or the local address is
/// used by mistake, which would make the proxy forward to itself.
#[test]
fn given_no_overrides_when_building_then_uses_discovered_host_and_default_port() {
    // GIVEN: Builder with resolved addresses and no overrides
    let builder = BridgeContextBuilder::default()
        .with_driver_bin("/mnt/c/tools/chromedriver.exe")
        .with_addresses(resolved_addresses())
        .with_host_ip(None)
        .with_host_port(None);

    // WHEN: Building
    let context = builder.build().unwrap();

    // THEN: Target is the discovered host on the default port
    assert_eq!(context.target().authority(), "172.20.0.1:9515");
    assert_eq!(context.host_port(), "9515");
    assert_eq!(
        context.driver_bin(),
        Path::new("/mnt/c/tools/chromedriver.exe")
    );
    assert_eq!(context.addresses().local_address, "172.20.1.5");
}

#[test]
fn given_overrides_when_building_then_overrides_win() {
    let context = BridgeContextBuilder::default()
        .with_driver_bin("chromedriver.exe")
        .with_addresses(resolved_addresses())
        .with_host_ip(Some("192.168.1.10".to_string()))
        .with_host_port(Some("4444".to_string()))
        .build()
        .unwrap();

    assert_eq!(context.target().authority(), "192.168.1.10:4444");
    assert_eq!(context.host_port(), "4444");
}

/// **VALUE**: Empty strings from the JSON file behave like absent fields.
///
/// **BUG THIS CATCHES**: Would catch `"windows_host_ip": ""` being used verbatim,
/// producing an unparseable target instead of falling back.
#[test]
fn given_empty_overrides_when_building_then_falls_back() {
    let context = BridgeContextBuilder::default()
        .with_driver_bin("chromedriver.exe")
        .with_addresses(resolved_addresses())
        .with_host_ip(Some(String::new()))
        .with_host_port(Some(String::new()))
        .build()
        .unwrap();

    assert_eq!(context.target().authority(), "172.20.0.1:9515");
}

/// **VALUE**: Startup refuses to proceed with no host IP at all.
///
/// **WHY THIS MATTERS**: Without a host IP the proxy target would be invalid and every
/// request would fail with 502 while the bridge looks healthy. Failing at startup gives
/// the user a diagnostic instead.
#[test]
fn given_unresolved_addresses_and_no_override_when_building_then_returns_validation_error() {
    // GIVEN: Discovery found nothing and no override is configured
    let builder = BridgeContextBuilder::default()
        .with_driver_bin("chromedriver.exe")
        .with_addresses(NetworkAddressPair::unresolved());

    // WHEN: Building
    let result = builder.build();

    // THEN: Validation error mentioning the config key
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert!(message.contains("windows_host_ip"), "Got: {message}");
        }
        Ok(context) => panic!("Expected error, got {context:?}"),
    }
}

#[test]
fn given_unresolved_addresses_with_override_when_building_then_succeeds() {
    let context = BridgeContextBuilder::default()
        .with_driver_bin("chromedriver.exe")
        .with_addresses(NetworkAddressPair::unresolved())
        .with_host_ip(Some("10.0.0.1".to_string()))
        .build()
        .unwrap();

    assert_eq!(context.target().host().to_string(), "10.0.0.1");
}

#[test]
fn given_missing_driver_bin_when_building_then_returns_validation_error() {
    let result = BridgeContextBuilder::default()
        .with_addresses(resolved_addresses())
        .build();

    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "Driver binary path is required");
        }
        Ok(context) => panic!("Expected error, got {context:?}"),
    }
}

#[test]
fn given_empty_driver_bin_when_building_then_returns_validation_error() {
    let result = BridgeContextBuilder::default()
        .with_driver_bin("")
        .with_addresses(resolved_addresses())
        .build();

    assert!(result.is_err());
}
