use bridge_core::network::{InterfaceAddress, host_address_for, resolve, resolve_from};

use models::NetworkAddressPair;

use std::net::{Ipv4Addr, Ipv6Addr};

fn eth0(addresses: Vec<InterfaceAddress>) -> Vec<(String, Vec<InterfaceAddress>)> {
    vec![("eth0".to_string(), addresses)]
}

// ----------------------------------------------------------------------------
// host_address_for() - subnet arithmetic
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies the host address on typical WSL 2 NAT subnets.
///
/// **WHY THIS MATTERS**: WSL 2 hands the VM an address in a /20 whose first host address is
/// the Windows side of the virtual switch. Getting this wrong sends every WebDriver command
/// to a dead address.
#[test]
fn given_wsl_subnets_when_computing_host_address_then_returns_network_plus_one() {
    let cases = [
        (Ipv4Addr::new(172, 20, 1, 5), 20, Ipv4Addr::new(172, 20, 0, 1)),
        (Ipv4Addr::new(172, 27, 190, 33), 20, Ipv4Addr::new(172, 27, 176, 1)),
        (Ipv4Addr::new(192, 168, 1, 77), 24, Ipv4Addr::new(192, 168, 1, 1)),
        (Ipv4Addr::new(10, 255, 255, 254), 8, Ipv4Addr::new(10, 0, 0, 1)),
    ];

    for (local, prefix, expected) in cases {
        assert_eq!(
            host_address_for(local, prefix),
            Some(expected),
            "{local}/{prefix}"
        );
    }
}

/// **VALUE**: Checks `host == (local & mask) + 1` across every prefix length.
///
/// **BUG THIS CATCHES**: Would catch mask arithmetic that shifts by 32 (a panic or an
/// all-ones mask) for `/0`, or that uses the wrong byte order for the increment.
#[test]
fn given_every_prefix_when_computing_host_address_then_matches_masked_increment() {
    let locals = [
        Ipv4Addr::new(172, 20, 1, 5),
        Ipv4Addr::new(10, 1, 2, 3),
        Ipv4Addr::new(192, 168, 200, 17),
    ];

    for local in locals {
        for prefix in 0..=32u8 {
            let mask = if prefix == 0 {
                0
            } else {
                u32::MAX << (32 - u32::from(prefix))
            };
            let expected = Ipv4Addr::from((u32::from(local) & mask) + 1);

            assert_eq!(
                host_address_for(local, prefix),
                Some(expected),
                "{local}/{prefix}"
            );
        }
    }
}

/// **VALUE**: The increment never wraps past `255.255.255.255`.
#[test]
fn given_broadcast_host_route_when_computing_host_address_then_returns_none() {
    assert_eq!(host_address_for(Ipv4Addr::BROADCAST, 32), None);
}

#[test]
fn given_prefix_longer_than_32_when_computing_host_address_then_returns_none() {
    assert_eq!(host_address_for(Ipv4Addr::new(172, 20, 1, 5), 33), None);
}

// ----------------------------------------------------------------------------
// resolve_from() - interface selection
// ----------------------------------------------------------------------------

#[test]
fn given_eth0_with_ipv4_when_resolving_then_returns_local_and_host() {
    let interfaces = eth0(vec![InterfaceAddress::new(Ipv4Addr::new(172, 20, 1, 5), 20)]);

    let pair = resolve_from("eth0", interfaces);

    assert_eq!(pair, NetworkAddressPair::new("172.20.1.5", "172.20.0.1"));
}

/// **VALUE**: IPv6 addresses on the adapter are skipped, not treated as failure.
///
/// **BUG THIS CATCHES**: Would catch resolution returning empty because the kernel listed a
/// link-local IPv6 address before the IPv4 one.
#[test]
fn given_ipv6_before_ipv4_when_resolving_then_uses_first_ipv4() {
    let interfaces = eth0(vec![
        InterfaceAddress::new(Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1), 64),
        InterfaceAddress::new(Ipv4Addr::new(172, 20, 1, 5), 20),
        InterfaceAddress::new(Ipv4Addr::new(10, 0, 0, 9), 8),
    ]);

    let pair = resolve_from("eth0", interfaces);

    assert_eq!(pair.local_address, "172.20.1.5");
    assert_eq!(pair.host_address, "172.20.0.1");
}

#[test]
fn given_only_ipv6_when_resolving_then_returns_empty_pair() {
    let interfaces = eth0(vec![InterfaceAddress::new(Ipv6Addr::LOCALHOST, 128)]);

    let pair = resolve_from("eth0", interfaces);

    assert_eq!(pair, NetworkAddressPair::unresolved());
}

/// **VALUE**: Other adapters never contribute addresses.
///
/// **BUG THIS CATCHES**: Would catch picking `lo` or a docker bridge, which would point the
/// proxy at the VM itself.
#[test]
fn given_interface_absent_when_resolving_then_returns_empty_pair() {
    let interfaces = vec![
        (
            "lo".to_string(),
            vec![InterfaceAddress::new(Ipv4Addr::LOCALHOST, 8)],
        ),
        (
            "docker0".to_string(),
            vec![InterfaceAddress::new(Ipv4Addr::new(172, 17, 0, 1), 16)],
        ),
    ];

    let pair = resolve_from("eth0", interfaces);

    assert!(pair.local_address.is_empty());
    assert!(pair.host_address.is_empty());
}

#[test]
fn given_custom_interface_name_when_resolving_then_matches_that_name() {
    let interfaces = vec![
        (
            "eth0".to_string(),
            vec![InterfaceAddress::new(Ipv4Addr::new(10, 0, 0, 2), 24)],
        ),
        (
            "eth1".to_string(),
            vec![InterfaceAddress::new(Ipv4Addr::new(192, 168, 50, 9), 24)],
        ),
    ];

    let pair = resolve_from("eth1", interfaces);

    assert_eq!(pair, NetworkAddressPair::new("192.168.50.9", "192.168.50.1"));
}

// ----------------------------------------------------------------------------
// resolve() - live interface table
// ----------------------------------------------------------------------------

/// **VALUE**: Live resolution of a missing adapter degrades to an empty pair.
///
/// **WHY THIS MATTERS**: The bridge must reach its own diagnostics (and the
/// `windows_host_ip` fallback) instead of crashing on hosts without `eth0`.
#[test]
fn given_nonexistent_interface_when_resolving_live_then_returns_empty_pair() {
    let pair = resolve("bridge-test-missing0");

    assert_eq!(pair, NetworkAddressPair::unresolved());
}
