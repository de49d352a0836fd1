use models::NetworkAddressPair;

use std::net::{IpAddr, Ipv4Addr};

use log::{debug, trace, warn};
use sysinfo::Networks;

const IPV4_BITS: u8 = 32;

/// One address assigned to an interface, with its subnet prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceAddress {
    pub addr: IpAddr,
    pub prefix: u8,
}

impl InterfaceAddress {
    pub fn new(addr: impl Into<IpAddr>, prefix: u8) -> Self {
        Self {
            addr: addr.into(),
            prefix,
        }
    }
}

/// Compute the address adjacent to the subnet's network address.
///
/// The address is masked to its network address and incremented as a big-endian
/// u32. Returns `None` for prefixes longer than 32 bits or when the increment
/// would overflow past `255.255.255.255`.
pub fn host_address_for(local: Ipv4Addr, prefix: u8) -> Option<Ipv4Addr> {
    if prefix > IPV4_BITS {
        return None;
    }

    let mask = u32::MAX
        .checked_shl(u32::from(IPV4_BITS - prefix))
        .unwrap_or(0);
    let network = u32::from(local) & mask;

    network.checked_add(1).map(Ipv4Addr::from)
}

/// Select the VM and host addresses from an enumerated interface list.
///
/// Only the first interface named `interface_name` is considered, and on it the
/// first IPv4 address in enumeration order.
pub fn resolve_from<I, A>(interface_name: &str, interfaces: I) -> NetworkAddressPair
where
    I: IntoIterator<Item = (String, A)>,
    A: IntoIterator<Item = InterfaceAddress>,
{
    let Some((_, addresses)) = interfaces
        .into_iter()
        .find(|(name, _)| name == interface_name)
    else {
        warn!("Network interface {interface_name} not found");
        return NetworkAddressPair::unresolved();
    };

    for address in addresses {
        let IpAddr::V4(local) = address.addr else {
            trace!("Skipping non-IPv4 address {} on {interface_name}", address.addr);
            continue;
        };

        return match host_address_for(local, address.prefix) {
            Some(host) => {
                debug!(
                    "Resolved {interface_name}: local {local}/{}, host {host}",
                    address.prefix
                );
                NetworkAddressPair::new(local.to_string(), host.to_string())
            }
            None => {
                warn!(
                    "Cannot derive host address from {local}/{} on {interface_name}",
                    address.prefix
                );
                NetworkAddressPair::unresolved()
            }
        };
    }

    warn!("Network interface {interface_name} has no IPv4 address");
    NetworkAddressPair::unresolved()
}

/// Resolve the VM and host addresses from the live interface table.
///
/// # Returns
///
/// The resolved pair, or an empty pair if the interface is missing or carries no
/// IPv4 address. Never errors.
pub fn resolve(interface_name: &str) -> NetworkAddressPair {
    let networks = Networks::new_with_refreshed_list();

    trace!("Inspecting {} network interfaces", networks.list().len());

    let interfaces = networks.list().iter().map(|(name, data)| {
        let addresses: Vec<InterfaceAddress> = data
            .ip_networks()
            .iter()
            .map(|network| InterfaceAddress::new(network.addr, network.prefix))
            .collect();
        (name.clone(), addresses)
    });

    resolve_from(interface_name, interfaces)
}
