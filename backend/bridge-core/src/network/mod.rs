//! Address discovery for the WSL virtual network.
//!
//! Under WSL 2 the VM's primary adapter (`eth0`) sits on a small NAT subnet whose
//! first host address belongs to Windows. This module reads that adapter and
//! derives both ends:
//!
//! - the VM's own IPv4 address, handed to the driver as its allow-list
//! - the Windows host address (subnet network address + 1), used as the proxy target
//!
//! Resolution never fails. When nothing usable is found the pair is empty and the
//! caller decides what to fall back to.

pub mod resolver;

pub use resolver::{InterfaceAddress, host_address_for, resolve, resolve_from};
