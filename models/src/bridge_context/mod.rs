pub mod builder;

use crate::{NetworkAddressPair, ProxyTarget};

use std::path::{Path, PathBuf};

/// Everything the bridge decided at startup.
///
/// Built once by [`builder::BridgeContextBuilder`] and passed by reference to
/// the launcher, the proxy, and the coordinator. Never mutated afterwards.
#[derive(Debug, Clone)]
pub struct BridgeContext {
    pub(crate) driver_bin: PathBuf,
    pub(crate) addresses: NetworkAddressPair,
    pub(crate) target: ProxyTarget,
}

impl BridgeContext {
    pub fn driver_bin(&self) -> &Path {
        &self.driver_bin
    }

    pub fn addresses(&self) -> &NetworkAddressPair {
        &self.addresses
    }

    pub fn target(&self) -> &ProxyTarget {
        &self.target
    }

    /// The `--port=` value handed to the driver.
    pub fn host_port(&self) -> String {
        self.target.port().to_string()
    }
}
