use crate::error::model_error::ModelError;
use crate::{
    BridgeContext, DEFAULT_DRIVER_PORT, ErrorLocation, NetworkAddressPair, ProxyTarget,
};

use std::panic::Location;
use std::path::PathBuf;

/// Builder for creating validated BridgeContext instances.
///
/// Applies the configuration fallbacks: a missing host IP falls back to the
/// discovered host address, a missing host port to [`DEFAULT_DRIVER_PORT`].
/// Empty strings count as missing.
#[derive(Debug, Default)]
pub struct BridgeContextBuilder {
    driver_bin: Option<PathBuf>,
    addresses: Option<NetworkAddressPair>,
    host_ip: Option<String>,
    host_port: Option<String>,
}

impl BridgeContextBuilder {
    pub fn with_driver_bin(mut self, path: impl Into<PathBuf>) -> Self {
        self.driver_bin = Some(path.into());
        self
    }

    pub fn with_addresses(mut self, addresses: NetworkAddressPair) -> Self {
        self.addresses = Some(addresses);
        self
    }

    pub fn with_host_ip(mut self, host_ip: Option<String>) -> Self {
        self.host_ip = host_ip.filter(|ip| !ip.is_empty());
        self
    }

    pub fn with_host_port(mut self, host_port: Option<String>) -> Self {
        self.host_port = host_port.filter(|port| !port.is_empty());
        self
    }

    /// Build the BridgeContext with validation.
    #[track_caller]
    pub fn build(self) -> Result<BridgeContext, ModelError> {
        let driver_bin = self.driver_bin.ok_or_else(|| ModelError::Validation {
            message: String::from("Driver binary path is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if driver_bin.as_os_str().is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Driver binary path cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let addresses = self.addresses.ok_or_else(|| ModelError::Validation {
            message: String::from("Network addresses are required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let host_ip = match self.host_ip {
            Some(ip) => ip,
            None if !addresses.host_address.is_empty() => addresses.host_address.clone(),
            None => {
                return Err(ModelError::Validation {
                    message: String::from(
                        "Windows host IP could not be resolved; set windows_host_ip in the configuration",
                    ),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        let host_port = self
            .host_port
            .unwrap_or_else(|| DEFAULT_DRIVER_PORT.to_string());

        let target = ProxyTarget::new(&host_ip, &host_port)?;

        Ok(BridgeContext {
            driver_bin,
            addresses,
            target,
        })
    }
}
