use crate::error::model_error::ModelError;
use crate::{ErrorLocation, PROXY_SCHEME};

use std::net::Ipv4Addr;
use std::panic::Location;

/// Where every proxied request is sent: the driver running on the Windows host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyTarget {
    host: Ipv4Addr,
    port: u16,
}

impl ProxyTarget {
    /// Validate a host IP and port pair as read from configuration or discovery.
    #[track_caller]
    pub fn new(host: &str, port: &str) -> Result<Self, ModelError> {
        let host = host.parse::<Ipv4Addr>().map_err(|e| ModelError::Validation {
            message: format!("Invalid target host '{host}': {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let port = match port.parse::<u16>() {
            Ok(0) | Err(_) => {
                return Err(ModelError::Validation {
                    message: format!("Invalid target port '{port}'"),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
            Ok(port) => port,
        };

        Ok(Self { host, port })
    }

    pub fn scheme(&self) -> &'static str {
        PROXY_SCHEME
    }

    pub fn host(&self) -> Ipv4Addr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port`, as placed in the rewritten request URL.
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn base_url(&self) -> String {
        format!("{}://{}", PROXY_SCHEME, self.authority())
    }
}
