//! Domain models for the chromedriver WSL bridge.
//!
//! Pure data structures describing what the bridge resolved and configured at
//! startup. Nothing here touches the network or spawns processes.

pub mod bridge_context;
pub mod error;
pub mod network_address;
pub mod proxy_target;

#[cfg(test)]
mod tests;

pub use bridge_context::BridgeContext;
pub use bridge_context::builder::BridgeContextBuilder;
pub use common::ErrorLocation;
pub use error::model_error::ModelError;
pub use network_address::NetworkAddressPair;
pub use proxy_target::ProxyTarget;

/// Port chromedriver listens on when nobody says otherwise.
pub const DEFAULT_DRIVER_PORT: &str = "9515";

/// Scheme used for every forwarded request.
pub const PROXY_SCHEME: &str = "http";
