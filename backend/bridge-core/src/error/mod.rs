pub mod config;
pub mod launch;
pub mod proxy;
pub mod shutdown;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Launch(#[from] launch::LaunchError),

    #[error(transparent)]
    Proxy(#[from] proxy::ProxyError),

    #[error(transparent)]
    Model(#[from] models::ModelError),
}
