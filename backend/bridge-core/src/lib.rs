pub mod config;
pub mod error;
pub mod launcher;
pub mod lifecycle;
pub mod network;
pub mod proxy;

#[cfg(test)]
mod tests;

pub use models::DEFAULT_DRIVER_PORT;

pub const CONFIG_FILE_NAME: &str = "chromedriver_wsl_config.json";
pub const DRIVER_INTERFACE: &str = "eth0";
pub const SHUTDOWN_PATH: &str = "/shutdown";
pub const PORT_FLAG: &str = "--port";
pub const PORT_ARG_PREFIX: &str = const_format::concatcp!(PORT_FLAG, "=");
pub const ALLOWED_IPS_FLAG: &str = "--allowed-ips";
