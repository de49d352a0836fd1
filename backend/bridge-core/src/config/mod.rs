use crate::error::config::ConfigError;
use crate::{CONFIG_FILE_NAME, DRIVER_INTERFACE};

use common::ErrorLocation;

use std::env::current_exe;
use std::net::Ipv4Addr;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{LevelFilter, info, warn};
use serde::Deserialize;

const MISSING_DRIVER_BIN_MESSAGE: &str =
    const_format::concatcp!("Please setup chromedriver_bin to ", CONFIG_FILE_NAME, ".");

// ============================================
// CONFIG STRUCT
// ============================================

/// Contents of `chromedriver_wsl_config.json`.
///
/// ```json
/// {
///   "chromedriver_bin": "/mnt/c/tools/chromedriver.exe",
///   "windows_host_ip": "172.20.0.1",
///   "windows_host_port": "9515"
/// }
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BridgeConfig {
    #[serde(default)]
    pub chromedriver_bin: String,

    #[serde(default)]
    pub windows_host_ip: Option<String>,

    #[serde(default)]
    pub windows_host_port: Option<String>,

    #[serde(default = "default_network_interface")]
    pub network_interface: String,

    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            chromedriver_bin: String::new(),
            windows_host_ip: None,
            windows_host_port: None,
            network_interface: default_network_interface(),
            log_level: None,
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_network_interface() -> String {
    DRIVER_INTERFACE.to_string()
}

// ============================================
// IMPLEMENTATION
// ============================================

/// Directory containing the running executable. The config file and log file live here.
#[track_caller]
pub fn executable_dir() -> Result<PathBuf, ConfigError> {
    let exe = current_exe().map_err(|e| ConfigError::ExecutableError {
        location: ErrorLocation::from(Location::caller()),
        reason: format!("Failed to get current executable path: {e}"),
    })?;

    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| ConfigError::ExecutableError {
            location: ErrorLocation::from(Location::caller()),
            reason: format!("Executable has no parent directory: {}", exe.display()),
        })
}

impl BridgeConfig {
    /// Load and validate `{config_dir}/chromedriver_wsl_config.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing or unreadable, is not valid
    /// JSON, or fails [`BridgeConfig::validate`].
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read {}: {e}", config_path.display());
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: BridgeConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse {}: {e}", config_path.display());
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chromedriver_bin.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: MISSING_DRIVER_BIN_MESSAGE.to_string(),
            });
        }

        if let Some(ip) = self.host_ip()
            && ip.parse::<Ipv4Addr>().is_err()
        {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid windows_host_ip: {ip} (must be an IPv4 address)"),
            });
        }

        if let Some(port) = self.host_port()
            && !matches!(port.parse::<u16>(), Ok(p) if p != 0)
        {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid windows_host_port: {port} (must be 1-65535)"),
            });
        }

        if self.network_interface.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "network_interface cannot be empty string".to_string(),
            });
        }

        if let Some(level) = self.log_level.as_deref().filter(|level| !level.is_empty())
            && LevelFilter::from_str(level).is_err()
        {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid log_level: {level} (expected off, error, warn, info, debug or trace)"
                ),
            });
        }

        Ok(())
    }

    /// Host IP override, with `""` treated as unset.
    pub fn host_ip(&self) -> Option<&str> {
        self.windows_host_ip.as_deref().filter(|ip| !ip.is_empty())
    }

    /// Host port override, with `""` treated as unset.
    pub fn host_port(&self) -> Option<&str> {
        self.windows_host_port
            .as_deref()
            .filter(|port| !port.is_empty())
    }

    pub fn log_level_filter(&self) -> Option<LevelFilter> {
        self.log_level
            .as_deref()
            .and_then(|level| LevelFilter::from_str(level).ok())
    }
}
