use crate::error::launch::LaunchError;
use crate::{ALLOWED_IPS_FLAG, DEFAULT_DRIVER_PORT, PORT_ARG_PREFIX};

use common::ErrorLocation;

use std::panic::Location;

use log::{debug, warn};

/// Driver command line after rewriting, plus the port the bridge itself listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverArguments {
    listen_port: u16,
    args: Vec<String>,
}

impl DriverArguments {
    /// Local port taken from the caller's `--port=` (default 9515).
    pub fn listen_port(&self) -> u16 {
        self.listen_port
    }

    /// Arguments to pass to the driver, in order.
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// Rewrite the caller's arguments for the host-side driver.
///
/// Every `--port=<value>` entry donates `<value>` as the listen port (the last one
/// wins) and is replaced with `--port=<host_port>`. `--allowed-ips <local_address>`
/// is appended. Everything else passes through untouched and in order.
///
/// # Errors
///
/// Returns [`LaunchError::Validation`] if the listen port is not a valid non-zero port.
#[track_caller]
pub fn rewrite_arguments<I, S>(
    raw_args: I,
    host_port: &str,
    local_address: &str,
) -> Result<DriverArguments, LaunchError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut listen_port = DEFAULT_DRIVER_PORT.to_string();
    let mut args = Vec::new();

    for arg in raw_args {
        let arg = arg.into();
        match arg.strip_prefix(PORT_ARG_PREFIX) {
            Some(value) => {
                listen_port = value.to_string();
                args.push(format!("{PORT_ARG_PREFIX}{host_port}"));
            }
            None => args.push(arg),
        }
    }

    let listen_port = match listen_port.parse::<u16>() {
        Ok(0) | Err(_) => {
            return Err(LaunchError::Validation {
                message: format!("Invalid listen port '{listen_port}' in {PORT_ARG_PREFIX}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(port) => port,
    };

    if local_address.is_empty() {
        warn!("Local address is unknown; passing an empty {ALLOWED_IPS_FLAG} to the driver");
    }

    args.push(ALLOWED_IPS_FLAG.to_string());
    args.push(local_address.to_string());

    debug!("Driver arguments: {args:?} (bridge listens on {listen_port})");

    Ok(DriverArguments { listen_port, args })
}
