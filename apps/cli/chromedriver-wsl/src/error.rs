use bridge_core::error::BridgeError;

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

/// Exit code for every startup failure.
pub const STARTUP_FAILURE_EXIT_CODE: u8 = 1;

/// Errors that end the bridge before it starts serving.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration, address resolution, driver launch or listener bind failed.
    #[error("Startup Error: {message} {location}")]
    Startup {
        message: String,
        location: ErrorLocation,
        #[source]
        source: BridgeError,
    },

    /// The log dispatcher could not be installed. Reported, never fatal.
    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },
}

impl AppError {
    /// Wrap a bridge failure with what the app was doing at the time.
    #[track_caller]
    pub fn startup(context: &str, source: impl Into<BridgeError>) -> Self {
        let source = source.into();
        AppError::Startup {
            message: format!("{context}: {source}"),
            location: ErrorLocation::from(Location::caller()),
            source,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Startup { .. } | AppError::Logger { .. } => STARTUP_FAILURE_EXIT_CODE,
        }
    }
}
