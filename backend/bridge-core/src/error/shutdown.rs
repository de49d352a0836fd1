use common::ErrorLocation;

use std::time::Duration;

use thiserror::Error as ThisError;

/// Failures during teardown. Logged, never propagated.
#[derive(Debug, ThisError)]
pub enum ShutdownError {
    #[error("Kill Error: {message} {location}")]
    Kill {
        message: String,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Deadline Exceeded Error: server did not drain within {deadline:?} {location}")]
    DeadlineExceeded {
        deadline: Duration,
        location: ErrorLocation,
    },

    #[error("Server Task Error: {message} {location}")]
    ServerTask {
        message: String,
        location: ErrorLocation,
    },
}
