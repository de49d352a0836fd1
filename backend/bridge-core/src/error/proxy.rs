use common::ErrorLocation;

use std::error::Error as StdError;
use std::net::SocketAddr;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ProxyError {
    #[error("Bind Error: {addr}: {message} {location}")]
    Bind {
        addr: SocketAddr,
        message: String,
        location: ErrorLocation,
        #[source]
        source: std::io::Error,
    },

    #[error("Upstream Error: {message} {location}")]
    Upstream {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Invalid Target Error: {message} {location}")]
    InvalidTarget {
        message: String,
        location: ErrorLocation,
    },

    #[error("Body Error: {message} {location}")]
    Body {
        message: String,
        location: ErrorLocation,
    },
}

impl ProxyError {
    /// Status returned to the WebDriver client when forwarding fails.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream { .. } | ProxyError::InvalidTarget { .. } => {
                StatusCode::BAD_GATEWAY
            }
            ProxyError::Body { .. } => StatusCode::BAD_REQUEST,
            ProxyError::Bind { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
