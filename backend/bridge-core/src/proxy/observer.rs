use crate::SHUTDOWN_PATH;
use crate::lifecycle::{ShutdownReason, ShutdownSignal};

use axum::http::{Method, StatusCode};
use log::debug;

/// A request/response pair the driver has answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedExchange {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
}

/// Hook invoked for every response the driver produced, before it is returned to
/// the caller.
pub trait ResponseObserver: Send + Sync {
    fn observe(&self, exchange: &ObservedExchange);
}

/// Fires the shutdown signal once the driver has answered a `/shutdown` request.
#[derive(Debug, Clone)]
pub struct ShutdownTrigger {
    signal: ShutdownSignal,
    path: &'static str,
}

impl ShutdownTrigger {
    pub fn new(signal: ShutdownSignal) -> Self {
        Self {
            signal,
            path: SHUTDOWN_PATH,
        }
    }
}

impl ResponseObserver for ShutdownTrigger {
    fn observe(&self, exchange: &ObservedExchange) {
        if exchange.path == self.path {
            debug!(
                "Driver answered {} {} with {}",
                exchange.method, exchange.path, exchange.status
            );
            self.signal.fire(ShutdownReason::ShutdownRequest);
        }
    }
}
