use std::fmt::{Display, Formatter, Result as FormatResult};
use std::future::pending;
use std::sync::Arc;

use log::{debug, info};
use tokio::sync::watch;

/// What ended the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// A client requested `/shutdown` and the driver answered.
    ShutdownRequest,
    /// SIGINT / Ctrl-C.
    Interrupt,
    /// SIGTERM.
    Terminate,
    /// The proxy server task ended on its own.
    ServerStopped,
}

impl Display for ShutdownReason {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> FormatResult {
        let text = match self {
            ShutdownReason::ShutdownRequest => "shutdown request",
            ShutdownReason::Interrupt => "interrupt signal",
            ShutdownReason::Terminate => "termination signal",
            ShutdownReason::ServerStopped => "proxy server stopped",
        };
        formatter.write_str(text)
    }
}

/// Single-fire, broadcast-once shutdown event.
///
/// Cloning shares the same event. Only the first [`fire`](Self::fire) is recorded;
/// later calls are no-ops. Waiters that arrive after firing resolve immediately.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    sender: Arc<watch::Sender<Option<ShutdownReason>>>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Fire the event.
    ///
    /// # Returns
    ///
    /// * `true` - This call fired the event
    /// * `false` - The event had already fired; `reason` is discarded
    pub fn fire(&self, reason: ShutdownReason) -> bool {
        let fired = self.sender.send_if_modified(|state| {
            if state.is_some() {
                return false;
            }
            *state = Some(reason);
            true
        });

        if fired {
            info!("Shutdown triggered by {reason}");
        } else {
            debug!("Shutdown already triggered, ignoring {reason}");
        }

        fired
    }

    pub fn is_fired(&self) -> bool {
        self.sender.borrow().is_some()
    }

    /// The reason recorded by the first `fire`, if any.
    pub fn reason(&self) -> Option<ShutdownReason> {
        *self.sender.borrow()
    }

    /// Wait until the event fires and return the winning reason.
    pub async fn fired(&self) -> ShutdownReason {
        let mut receiver = self.sender.subscribe();
        let reason = receiver
            .wait_for(Option::is_some)
            .await
            .ok()
            .and_then(|state| *state);

        match reason {
            Some(reason) => reason,
            // The sender lives as long as `self`, so the channel cannot close.
            None => pending().await,
        }
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
