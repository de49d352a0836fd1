use crate::lifecycle::{ShutdownReason, ShutdownSignal};

use std::future::pending;

use log::{debug, warn};
use tokio::spawn as TokioSpawn;
use tokio::task::JoinHandle;

/// Wait for an interrupt (Ctrl-C / SIGINT) or, on unix, a SIGTERM.
///
/// SIGKILL cannot be intercepted. If no handler can be installed the future never
/// resolves, leaving `/shutdown` as the only trigger.
pub async fn wait_for_os_signal() -> ShutdownReason {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                return tokio::select! {
                    Ok(()) = tokio::signal::ctrl_c() => ShutdownReason::Interrupt,
                    Some(()) = sigterm.recv() => ShutdownReason::Terminate,
                    else => pending().await,
                };
            }
            Err(e) => warn!("Failed to install SIGTERM handler: {e}"),
        }
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => ShutdownReason::Interrupt,
        Err(e) => {
            warn!("Failed to install interrupt handler: {e}");
            pending().await
        }
    }
}

/// Spawn a task that fires `signal` when the OS asks the bridge to stop.
pub fn spawn_os_signal_listener(signal: ShutdownSignal) -> JoinHandle<()> {
    TokioSpawn(async move {
        let reason = wait_for_os_signal().await;
        debug!("Received {reason}");
        signal.fire(reason);
    })
}
