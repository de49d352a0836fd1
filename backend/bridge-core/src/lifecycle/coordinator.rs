use crate::error::shutdown::ShutdownError;
use crate::launcher::DriverProcess;
use crate::lifecycle::{ShutdownReason, ShutdownSignal, spawn_os_signal_listener};
use crate::proxy::ServerHandle;

use common::ErrorLocation;

use std::panic::Location;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::time::timeout as TokioTimeout;

/// How long in-flight requests get to finish once shutdown begins.
pub const SHUTDOWN_DEADLINE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Running,
    ShuttingDown,
    Terminated,
}

/// Outcome of a completed shutdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShutdownReport {
    pub reason: ShutdownReason,
    /// The driver was alive and this shutdown killed it.
    pub driver_killed: bool,
    /// The server finished draining before the deadline.
    pub drained: bool,
}

/// Supervises the driver process and the proxy server until shutdown.
pub struct LifecycleCoordinator {
    state: LifecycleState,
    signal: ShutdownSignal,
    driver: Option<DriverProcess>,
    server: Option<ServerHandle>,
    deadline: Duration,
    os_signals: bool,
}

impl LifecycleCoordinator {
    pub fn new(signal: ShutdownSignal, driver: Option<DriverProcess>, server: ServerHandle) -> Self {
        Self {
            state: LifecycleState::Running,
            signal,
            driver,
            server: Some(server),
            deadline: SHUTDOWN_DEADLINE,
            os_signals: true,
        }
    }

    pub fn with_shutdown_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Whether `run` installs interrupt/termination handlers (default: yes).
    pub fn with_os_signals(mut self, enabled: bool) -> Self {
        self.os_signals = enabled;
        self
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn signal(&self) -> &ShutdownSignal {
        &self.signal
    }

    /// Run until shutdown completes.
    ///
    /// Waits for the shutdown signal, or for the server task to end on its own,
    /// then kills the driver and drains the server within the deadline. Teardown
    /// errors are logged and never returned.
    pub async fn run(&mut self) -> ShutdownReport {
        let os_listener = self
            .os_signals
            .then(|| spawn_os_signal_listener(self.signal.clone()));

        info!("Bridge running");
        let reason = self.wait_for_trigger().await;

        self.transition(LifecycleState::ShuttingDown);
        let driver_killed = self.kill_driver().await;
        let drained = self.drain_server().await;

        if let Some(listener) = os_listener {
            listener.abort();
        }

        self.transition(LifecycleState::Terminated);
        info!("Bridge stopped ({reason})");

        ShutdownReport {
            reason,
            driver_killed,
            drained,
        }
    }

    async fn wait_for_trigger(&mut self) -> ShutdownReason {
        let signal = self.signal.clone();

        let outcome = {
            let Some(server) = self.server.as_mut() else {
                return signal.fired().await;
            };

            tokio::select! {
                reason = signal.fired() => Ok(reason),
                result = server => Err(result),
            }
        };

        match outcome {
            Ok(reason) => reason,
            Err(result) => {
                self.server = None;
                match result {
                    Ok(()) => warn!("Proxy server stopped before shutdown was requested"),
                    Err(e) => warn!("Proxy server task failed: {e}"),
                }
                signal.fire(ShutdownReason::ServerStopped);
                signal.reason().unwrap_or(ShutdownReason::ServerStopped)
            }
        }
    }

    fn transition(&mut self, next: LifecycleState) {
        debug!("Lifecycle {:?} -> {next:?}", self.state);
        self.state = next;
    }

    async fn kill_driver(&mut self) -> bool {
        let Some(mut driver) = self.driver.take() else {
            debug!("No driver process to kill");
            return false;
        };

        if let Some(status) = driver.try_exit_status() {
            info!("Driver (PID: {:?}) already exited: {status}", driver.id());
            return false;
        }

        match driver.kill().await {
            Ok(killed) => killed,
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }

    async fn drain_server(&mut self) -> bool {
        let Some(mut server) = self.server.take() else {
            return true;
        };

        match TokioTimeout(self.deadline, &mut server).await {
            Ok(Ok(())) => {
                info!("Proxy server drained");
                true
            }
            Ok(Err(e)) => {
                let error = ShutdownError::ServerTask {
                    message: format!("Proxy server task failed: {e}"),
                    location: ErrorLocation::from(Location::caller()),
                };
                warn!("{error}");
                false
            }
            Err(_) => {
                let error = ShutdownError::DeadlineExceeded {
                    deadline: self.deadline,
                    location: ErrorLocation::from(Location::caller()),
                };
                warn!("{error}; dropping remaining connections");

                // Connection tasks live in the server task's JoinSet and are
                // aborted when it is dropped.
                server.abort();
                if let Err(e) = server.await
                    && !e.is_cancelled()
                {
                    warn!("Proxy server task failed while aborting: {e}");
                }
                false
            }
        }
    }
}
