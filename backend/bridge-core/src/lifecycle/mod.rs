//! Shutdown coordination for the bridge.
//!
//! Two independent producers end the bridge's life: the proxy observing a
//! `/shutdown` response, and the OS delivering an interrupt or termination
//! signal. Both fire the same [`ShutdownSignal`], which only records the first
//! reason. The [`LifecycleCoordinator`] waits on it, kills the driver once, and
//! drains the proxy server within [`SHUTDOWN_DEADLINE`].

pub mod coordinator;
pub mod os_signal;
pub mod signal;

pub use coordinator::{LifecycleCoordinator, LifecycleState, SHUTDOWN_DEADLINE, ShutdownReport};
pub use os_signal::{spawn_os_signal_listener, wait_for_os_signal};
pub use signal::{ShutdownReason, ShutdownSignal};
