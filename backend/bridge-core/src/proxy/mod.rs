//! Reverse proxy from the bridge's listen port to the driver on the Windows host.
//!
//! Every request is forwarded to `http://<host>:<port>` with its path, query,
//! method, end-to-end headers, and body intact. The driver's response is returned
//! unmodified. After each driver response, registered [`ResponseObserver`]s see the
//! exchange; [`ShutdownTrigger`] uses this to turn a `/shutdown` into a
//! [`ShutdownSignal`](crate::lifecycle::ShutdownSignal).
//!
//! Connection failures to the driver become `502 Bad Gateway` for that request only.

pub mod forward;
pub mod headers;
pub mod observer;
pub mod server;

pub use forward::ForwardingProxy;
pub use observer::{ObservedExchange, ResponseObserver, ShutdownTrigger};
pub use server::{ProxyServer, ServerHandle};
