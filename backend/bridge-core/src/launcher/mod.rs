//! Launching the Windows chromedriver from inside WSL.
//!
//! - [`arguments`] rewrites the caller's command line: the `--port=` value becomes
//!   the bridge's own listen port, the driver gets the host port instead, and an
//!   `--allowed-ips` pair restricts the driver to the VM's address.
//! - [`process`] spawns the driver and wraps the child in a [`DriverProcess`]
//!   handle that can be killed at most once.

pub mod arguments;
pub mod process;

pub use arguments::{DriverArguments, rewrite_arguments};
pub use process::{DriverProcess, launch};
