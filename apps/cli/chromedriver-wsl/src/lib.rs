//! Startup wiring for the `chromedriver-wsl` binary.
//!
//! `main.rs` only parses the process arguments and maps the result to an exit
//! code. Everything else lives here so integration tests can drive it.

pub mod app;
pub mod error;
pub mod logger;

#[cfg(test)]
mod tests;
