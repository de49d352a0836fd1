//! Cross-cutting primitives shared by every crate in the bridge.
//!
//! ## Architecture
//!
//! - **common** (this crate): error location tracking, status classification
//! - **models**: pure data describing the bridge's startup context
//! - **bridge-core**: address resolution, driver launch, proxying, lifecycle
//! - **chromedriver-wsl**: the binary wiring everything together

pub mod error;
pub mod http_status;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use http_status::HttpStatusCode;
