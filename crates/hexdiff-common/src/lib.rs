//! Common utilities shared across hexdiff crates.
//!
//! Provides terminal color handling for CLI messages, error categories with
//! their exit codes, and tracing initialization.

#![deny(clippy::all)]

mod color;
pub mod error_codes;
mod telemetry;

pub use color::Colors;
pub use color::init as color_init;
pub use color::supports_color;
pub use error_codes::ErrorCategory;
pub use telemetry::TelemetryGuard;
pub use telemetry::init_tracing;
