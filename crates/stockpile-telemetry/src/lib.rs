//! Structured logging for the stockpile services.
//!
//! JSON output in production, pretty output for development; filtering via
//! `RUST_LOG` with a sensible default.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
