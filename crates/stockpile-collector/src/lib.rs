//! Batch collection entry point for the stockpile dataset accumulator.
//!
//! Wires configuration, the object store backend, and the accumulation
//! service together, and turns upstream batch descriptors into
//! accumulate calls with correlation-id-scoped logging.

pub mod config;
pub mod error;
pub mod handler;
pub mod message;

pub use config::{CollectorConfig, StoreConfig};
pub use error::{AppError, AppResult};
pub use handler::handle_batch;
pub use message::BatchDescriptor;
