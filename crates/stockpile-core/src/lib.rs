//! Core domain types for the stockpile dataset accumulator.
//!
//! This crate provides the fundamental types used throughout the system:
//! - `Record`: one trading event (order fill or candle) as a field bag
//! - `RecordKind`, `OrderSide`: batch kind and LIBSVM label mapping
//! - `PartitionPath`, `DatasetSplit`: logical accumulation targets
//! - `CoreError`: the bad-input error taxonomy

pub mod error;
pub mod partition;
pub mod record;

pub use error::{CoreError, Result};
pub use partition::{DatasetSplit, PartitionPath};
pub use record::{OrderSide, Record, RecordKind, SIDE_FIELD};
