//! Dataset accumulation error types.

use thiserror::Error;

/// Errors raised while accumulating a batch into the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Bad input record; the batch is rejected before any write.
    #[error("Encoding error: {0}")]
    Encode(#[from] stockpile_core::CoreError),

    /// The current segment's metadata could not be read. Recoverable:
    /// the accumulator falls back to creating a new segment.
    #[error("Segment read failed for {key}: {source}")]
    SegmentRead {
        key: String,
        #[source]
        source: object_store::Error,
    },

    /// Object store list/get/put failure. Surfaced to the caller; retry
    /// policy belongs to the transport layer, not the core.
    #[error("Object store error: {0}")]
    Storage(#[from] object_store::Error),
}

/// Result type alias for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;
