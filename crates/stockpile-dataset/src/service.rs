//! Dataset accumulation service.
//!
//! The single entry point external callers use. Per batch: resolve the
//! partition, locate the current segment, encode the records, and commit
//! via the segment writer. Each call is an independent invocation with no
//! shared in-process state; concurrent callers coordinate only through the
//! object store itself (last-write-wins, see the crate docs).

use crate::encoder;
use crate::error::{DatasetError, DatasetResult};
use crate::locator::locate_current;
use crate::split::{resolve_partition, RandomSource, ThreadRngSource};
use crate::writer::{Clock, SegmentWriter, SystemClock, WriteAction, WriteOutcome};
use object_store::path::Path;
use object_store::ObjectStore;
use std::sync::Arc;
use stockpile_core::{PartitionPath, Record, RecordKind};
use tracing::{info, warn};

/// Result of one accumulation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccumulationResult {
    /// Empty input; no store call was made and no segment was touched.
    NoData,
    /// The batch was committed to a segment.
    Written {
        partition: PartitionPath,
        outcome: WriteOutcome,
    },
}

impl AccumulationResult {
    /// Key of the segment written, if any.
    pub fn key(&self) -> Option<&Path> {
        match self {
            Self::NoData => None,
            Self::Written { outcome, .. } => Some(&outcome.key),
        }
    }

    /// Segment size after the write; zero for a no-op.
    pub fn size_bytes(&self) -> usize {
        match self {
            Self::NoData => 0,
            Self::Written { outcome, .. } => outcome.size_bytes,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// Accumulates batches of trading records into partition segments.
pub struct DatasetAccumulator {
    store: Arc<dyn ObjectStore>,
    writer: SegmentWriter,
    random: Arc<dyn RandomSource>,
}

impl DatasetAccumulator {
    /// Create an accumulator with the default threshold, system clock,
    /// and thread-local randomness.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self::with_parts(
            store,
            crate::writer::DEFAULT_ROTATION_THRESHOLD_BYTES,
            Arc::new(ThreadRngSource),
            Arc::new(SystemClock),
        )
    }

    /// Create an accumulator with a custom rotation threshold.
    pub fn with_threshold(store: Arc<dyn ObjectStore>, threshold_bytes: usize) -> Self {
        Self::with_parts(
            store,
            threshold_bytes,
            Arc::new(ThreadRngSource),
            Arc::new(SystemClock),
        )
    }

    /// Create an accumulator with explicit collaborators.
    pub fn with_parts(
        store: Arc<dyn ObjectStore>,
        threshold_bytes: usize,
        random: Arc<dyn RandomSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let writer = SegmentWriter::with_parts(store.clone(), threshold_bytes, clock);
        Self {
            store,
            writer,
            random,
        }
    }

    /// Accumulate one batch of records into the dataset.
    ///
    /// Empty batches are a successful no-op; no empty segment is ever
    /// created. Encoding errors abort before any store call. A failure to
    /// read the current segment's metadata falls open to creating a new
    /// segment rather than blocking ingestion; store write failures
    /// propagate, and retrying the whole call is safe (retries only ever
    /// add content or segments).
    ///
    /// Re-invoking with the same records appends again; deduplication is
    /// not this layer's job.
    pub async fn accumulate(
        &self,
        kind: RecordKind,
        provider: &str,
        product_id: &str,
        records: &[Record],
    ) -> DatasetResult<AccumulationResult> {
        if records.is_empty() {
            info!(kind = %kind, provider, product_id, "empty batch, nothing to accumulate");
            return Ok(AccumulationResult::NoData);
        }

        let batch = encoder::encode(records, kind)?;
        let partition = resolve_partition(kind, provider, product_id, self.random.as_ref());

        let current = match locate_current(self.store.as_ref(), &partition).await {
            Ok(current) => current,
            Err(DatasetError::SegmentRead { key, source }) => {
                warn!(
                    key = %key,
                    error = %source,
                    "segment metadata unavailable, falling back to a new segment"
                );
                None
            }
            Err(other) => return Err(other),
        };

        let outcome = self
            .writer
            .write(&partition, current, &batch, kind.extension())
            .await?;

        match outcome.action {
            WriteAction::Created => info!(
                key = %outcome.key,
                records = records.len(),
                "no segments found, created first segment"
            ),
            WriteAction::Rotated => info!(
                key = %outcome.key,
                records = records.len(),
                "segment size threshold reached, started new segment"
            ),
            WriteAction::Appended => info!(
                key = %outcome.key,
                size_bytes = outcome.size_bytes,
                records = records.len(),
                "appended batch to current segment"
            ),
        }

        Ok(AccumulationResult::Written { partition, outcome })
    }
}
