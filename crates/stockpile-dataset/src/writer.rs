//! Segment append-or-rotate writer.
//!
//! The object store has no native append: extending a segment means reading
//! its full content, concatenating the new batch, and overwriting the same
//! key in a single full-object put. Rotation is a logical property of size,
//! re-derived on every invocation: a segment at or over the threshold is
//! permanently closed and a fresh one is started.

use crate::error::DatasetResult;
use crate::locator::SegmentRef;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use object_store::path::Path;
use object_store::ObjectStore;
use std::sync::Arc;
use stockpile_core::PartitionPath;
use tracing::debug;
use uuid::Uuid;

/// Default rotation threshold: segments grow to ~1MB before closing.
pub const DEFAULT_ROTATION_THRESHOLD_BYTES: usize = 1_000_000;

/// Segment filename timestamp format. String-sortable so lexicographic
/// listing order matches creation order.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M-%S";

/// Trait for obtaining current time, enabling testability.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation using real time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// What the writer did with the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    /// No segment existed; a first segment was created.
    Created,
    /// The batch was appended to the current segment.
    Appended,
    /// The current segment was at/over the threshold; a new one was started.
    Rotated,
}

/// Result of a committed segment write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Key of the segment the batch landed in.
    pub key: Path,
    /// Segment size in bytes after the write.
    pub size_bytes: usize,
    pub action: WriteAction,
}

/// Commits encoded batches to partition segments.
///
/// Stateless across invocations: the append-or-rotate decision is a pure
/// function of the located current segment and the configured threshold.
/// The threshold comparison uses the size observed at the start of the
/// invocation; there is no re-check after the read.
pub struct SegmentWriter {
    store: Arc<dyn ObjectStore>,
    threshold_bytes: usize,
    clock: Arc<dyn Clock>,
}

impl SegmentWriter {
    /// Create a writer with the default threshold and system clock.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self::with_parts(
            store,
            DEFAULT_ROTATION_THRESHOLD_BYTES,
            Arc::new(SystemClock),
        )
    }

    /// Create a writer with explicit threshold and clock.
    pub fn with_parts(
        store: Arc<dyn ObjectStore>,
        threshold_bytes: usize,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            threshold_bytes,
            clock,
        }
    }

    /// Rotation threshold in bytes.
    pub fn threshold_bytes(&self) -> usize {
        self.threshold_bytes
    }

    /// Commit a batch to the partition, appending or rotating as needed.
    ///
    /// - No current segment: create one holding only the batch.
    /// - Current segment under the threshold: overwrite it with
    ///   `old + "\n" + batch`.
    /// - Current segment at/over the threshold: leave it closed and create
    ///   a new segment holding only the batch.
    ///
    /// Every put is a single full-object replace, so a failure never leaves
    /// a half-written object behind.
    pub async fn write(
        &self,
        partition: &PartitionPath,
        current: Option<SegmentRef>,
        batch: &str,
        extension: &str,
    ) -> DatasetResult<WriteOutcome> {
        match current {
            None => self.start_segment(partition, batch, extension, WriteAction::Created).await,
            Some(segment) if segment.size_bytes >= self.threshold_bytes => {
                debug!(
                    key = %segment.key,
                    size_bytes = segment.size_bytes,
                    threshold = self.threshold_bytes,
                    "segment reached threshold, rotating"
                );
                self.start_segment(partition, batch, extension, WriteAction::Rotated)
                    .await
            }
            Some(segment) => self.append_to(segment, batch).await,
        }
    }

    /// Put a fresh segment holding only the batch.
    async fn start_segment(
        &self,
        partition: &PartitionPath,
        batch: &str,
        extension: &str,
        action: WriteAction,
    ) -> DatasetResult<WriteOutcome> {
        let key = self.segment_key(partition, extension);
        self.store
            .put(&key, Bytes::from(batch.to_string()))
            .await?;
        Ok(WriteOutcome {
            key,
            size_bytes: batch.len(),
            action,
        })
    }

    /// Read the full segment, concatenate, overwrite the same key.
    async fn append_to(&self, segment: SegmentRef, batch: &str) -> DatasetResult<WriteOutcome> {
        let existing = self.store.get(&segment.key).await?.bytes().await?;

        let mut content = String::with_capacity(existing.len() + 1 + batch.len());
        content.push_str(&String::from_utf8_lossy(&existing));
        content.push('\n');
        content.push_str(batch);
        let size_bytes = content.len();

        self.store.put(&segment.key, Bytes::from(content)).await?;
        Ok(WriteOutcome {
            key: segment.key,
            size_bytes,
            action: WriteAction::Appended,
        })
    }

    /// New segment key: `{prefix}/{timestamp}-{suffix}.{ext}`.
    ///
    /// The suffix (first 8 hex chars of a v4 UUID) disambiguates two
    /// rotations within the same second; keys still sort by timestamp.
    fn segment_key(&self, partition: &PartitionPath, extension: &str) -> Path {
        let timestamp = self.clock.now().format(TIMESTAMP_FORMAT);
        let suffix = &Uuid::new_v4().to_string()[..8];
        Path::from(format!(
            "{}/{}-{}.{}",
            partition.prefix(),
            timestamp,
            suffix,
            extension
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use object_store::memory::InMemory;
    use stockpile_core::DatasetSplit;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn fixed_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap(),
        ))
    }

    fn partition() -> PartitionPath {
        PartitionPath::new("coinbase", "BTC-USD", DatasetSplit::Train)
    }

    async fn read(store: &dyn ObjectStore, key: &Path) -> String {
        let bytes = store.get(key).await.unwrap().bytes().await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_create_when_no_current_segment() {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        let writer = SegmentWriter::with_parts(store.clone(), 1000, fixed_clock());

        let outcome = writer
            .write(&partition(), None, "0 1:1 2:2", "libsvm")
            .await
            .unwrap();

        assert_eq!(outcome.action, WriteAction::Created);
        assert!(outcome
            .key
            .as_ref()
            .starts_with("coinbase/BTC-USD/train/2024-03-01-10-30-00-"));
        assert!(outcome.key.as_ref().ends_with(".libsvm"));
        assert_eq!(read(store.as_ref(), &outcome.key).await, "0 1:1 2:2");
    }

    #[tokio::test]
    async fn test_append_under_threshold() {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        let key = Path::from("coinbase/BTC-USD/train/2024-02-01-00-00-00-ab.libsvm");
        store.put(&key, Bytes::from("old line")).await.unwrap();
        let writer = SegmentWriter::with_parts(store.clone(), 1000, fixed_clock());

        let current = SegmentRef {
            key: key.clone(),
            size_bytes: 8,
        };
        let outcome = writer
            .write(&partition(), Some(current), "new line", "libsvm")
            .await
            .unwrap();

        assert_eq!(outcome.action, WriteAction::Appended);
        assert_eq!(outcome.key, key);
        assert_eq!(outcome.size_bytes, "old line\nnew line".len());
        assert_eq!(read(store.as_ref(), &key).await, "old line\nnew line");
    }

    #[tokio::test]
    async fn test_rotate_at_exact_threshold() {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        let key = Path::from("coinbase/BTC-USD/train/2024-02-01-00-00-00-ab.libsvm");
        store.put(&key, Bytes::from(vec![b'x'; 100])).await.unwrap();
        let writer = SegmentWriter::with_parts(store.clone(), 100, fixed_clock());

        let current = SegmentRef {
            key: key.clone(),
            size_bytes: 100,
        };
        let outcome = writer
            .write(&partition(), Some(current), "fresh", "libsvm")
            .await
            .unwrap();

        assert_eq!(outcome.action, WriteAction::Rotated);
        assert_ne!(outcome.key, key);
        // Old segment content is never mutated after closure.
        assert_eq!(read(store.as_ref(), &key).await.len(), 100);
        assert_eq!(read(store.as_ref(), &outcome.key).await, "fresh");
    }

    #[tokio::test]
    async fn test_append_one_byte_under_threshold() {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        let key = Path::from("coinbase/BTC-USD/train/2024-02-01-00-00-00-ab.libsvm");
        store.put(&key, Bytes::from(vec![b'x'; 99])).await.unwrap();
        let writer = SegmentWriter::with_parts(store.clone(), 100, fixed_clock());

        let current = SegmentRef {
            key: key.clone(),
            size_bytes: 99,
        };
        let outcome = writer
            .write(&partition(), Some(current), "y", "libsvm")
            .await
            .unwrap();

        assert_eq!(outcome.action, WriteAction::Appended);
        assert_eq!(outcome.size_bytes, 101); // 99 + newline + 1
    }

    #[tokio::test]
    async fn test_same_second_rotations_do_not_collide() {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        let writer = SegmentWriter::with_parts(store.clone(), 100, fixed_clock());

        let first = writer
            .write(&partition(), None, "a", "csv")
            .await
            .unwrap();
        let second = writer
            .write(&partition(), None, "b", "csv")
            .await
            .unwrap();

        assert_ne!(first.key, second.key);
        assert_eq!(read(store.as_ref(), &first.key).await, "a");
        assert_eq!(read(store.as_ref(), &second.key).await, "b");
    }
}
