//! Current-segment location.
//!
//! The object listing itself is the index: no metadata file tracks which
//! segment of a partition is writable. Each invocation re-derives the
//! current segment from a fresh list call.

use crate::error::{DatasetError, DatasetResult};
use futures_util::TryStreamExt;
use object_store::path::Path;
use object_store::{ObjectMeta, ObjectStore};
use stockpile_core::PartitionPath;
use tracing::debug;

/// Reference to an existing segment object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentRef {
    /// Full object key.
    pub key: Path,
    /// Size in bytes as observed at locate time.
    pub size_bytes: usize,
}

/// Locate the current writable segment of a partition, if any.
///
/// Lists all objects under the partition prefix and selects the first key
/// in lexicographic-ascending order (the object-store listing convention;
/// sorted explicitly so backends with unspecified ordering behave the
/// same). The listing is not guaranteed fresh: a segment created by a
/// concurrent writer a moment earlier may not appear yet. That staleness
/// window is accepted, not worked around.
///
/// The selected segment's size comes from a follow-up `head` call; a
/// failure there is a `SegmentRead` error, which the accumulation service
/// treats as recoverable. Listing failures surface as `Storage`.
pub async fn locate_current(
    store: &dyn ObjectStore,
    partition: &PartitionPath,
) -> DatasetResult<Option<SegmentRef>> {
    let prefix = Path::from(partition.prefix());
    let mut objects: Vec<ObjectMeta> = store.list(Some(&prefix)).try_collect().await?;

    if objects.is_empty() {
        debug!(partition = %partition, "no existing segments");
        return Ok(None);
    }

    objects.sort_by(|a, b| a.location.as_ref().cmp(b.location.as_ref()));
    let key = objects[0].location.clone();

    let meta = store
        .head(&key)
        .await
        .map_err(|source| DatasetError::SegmentRead {
            key: key.to_string(),
            source,
        })?;

    debug!(key = %meta.location, size_bytes = meta.size, "located current segment");
    Ok(Some(SegmentRef {
        key: meta.location,
        size_bytes: meta.size,
    }))
}
