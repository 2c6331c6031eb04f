//! Partition identification types.
//!
//! A partition is a logical, unbounded append target keyed by
//! provider/product/split. Partitions have no lifecycle of their own: they
//! are path prefixes in the object store, created implicitly by the first
//! segment written under them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dataset split a partition belongs to.
///
/// Candle data always lands in `historical`; order data is randomly
/// assigned to `train` or `validation` per batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSplit {
    Train,
    Validation,
    Historical,
}

impl DatasetSplit {
    /// Path component for this split.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Validation => "validation",
            Self::Historical => "historical",
        }
    }
}

impl fmt::Display for DatasetSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Logical accumulation target: `{provider}/{product_id}/{split}`.
///
/// This is the primary key for locating segments; its string form is the
/// object-store prefix all of the partition's segments live under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartitionPath {
    pub provider: String,
    pub product_id: String,
    pub split: DatasetSplit,
}

impl PartitionPath {
    pub fn new(
        provider: impl Into<String>,
        product_id: impl Into<String>,
        split: DatasetSplit,
    ) -> Self {
        Self {
            provider: provider.into(),
            product_id: product_id.into(),
            split,
        }
    }

    /// Object-store prefix for this partition.
    pub fn prefix(&self) -> String {
        format!("{}/{}/{}", self.provider, self.product_id, self.split)
    }
}

impl fmt::Display for PartitionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.provider, self.product_id, self.split)
    }
}
