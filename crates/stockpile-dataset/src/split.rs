//! Partition resolution and the train/validation split draw.
//!
//! Candle batches resolve deterministically to the `historical` split.
//! Order batches are assigned to `train` or `validation` by a uniform draw,
//! one draw per batch, so an entire batch lands in one split. The draw avoids
//! a stateful counter or external coordination at the cost of statistical
//! imbalance over small sample counts.

use stockpile_core::{DatasetSplit, PartitionPath, RecordKind};

/// Draws at or below this value (out of 100) go to `validation`.
pub const VALIDATION_CUTOFF: u32 = 33;

/// Uniform integer source, substitutable for deterministic tests.
pub trait RandomSource: Send + Sync {
    /// Returns a uniform integer in `[low, high]` inclusive.
    fn uniform(&self, low: u32, high: u32) -> u32;
}

/// Thread-local RNG implementation using real randomness.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn uniform(&self, low: u32, high: u32) -> u32 {
        use rand::Rng;
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Resolve the partition an incoming batch belongs to.
pub fn resolve_partition(
    kind: RecordKind,
    provider: &str,
    product_id: &str,
    random: &dyn RandomSource,
) -> PartitionPath {
    let split = match kind {
        RecordKind::Candle => DatasetSplit::Historical,
        RecordKind::Order => {
            if random.uniform(1, 100) <= VALIDATION_CUTOFF {
                DatasetSplit::Validation
            } else {
                DatasetSplit::Train
            }
        }
    };
    PartitionPath::new(provider, product_id, split)
}
