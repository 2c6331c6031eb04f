//! Segmented append log over object storage for trading datasets.
//!
//! Object stores have no append or lock primitive, so accumulation works
//! batch-at-a-time: list the partition to find the current segment, then
//! either overwrite it with `old + "\n" + batch` or roll over to a fresh
//! segment once the size threshold is crossed. Every write is a single
//! full-object put.
//!
//! ## Concurrency
//!
//! Invocations are independent; there is no in-process lock or queue.
//! Two concurrent writers to one partition can both observe the same
//! current segment and overwrite each other: last-write-wins at the
//! object level, with the loser's batch silently lost. That is an accepted
//! tradeoff since no compare-and-swap primitive is assumed. Stale listings are
//! likewise accepted; a just-created segment a concurrent writer committed
//! may not be visible yet.

pub mod encoder;
pub mod error;
pub mod locator;
pub mod service;
pub mod split;
pub mod writer;

pub use error::{DatasetError, DatasetResult};
pub use locator::{locate_current, SegmentRef};
pub use service::{AccumulationResult, DatasetAccumulator};
pub use split::{resolve_partition, RandomSource, ThreadRngSource, VALIDATION_CUTOFF};
pub use writer::{
    Clock, SegmentWriter, SystemClock, WriteAction, WriteOutcome,
    DEFAULT_ROTATION_THRESHOLD_BYTES,
};
