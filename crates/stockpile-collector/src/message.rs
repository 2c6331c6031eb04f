//! Incoming batch descriptors.
//!
//! One descriptor per invocation, already stripped of any transport
//! envelope (SQS wrappers and the like stay upstream). The descriptor
//! carries everything the accumulator needs plus the correlation id for
//! log stitching across services.

use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use stockpile_core::{Record, RecordKind};

/// One batch of records destined for a single partition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchDescriptor {
    /// Data provider (e.g. an exchange name).
    pub provider: String,
    /// Product the records belong to (e.g. "BTC-USD").
    pub product_id: String,
    /// What the records are, which also picks the encoding.
    pub kind: RecordKind,
    /// The records themselves. May be empty; an empty batch is a no-op.
    #[serde(default)]
    pub records: Vec<Record>,
    /// Correlation id propagated from the upstream pipeline.
    pub correlation_id: String,
}

impl BatchDescriptor {
    /// Check the required attributes are present and non-empty.
    pub fn validate(&self) -> AppResult<()> {
        for (name, value) in [
            ("provider", &self.provider),
            ("product_id", &self.product_id),
            ("correlation_id", &self.correlation_id),
        ] {
            if value.is_empty() {
                return Err(AppError::InvalidMessage(format!("empty {name}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_descriptor_deserializes_upstream_payload() {
        let descriptor: BatchDescriptor = serde_json::from_value(json!({
            "provider": "coinbase",
            "product_id": "BTC-USD",
            "kind": "historical",
            "correlation_id": "abc-123",
            "records": [
                {"start": "1", "open": "2", "high": "3", "low": "4", "close": "5", "volume": "6"}
            ],
        }))
        .unwrap();

        assert_eq!(descriptor.kind, RecordKind::Candle);
        assert_eq!(descriptor.records.len(), 1);
        descriptor.validate().unwrap();
    }

    #[test]
    fn test_records_default_to_empty() {
        let descriptor: BatchDescriptor = serde_json::from_value(json!({
            "provider": "coinbase",
            "product_id": "BTC-USD",
            "kind": "order",
            "correlation_id": "abc-123",
        }))
        .unwrap();

        assert!(descriptor.records.is_empty());
    }

    #[test]
    fn test_empty_required_attribute_rejected() {
        let descriptor: BatchDescriptor = serde_json::from_value(json!({
            "provider": "",
            "product_id": "BTC-USD",
            "kind": "order",
            "correlation_id": "abc-123",
        }))
        .unwrap();

        let err = descriptor.validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidMessage(_)));
    }
}
