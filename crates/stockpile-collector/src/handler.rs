//! Batch handling.
//!
//! Bridges an incoming batch descriptor to the dataset accumulator,
//! keeping every log line inside a span that carries the correlation id.

use crate::error::AppResult;
use crate::message::BatchDescriptor;
use stockpile_dataset::{AccumulationResult, DatasetAccumulator};
use tracing::{error, info, info_span, Instrument};

/// Accumulate one batch described by an upstream message.
///
/// Validation and encoding failures reject the batch with no side effects;
/// store failures propagate so the transport layer can negatively
/// acknowledge and redeliver.
pub async fn handle_batch(
    accumulator: &DatasetAccumulator,
    descriptor: &BatchDescriptor,
) -> AppResult<AccumulationResult> {
    descriptor.validate()?;

    let span = info_span!(
        "data_collection",
        correlation_id = %descriptor.correlation_id,
        provider = %descriptor.provider,
        product_id = %descriptor.product_id,
        kind = %descriptor.kind,
    );

    async {
        let result = accumulator
            .accumulate(
                descriptor.kind,
                &descriptor.provider,
                &descriptor.product_id,
                &descriptor.records,
            )
            .await;

        match &result {
            Ok(outcome) => match outcome.key() {
                Some(key) => info!(
                    key = %key,
                    size_bytes = outcome.size_bytes(),
                    "batch accumulated"
                ),
                None => info!("empty batch acknowledged"),
            },
            Err(e) => error!(error = %e, "batch accumulation failed"),
        }

        Ok(result?)
    }
    .instrument(span)
    .await
}
