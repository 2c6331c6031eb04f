//! Batch encoding into segment line formats.
//!
//! Pure functions, no I/O. Orders render as LIBSVM lines (side as the class
//! label, eight features in fixed index order), candles as six-column CSV.
//! Any missing or malformed field rejects the whole batch; a partially
//! encoded batch is never produced.

use stockpile_core::{Record, RecordKind, Result};

/// LIBSVM feature fields for order records, in index order (1-based).
pub const ORDER_FEATURE_FIELDS: [&str; 8] = [
    "average_filled_price",
    "filled_value",
    "outstanding_hold_amount",
    "total_fees",
    "total_value_after_fees",
    "number_of_fills",
    "fee",
    "filled_size",
];

/// CSV columns for candle records, in output order.
pub const CANDLE_FIELDS: [&str; 6] = ["start", "open", "high", "low", "close", "volume"];

/// Render a batch of records as segment content.
///
/// Lines are newline-joined in input order; records are never reordered or
/// deduplicated. The result carries no trailing newline; the segment
/// writer inserts the separator when appending.
pub fn encode(records: &[Record], kind: RecordKind) -> Result<String> {
    let mut lines = Vec::with_capacity(records.len());
    for record in records {
        let line = match kind {
            RecordKind::Order => encode_order_line(record)?,
            RecordKind::Candle => encode_candle_line(record)?,
        };
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

/// One LIBSVM line: `<label> 1:<f1> 2:<f2> ... 8:<f8>`.
fn encode_order_line(record: &Record) -> Result<String> {
    let label = record.order_side()?.label();
    let mut line = label.to_string();
    for (index, field) in ORDER_FEATURE_FIELDS.iter().enumerate() {
        let value = record.decimal(field)?;
        line.push_str(&format!(" {}:{}", index + 1, value));
    }
    Ok(line)
}

/// One CSV line: `start,open,high,low,close,volume`. No label.
fn encode_candle_line(record: &Record) -> Result<String> {
    let mut columns = Vec::with_capacity(CANDLE_FIELDS.len());
    for field in CANDLE_FIELDS.iter() {
        columns.push(record.decimal(field)?.to_string());
    }
    Ok(columns.join(","))
}
