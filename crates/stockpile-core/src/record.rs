//! Trading record types.
//!
//! A record is one domain event (an order fill or an OHLC candle) received
//! from upstream as a bag of named fields. Field sets vary by provider, so
//! records stay schemaless; typed access happens at encoding time where a
//! missing or malformed field rejects the whole batch.

use crate::error::{CoreError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Field carrying the order side.
pub const SIDE_FIELD: &str = "side";

/// Kind of record a batch carries.
///
/// The kind determines the target encoding and the file extension of the
/// segments the batch lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Filled order, encoded as one LIBSVM line per record.
    #[serde(alias = "position", alias = "POSITION")]
    Order,
    /// OHLC candle tick, encoded as one CSV line per record.
    #[serde(alias = "historical")]
    Candle,
}

impl RecordKind {
    /// File extension for segments of this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Order => "libsvm",
            Self::Candle => "csv",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Order => write!(f, "order"),
            Self::Candle => write!(f, "candle"),
        }
    }
}

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// LIBSVM class label: 0 for buy, 1 for sell.
    pub fn label(&self) -> u8 {
        match self {
            Self::Buy => 0,
            Self::Sell => 1,
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// One domain event: a mapping from field names to numeric/string values.
///
/// Immutable once received. Typed accessors return `CoreError` for missing
/// or malformed fields rather than panicking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create a record from raw fields.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw field lookup.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read a field as an exact decimal.
    ///
    /// Accepts JSON strings and numbers. Upstream providers send decimals
    /// as strings to preserve precision; integer and float JSON numbers are
    /// accepted for robustness. The rendered form (`Decimal`'s `Display`)
    /// is canonical: no scientific notation, no locale formatting.
    pub fn decimal(&self, field: &str) -> Result<Decimal> {
        let value = self.get(field).ok_or_else(|| CoreError::missing(field))?;
        let invalid = || CoreError::InvalidNumeric {
            field: field.to_string(),
            value: value.to_string(),
        };

        match value {
            Value::String(s) => Decimal::from_str(s).map_err(|_| invalid()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Decimal::from(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Decimal::from(u))
                } else {
                    n.as_f64()
                        .and_then(Decimal::from_f64_retain)
                        .ok_or_else(invalid)
                }
            }
            _ => Err(invalid()),
        }
    }

    /// Read the order side from the `side` field.
    ///
    /// Only the exact strings `BUY` and `SELL` are valid; anything else
    /// (including a non-string value) is an unsupported label.
    pub fn order_side(&self) -> Result<OrderSide> {
        let value = self
            .get(SIDE_FIELD)
            .ok_or_else(|| CoreError::missing(SIDE_FIELD))?;
        match value {
            Value::String(s) => match s.as_str() {
                "BUY" => Ok(OrderSide::Buy),
                "SELL" => Ok(OrderSide::Sell),
                other => Err(CoreError::UnsupportedLabel(other.to_string())),
            },
            other => Err(CoreError::UnsupportedLabel(other.to_string())),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
