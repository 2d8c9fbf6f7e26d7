use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier handed back to callers after a receipt is scored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ReceiptId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Line item as submitted. Prices travel as strings and are parsed on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    #[serde(deserialize_with = "null_as_default")]
    pub short_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: String,
}

impl Item {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            short_description: short_description.into(),
            price: price.into(),
        }
    }

    pub fn trimmed_description(&self) -> &str {
        self.short_description.trim()
    }

    pub fn parsed_price(&self) -> Option<f64> {
        parse_amount(&self.price)
    }
}

/// Purchase receipt submitted for scoring.
///
/// Missing fields decode to their empty value so the validator, not the decoder, decides
/// what is wrong with a payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Receipt {
    #[serde(deserialize_with = "null_as_default")]
    pub retailer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub purchase_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub purchase_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<Item>,
    #[serde(deserialize_with = "null_as_default")]
    pub total: String,
}

impl Receipt {
    pub fn parsed_total(&self) -> Option<f64> {
        parse_amount(&self.total)
    }
}

/// JSON `null` decodes to the field's empty value, same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A finite literal that overflows `f64` is out of range, not infinity.
pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let value = raw.parse::<f64>().ok()?;
    if value.is_infinite() && !names_infinity(raw) {
        return None;
    }
    Some(value)
}

fn names_infinity(raw: &str) -> bool {
    let unsigned = raw.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Body returned by `POST /receipts/process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedReceipt {
    pub id: ReceiptId,
}

/// Body returned by `GET /receipts/{id}/points`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsView {
    pub points: u64,
}
