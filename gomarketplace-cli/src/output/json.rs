//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use gomarketplace_core::{CartItem, CartTotals};
use serde::{Serialize, Serializer};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for the whole cart.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartOutput<'a> {
    pub items: &'a [CartItem],
    pub totals: TotalsOutput,
    pub storage_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_datetime_opt")]
    pub last_saved: Option<DateTime<Utc>>,
}

/// Cart totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsOutput {
    pub lines: usize,
    pub quantity: u64,
    pub price: f64,
}

impl From<&CartTotals> for TotalsOutput {
    fn from(totals: &CartTotals) -> Self {
        Self {
            lines: totals.lines,
            quantity: totals.quantity,
            price: totals.price,
        }
    }
}

/// Outcome of a single mutation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeOutput<'a> {
    pub action: &'a str,
    pub id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<&'a CartItem>,
    pub totals: TotalsOutput,
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_datetime_opt<S>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => s.serialize_str(&dt.to_rfc3339()),
        None => s.serialize_none(),
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats the cart with totals.
    pub fn format_cart(
        &self,
        items: &[CartItem],
        totals: &CartTotals,
        storage_key: &str,
        last_saved: Option<DateTime<Utc>>,
    ) -> Result<String> {
        self.format(&CartOutput {
            items,
            totals: totals.into(),
            storage_key,
            last_saved,
        })
    }

    /// Formats the outcome of a mutation.
    pub fn format_change(
        &self,
        action: &str,
        id: &str,
        item: Option<&CartItem>,
        totals: &CartTotals,
    ) -> Result<String> {
        self.format(&ChangeOutput {
            action,
            id,
            item,
            totals: totals.into(),
        })
    }
}
