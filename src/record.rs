//! Transaction record type.
//!
//! One `TransactionRecord` is one sale line as supplied by the external data
//! source (file loader, database, message queue - out of scope here). The
//! pipeline consumes records read-only; nothing downstream mutates them.

use serde::{Deserialize, Serialize};

/// A single sales transaction line.
///
/// The three fields the pipeline requires are `price`, `quantity` and
/// `revenue`; `None` marks a value that failed numeric normalization (see
/// [`crate::normalize`]) and makes the record invalid. The auxiliary fields
/// are carried through untouched for consumers that want them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Product identifier (SKU). Non-empty.
    pub product_id: String,

    /// Unit price at which the line was sold.
    pub price: Option<f64>,

    /// Quantity delivered.
    pub quantity: Option<f64>,

    /// Line revenue (monetary amount).
    pub revenue: Option<f64>,

    /// Quantity originally ordered, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_ordered: Option<f64>,

    /// System-suggested quantity, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_suggested: Option<f64>,

    /// Line weight in kilograms, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,

    /// Discount amount applied to the line, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_amount: Option<f64>,

    /// Discount percentage applied to the line, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_pct: Option<f64>,

    /// Standard unit cost, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_cost: Option<f64>,
}

impl TransactionRecord {
    /// Create a record with just the three required fields populated.
    pub fn new(product_id: impl Into<String>, price: f64, quantity: f64, revenue: f64) -> Self {
        Self {
            product_id: product_id.into(),
            price: Some(price),
            quantity: Some(quantity),
            revenue: Some(revenue),
            quantity_ordered: None,
            quantity_suggested: None,
            weight_kg: None,
            discount_amount: None,
            discount_pct: None,
            standard_cost: None,
        }
    }
}
