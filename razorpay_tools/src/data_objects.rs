use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use storefront_common::MinorUnits;

/// The request body for `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRazorpayOrder {
    /// Amount in the smallest currency subunit
    pub amount: MinorUnits,
    pub currency: String,
    pub receipt: String,
}

impl NewRazorpayOrder {
    pub fn new(amount: MinorUnits, currency: &str, receipt: &str) -> Self {
        Self { amount, currency: currency.to_string(), receipt: receipt.to_string() }
    }
}

/// An order object as returned by the Orders API.
///
/// Only `id` is read. Every other field the provider sends is kept verbatim in `fields`, so that serializing this
/// struct again reproduces the provider's object, including fields that were left out or added later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RazorpayOrder {
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}
