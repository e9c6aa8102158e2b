use serde::{Deserialize, Serialize};

use crate::db_types::{OrderId, PaymentId};

/// The three values the payment provider hands back to the customer's browser after a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    pub order_id: OrderId,
    pub payment_id: PaymentId,
    /// Lower-case hex HMAC-SHA256 of `"{order_id}|{payment_id}"`
    pub signature: String,
}

impl PaymentConfirmation {
    pub fn new<O, P>(order_id: O, payment_id: P, signature: &str) -> Self
    where
        O: Into<OrderId>,
        P: Into<PaymentId>,
    {
        Self { order_id: order_id.into(), payment_id: payment_id.into(), signature: signature.to_string() }
    }

    /// The names of the fields that are empty. All three are required.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.order_id.as_str().trim().is_empty() {
            missing.push("order_id");
        }
        if self.payment_id.as_str().trim().is_empty() {
            missing.push("payment_id");
        }
        if self.signature.trim().is_empty() {
            missing.push("signature");
        }
        missing
    }
}
