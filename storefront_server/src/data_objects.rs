use std::fmt::Display;

use serde::{Deserialize, Serialize};
use storefront_common::MinorUnits;
use storefront_engine::{
    db_types::{CustomerDetails, OrderItem},
    order_objects::PaymentConfirmation,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl JsonResponse {
    pub fn ok() -> Self {
        Self { success: true, message: None }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: Some(message.to_string()) }
    }
}

/// The body of `POST /api/create-order`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderParams {
    /// The order total in minor units (paise for INR)
    #[serde(alias = "amountMinorUnits")]
    pub amount: MinorUnits,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, alias = "customer_details")]
    pub customer_details: CustomerDetails,
}

/// The body of `POST /api/verify-payment`. The field names are the ones the Razorpay checkout widget hands to its
/// success callback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyPaymentParams {
    #[serde(alias = "orderId")]
    pub razorpay_order_id: String,
    #[serde(alias = "paymentId")]
    pub razorpay_payment_id: String,
    #[serde(alias = "signature")]
    pub razorpay_signature: String,
}

impl From<VerifyPaymentParams> for PaymentConfirmation {
    fn from(params: VerifyPaymentParams) -> Self {
        PaymentConfirmation::new(params.razorpay_order_id, params.razorpay_payment_id, &params.razorpay_signature)
    }
}
