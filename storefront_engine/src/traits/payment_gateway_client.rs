use serde_json::Value;
use storefront_common::MinorUnits;
use thiserror::Error;

use crate::db_types::OrderId;

/// An order as opened with the payment provider.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteOrder {
    /// The provider-issued order id. This becomes the local order's `order_id`.
    pub id: OrderId,
    /// The provider's representation of the order, exactly as it was received.
    pub body: Value,
}

#[derive(Debug, Clone, Error)]
#[error("Payment gateway error. {0}")]
pub struct GatewayClientError(pub String);

/// Opens orders with the payment provider.
#[allow(async_fn_in_trait)]
pub trait PaymentGatewayClient {
    /// Opens an order for `amount` (in minor units) in the given currency. Each successful call must yield a new,
    /// unique order id.
    async fn create_remote_order(&self, amount: MinorUnits, currency: &str) -> Result<RemoteOrder, GatewayClientError>;
}
