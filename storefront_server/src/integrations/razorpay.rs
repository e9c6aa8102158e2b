use log::*;
use razorpay_tools::{helpers::new_receipt_id, NewRazorpayOrder, RazorpayApi, RazorpayConfig};
use storefront_common::MinorUnits;
use storefront_engine::{db_types::OrderId, GatewayClientError, PaymentGatewayClient, RemoteOrder};

use crate::errors::ServerError;

/// Opens orders on Razorpay on behalf of the order flow API.
#[derive(Clone)]
pub struct RazorpayGateway {
    api: RazorpayApi,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Result<Self, ServerError> {
        let api = RazorpayApi::new(config).map_err(|e| ServerError::InitializeError(e.to_string()))?;
        Ok(Self { api })
    }
}

impl PaymentGatewayClient for RazorpayGateway {
    async fn create_remote_order(&self, amount: MinorUnits, currency: &str) -> Result<RemoteOrder, GatewayClientError> {
        let receipt = new_receipt_id();
        let order = NewRazorpayOrder::new(amount, currency, &receipt);
        let order = self.api.create_order(order).await.map_err(|e| {
            warn!("💳️ Razorpay rejected the order for {amount} {currency} ({receipt}). {e}");
            GatewayClientError(e.to_string())
        })?;
        let id = OrderId::from(order.id.as_str());
        let body = serde_json::to_value(&order)
            .map_err(|e| GatewayClientError(format!("Could not serialize Razorpay order {id}. {e}")))?;
        Ok(RemoteOrder { id, body })
    }
}
