use std::sync::{
    atomic::{AtomicBool, AtomicU64, Ordering},
    Arc,
};

use serde_json::json;
use storefront_common::MinorUnits;
use storefront_engine::{db_types::OrderId, GatewayClientError, PaymentGatewayClient, RemoteOrder};

/// Stands in for the payment provider. Every call issues a new order id, unless the gateway has been told to fail.
#[derive(Clone, Default)]
pub struct FakeGateway {
    calls: Arc<AtomicU64>,
    failing: Arc<AtomicBool>,
    prefix: Arc<String>,
}

impl FakeGateway {
    pub fn failing() -> Self {
        let gateway = Self::default();
        gateway.set_failing(true);
        gateway
    }

    /// Use a fixed id prefix, so that two gateways will issue the same order ids
    pub fn with_prefix(prefix: &str) -> Self {
        Self { prefix: Arc::new(prefix.to_string()), ..Default::default() }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PaymentGatewayClient for FakeGateway {
    async fn create_remote_order(&self, amount: MinorUnits, currency: &str) -> Result<RemoteOrder, GatewayClientError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing.load(Ordering::SeqCst) {
            return Err(GatewayClientError("The gateway is unreachable".into()));
        }
        let id = if self.prefix.is_empty() { format!("order_Fk{n:04}") } else { format!("{}{n:04}", self.prefix) };
        let body = json!({
            "id": id,
            "entity": "order",
            "amount": amount.value(),
            "amount_paid": 0,
            "amount_due": amount.value(),
            "currency": currency,
            "receipt": format!("receipt_{n}"),
            "status": "created",
            "attempts": 0,
            "notes": [],
            "created_at": 1_717_243_200 + n,
        });
        Ok(RemoteOrder { id: OrderId::from(id), body })
    }
}
