use std::fmt::Debug;

use log::*;
use storefront_common::{MinorUnits, Secret, DEFAULT_CURRENCY_CODE};

use crate::{
    db_types::{CustomerDetails, NewOrder, Order, OrderId, OrderItem, OrderStatusType},
    events::{EventProducers, OrderPaidEvent},
    helpers::verify_payment_signature,
    order_objects::PaymentConfirmation,
    traits::{OrderManagement, PaymentGatewayClient, PaymentGatewayError, RemoteOrder},
};

/// `OrderFlowApi` is the primary API for handling the order lifecycle: opening orders with the payment provider, and
/// marking them as paid once the provider's confirmation has been verified.
///
/// The only route to the `paid` status runs through [`Self::verify_payment`], and only after the confirmation
/// signature has been checked against the shared secret.
pub struct OrderFlowApi<B, G> {
    db: B,
    gateway: G,
    secret: Secret<String>,
    currency: String,
    producers: EventProducers,
}

impl<B, G> Debug for OrderFlowApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi ({})", self.currency)
    }
}

impl<B, G> OrderFlowApi<B, G> {
    /// Creates a new order flow API. `secret` is the key the payment provider signs payment confirmations with.
    pub fn new(db: B, gateway: G, secret: Secret<String>) -> Self {
        Self {
            db,
            gateway,
            secret,
            currency: DEFAULT_CURRENCY_CODE.to_string(),
            producers: EventProducers::default(),
        }
    }

    /// Sets the currency that orders are opened in. The default is [`DEFAULT_CURRENCY_CODE`].
    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_string();
        self
    }

    pub fn with_producers(mut self, producers: EventProducers) -> Self {
        self.producers = producers;
        self
    }

    pub fn currency(&self) -> &str {
        self.currency.as_str()
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B, G> OrderFlowApi<B, G>
where
    B: OrderManagement,
    G: PaymentGatewayClient,
{
    /// Opens a new order with the payment provider for `amount`, and records it locally with status `created`.
    ///
    /// The local record stores the amount in major units (e.g. 55000 paise is stored as 550.00), along with a
    /// snapshot of the items and customer details as they were at checkout.
    ///
    /// The provider's order object is returned unchanged. If the provider call fails, nothing is stored. If the
    /// provider call succeeds but the local insert fails, the remote order is left dangling and the error is
    /// returned. There is no compensating call to the provider.
    pub async fn create_order(
        &self,
        amount: MinorUnits,
        items: Vec<OrderItem>,
        customer_details: CustomerDetails,
    ) -> Result<RemoteOrder, PaymentGatewayError> {
        if !amount.is_positive() {
            return Err(PaymentGatewayError::ValidationError(format!(
                "Order amount must be a positive number of minor units. Got {}",
                amount.value()
            )));
        }
        let remote = self.gateway.create_remote_order(amount, &self.currency).await.map_err(|e| {
            warn!("🔄️📦️ Could not open an order for {amount} {} with the payment provider. {e}", self.currency);
            PaymentGatewayError::UpstreamGatewayError(e.to_string())
        })?;
        debug!("🔄️📦️ Payment provider opened order [{}] for {amount} {}", remote.id, self.currency);
        let order = NewOrder::new(remote.id.clone(), amount.to_major(), &self.currency)
            .with_items(items)
            .with_customer_details(customer_details);
        if let Err(e) = self.db.insert_order(order).await {
            error!(
                "🔄️📦️ Order [{}] exists with the payment provider but could not be saved locally. {e}",
                remote.id
            );
            return Err(e);
        }
        info!("🔄️📦️ Order [{}] created for {amount} {}", remote.id, self.currency);
        Ok(remote)
    }

    /// Marks the order as paid, provided the confirmation carries a valid signature.
    ///
    /// The signature is checked before the database is touched at all. An invalid signature results in
    /// [`PaymentGatewayError::InvalidSignature`], and no order is read or written.
    ///
    /// With a valid signature, the order moves from `created` to `paid` and the payment id is attached, in a single
    /// atomic write. Confirming the same payment again is not an error: the already-paid order is returned and nothing
    /// is written. An [`OrderPaidEvent`] is only published for the call that actually made the change.
    pub async fn verify_payment(&self, confirmation: &PaymentConfirmation) -> Result<Order, PaymentGatewayError> {
        let missing = confirmation.missing_fields();
        if !missing.is_empty() {
            return Err(PaymentGatewayError::ValidationError(format!("Missing required fields: {}", missing.join(", "))));
        }
        let PaymentConfirmation { order_id, payment_id, signature } = confirmation;
        if !verify_payment_signature(order_id.as_str(), payment_id.as_str(), signature, self.secret.reveal()) {
            warn!("🔄️💰️ Rejected payment confirmation for order [{order_id}]. The signature is invalid.");
            return Err(PaymentGatewayError::InvalidSignature);
        }
        trace!("🔄️💰️ Signature for payment {payment_id} on order [{order_id}] is valid");
        let update = match self.db.update_status_and_payment_id(order_id, OrderStatusType::Paid, payment_id).await {
            Ok(update) => update,
            Err(PaymentGatewayError::OrderNotFound(id)) => {
                // Order ids come from the provider, and we store every one we are issued. A miss is a data problem.
                error!("🔄️💰️ Verified payment {payment_id} refers to order [{id}], which does not exist locally");
                return Err(PaymentGatewayError::OrderNotFound(id));
            },
            Err(e) => {
                warn!("🔄️💰️ Could not record payment {payment_id} against order [{order_id}]. {e}");
                return Err(e);
            },
        };
        let newly_paid = update.is_updated();
        let order = update.into_order();
        if newly_paid {
            info!("🔄️💰️ Order [{order_id}] has been paid with payment {payment_id}");
            self.call_order_paid_hook(&order).await;
        } else {
            debug!("🔄️💰️ Payment {payment_id} for order [{order_id}] was already recorded");
        }
        Ok(order)
    }

    pub async fn fetch_order(&self, order_id: &OrderId) -> Result<Option<Order>, PaymentGatewayError> {
        self.db.fetch_order_by_order_id(order_id).await
    }

    async fn call_order_paid_hook(&self, order: &Order) {
        if self.producers.order_paid_producer.is_empty() {
            return;
        }
        debug!("🔄️💰️ Notifying order paid hook subscribers");
        self.producers.publish_order_paid(OrderPaidEvent::new(order.clone())).await;
    }
}
