use thiserror::Error;

use crate::db_types::{NewOrder, Order, OrderId, OrderStatusType, PaymentId};

/// The outcome of a successful call to [`OrderManagement::update_status_and_payment_id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    /// The order moved into the requested status. Contains the order as it is now stored.
    Updated(Order),
    /// The order already had the requested status and payment id. Nothing was written.
    Unchanged(Order),
}

impl StatusUpdate {
    pub fn into_order(self) -> Order {
        match self {
            StatusUpdate::Updated(o) | StatusUpdate::Unchanged(o) => o,
        }
    }

    pub fn is_updated(&self) -> bool {
        matches!(self, StatusUpdate::Updated(_))
    }
}

/// The Order Store.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// The URL of the database
    fn url(&self) -> &str;

    /// Stores a brand-new order with status `created` and no payment id.
    ///
    /// Fails with [`PaymentGatewayError::OrderAlreadyExists`] if an order with the same `order_id` is already stored.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, PaymentGatewayError>;

    /// Point lookup by the provider-issued order id.
    async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, PaymentGatewayError>;

    /// Moves the order into `status` and attaches `payment_id` to it, as a single conditional write. The write only
    /// succeeds if the order's current status is one of `status.predecessors()`.
    ///
    /// If the order is already in `status` with the same payment id, nothing is written and
    /// [`StatusUpdate::Unchanged`] is returned. Every other case where the write does not apply is an error:
    /// * [`PaymentGatewayError::OrderNotFound`] if there is no such order,
    /// * [`PaymentGatewayError::PaymentAlreadyExists`] if the payment id belongs to another order,
    /// * [`PaymentGatewayError::OrderModificationForbidden`] otherwise.
    async fn update_status_and_payment_id(
        &self,
        order_id: &OrderId,
        status: OrderStatusType,
        payment_id: &PaymentId,
    ) -> Result<StatusUpdate, PaymentGatewayError>;
}

#[derive(Debug, Clone, Error)]
pub enum PaymentGatewayError {
    #[error("Invalid request. {0}")]
    ValidationError(String),
    #[error("The payment signature is invalid.")]
    InvalidSignature,
    #[error("The requested order {0} does not exist")]
    OrderNotFound(OrderId),
    #[error("Cannot insert order, since it already exists with id {0}")]
    OrderAlreadyExists(OrderId),
    #[error("The payment provider could not complete the request. {0}")]
    UpstreamGatewayError(String),
    #[error("We have an internal database engine (configuration/uptime etc.) : {0}")]
    DatabaseError(String),
    #[error("The requested order change is forbidden.")]
    OrderModificationForbidden,
    #[error("Payment {0} has already been recorded against another order")]
    PaymentAlreadyExists(PaymentId),
}

impl From<sqlx::Error> for PaymentGatewayError {
    fn from(e: sqlx::Error) -> Self {
        PaymentGatewayError::DatabaseError(e.to_string())
    }
}
