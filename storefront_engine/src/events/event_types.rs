use crate::db_types::Order;

/// Published once, when an order moves from `created` to `paid`. Repeated confirmations of the same payment do not
/// publish it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderPaidEvent {
    pub order: Order,
}

impl OrderPaidEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}
