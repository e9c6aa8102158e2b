use mockall::mock;
use storefront_common::MinorUnits;
use storefront_engine::{
    db_types::{Customer, NewCustomer, NewOrder, Order, OrderId, OrderStatusType, PaymentId},
    CustomerApiError,
    CustomerManagement,
    GatewayClientError,
    OrderManagement,
    PaymentGatewayClient,
    PaymentGatewayError,
    RemoteOrder,
    StatusUpdate,
};

mock! {
    pub OrderManager {}
    impl OrderManagement for OrderManager {
        fn url(&self) -> &str;
        async fn insert_order(&self, order: NewOrder) -> Result<Order, PaymentGatewayError>;
        async fn fetch_order_by_order_id(&self, order_id: &OrderId) -> Result<Option<Order>, PaymentGatewayError>;
        async fn update_status_and_payment_id(&self, order_id: &OrderId, status: OrderStatusType, payment_id: &PaymentId) -> Result<StatusUpdate, PaymentGatewayError>;
    }
}

mock! {
    pub CustomerManager {}
    impl CustomerManagement for CustomerManager {
        async fn upsert_customer_by_email(&self, customer: NewCustomer) -> Result<Customer, CustomerApiError>;
        async fn fetch_customer_by_email(&self, email: &str) -> Result<Option<Customer>, CustomerApiError>;
    }
}

mock! {
    pub PaymentGateway {}
    impl PaymentGatewayClient for PaymentGateway {
        async fn create_remote_order(&self, amount: MinorUnits, currency: &str) -> Result<RemoteOrder, GatewayClientError>;
    }
}
