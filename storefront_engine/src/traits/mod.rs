//! # Backend contracts
//!
//! The traits in this module define what the order flow needs from the world outside the engine.
//!
//! * [`OrderManagement`] is the Order Store. Backends persist orders keyed by the provider-issued order id and must
//!   perform status changes as a single atomic conditional write.
//! * [`CustomerManagement`] is the Customer Directory, an upsert-by-email store of contact records.
//! * [`PaymentGatewayClient`] opens orders with the payment provider. The engine never talks HTTP itself.
//!
//! [`SqliteDatabase`](crate::SqliteDatabase) implements both storage traits.
mod customer_management;
mod order_management;
mod payment_gateway_client;

pub use customer_management::{CustomerApiError, CustomerManagement};
pub use order_management::{OrderManagement, PaymentGatewayError, StatusUpdate};
pub use payment_gateway_client::{GatewayClientError, PaymentGatewayClient, RemoteOrder};
