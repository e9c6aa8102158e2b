//! Storefront Engine
//!
//! The storefront engine holds the order-and-payment workflow for the storefront. A customer's checkout opens an
//! order with the payment provider, and the order is recorded locally with status `created`. Once the customer has
//! paid, the provider's signed confirmation is verified and only then is the order marked `paid`.
//!
//! The library is divided into these sections:
//! 1. Data types ([`mod@db_types`]) shared by every layer.
//! 2. Backend contracts ([`mod@traits`]). The Order Store and Customer Directory are defined as traits, and the
//!    SQLite backend ([`SqliteDatabase`]) implements them. The payment provider is reached through the
//!    [`PaymentGatewayClient`] trait, so the engine itself never speaks HTTP.
//! 3. The public API ([`OrderFlowApi`] and [`CustomerApi`]). API objects are constructed with their backends
//!    injected.
//! 4. Helpers for the provider's payment signatures ([`mod@helpers`]).
//!
//! The engine also publishes events that can be subscribed to. When an order is paid, an [`events::OrderPaidEvent`]
//! is emitted. Hook into it with [`events::EventHooks`] to, for example, send the customer a receipt.
pub mod db_types;
pub mod events;
pub mod helpers;
mod sfe_api;
pub mod traits;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
pub use sfe_api::{customer_api::CustomerApi, order_flow_api::OrderFlowApi, order_objects};
pub use traits::{
    CustomerApiError,
    CustomerManagement,
    GatewayClientError,
    OrderManagement,
    PaymentGatewayClient,
    PaymentGatewayError,
    RemoteOrder,
    StatusUpdate,
};
