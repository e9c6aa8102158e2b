//! # Storefront engine public API
//!
//! The `sfe_api` module exposes the programmatic API of the storefront engine. Each API object is created by
//! supplying the backends it needs, so that tests (and alternative deployments) can substitute their own.
//!
//! * [`order_flow_api`] is the Order Lifecycle Manager. It opens orders with the payment provider and confirms
//!   payments by checking the provider's signature before marking an order as paid.
//! * [`customer_api`] manages the customer directory.
//!
//! ```rust,ignore
//! use storefront_engine::{OrderFlowApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url(...).await?;
//! let api = OrderFlowApi::new(db, gateway, Secret::new(key_secret));
//! let remote_order = api.create_order(MinorUnits::from(55000), items, details).await?;
//! ```
pub mod customer_api;
pub mod order_flow_api;
pub mod order_objects;
