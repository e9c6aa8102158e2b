//! # Storefront payment server
//! This crate hosts the HTTP server for the storefront. It is responsible for:
//! * Recording customer contact details.
//! * Opening orders with the payment provider when a customer checks out.
//! * Accepting payment confirmations, and marking orders as paid once the confirmation signature checks out.
//!
//! All the business logic lives in `storefront_engine`. This crate only translates between HTTP and the engine APIs.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/save-details`: Save a customer's contact details.
//! * `/api/create-order`: Open a new order with the payment provider.
//! * `/api/verify-payment`: Confirm a payment against its order.
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod integrations;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
