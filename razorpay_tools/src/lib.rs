//! # Razorpay tools
//!
//! A small client for the parts of the Razorpay REST API that the storefront needs: creating and fetching payment
//! orders. Authentication uses the merchant key id and key secret over HTTP basic auth.
mod api;
mod config;
mod data_objects;
mod error;

pub mod helpers;

pub use api::RazorpayApi;
pub use config::RazorpayConfig;
pub use data_objects::{NewRazorpayOrder, RazorpayOrder};
pub use error::RazorpayApiError;
