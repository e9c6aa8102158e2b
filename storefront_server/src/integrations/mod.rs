//! Adapters that connect the engine's backend traits to concrete third-party services.
mod razorpay;

pub use razorpay::RazorpayGateway;
