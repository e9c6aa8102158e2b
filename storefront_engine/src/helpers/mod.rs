mod payment_signature;

pub use payment_signature::{calculate_payment_signature, signature_message, verify_payment_signature};
