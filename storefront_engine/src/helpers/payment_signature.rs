//! # Payment confirmation signatures
//!
//! When a customer completes checkout, the payment provider hands the browser three values: the order id, the
//! payment id and a signature. The browser forwards these to us, and we must not take its word for it. The provider
//! computes the signature as
//!
//! ```text
//!    hex(HMAC_SHA256(key_secret, "{order_id}|{payment_id}"))
//! ```
//!
//! using the merchant's API key secret, which only the provider and this server know. Recomputing the HMAC and
//! comparing it to the one supplied proves that the provider saw this payment against this order.
//!
//! The hex digest is always 64 lower-case characters. Anything else is rejected outright, and the comparison of the
//! MAC itself runs in constant time.
use hmac::{Hmac, Mac};
use log::trace;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_HEX_LENGTH: usize = 64;

/// The message that is signed by the payment provider.
pub fn signature_message(order_id: &str, payment_id: &str) -> String {
    format!("{order_id}|{payment_id}")
}

fn new_mac(order_id: &str, payment_id: &str, secret: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(signature_message(order_id, payment_id).as_bytes());
    mac
}

/// Calculates the signature the payment provider would produce for the given order and payment ids.
pub fn calculate_payment_signature(order_id: &str, payment_id: &str, secret: &str) -> String {
    let mac = new_mac(order_id, payment_id, secret);
    hex::encode(mac.finalize().into_bytes())
}

/// Returns `true` if `signature` is the lower-case hex HMAC-SHA256 of `"{order_id}|{payment_id}"` under `secret`.
///
/// Malformed signatures (wrong length, upper-case or non-hex characters) are never valid.
pub fn verify_payment_signature(order_id: &str, payment_id: &str, signature: &str, secret: &str) -> bool {
    let well_formed = signature.len() == SIGNATURE_HEX_LENGTH
        && signature.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    if !well_formed {
        trace!("🔏️ Signature for order {order_id} is not a lower-case hex digest");
        return false;
    }
    let Ok(expected) = hex::decode(signature) else {
        return false;
    };
    new_mac(order_id, payment_id, secret).verify_slice(&expected).is_ok()
}
