use chrono::Utc;

/// Generates a merchant receipt reference for a new order, of the form `receipt_{unix_millis}`.
pub fn new_receipt_id() -> String {
    format!("receipt_{}", Utc::now().timestamp_millis())
}
