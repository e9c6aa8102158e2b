use std::time::Duration;

use log::*;
use storefront_common::{helpers::non_empty_env, Secret};

pub const DEFAULT_RAZORPAY_API_URL: &str = "https://api.razorpay.com/v1";
pub const DEFAULT_RAZORPAY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct RazorpayConfig {
    /// The public key id, e.g. `rzp_live_xxxxxxxx`
    pub key_id: String,
    /// The key secret. Razorpay also uses this value to sign payment confirmations.
    pub key_secret: Secret<String>,
    pub api_url: String,
    /// Request timeout for every call made against the API.
    pub timeout: Duration,
}

impl Default for RazorpayConfig {
    fn default() -> Self {
        Self {
            key_id: String::default(),
            key_secret: Secret::default(),
            api_url: DEFAULT_RAZORPAY_API_URL.to_string(),
            timeout: DEFAULT_RAZORPAY_TIMEOUT,
        }
    }
}

impl RazorpayConfig {
    pub fn new(key_id: &str, key_secret: &str) -> Self {
        Self { key_id: key_id.to_string(), key_secret: Secret::from(key_secret), ..Default::default() }
    }

    pub fn new_from_env_or_default() -> Self {
        let key_id = non_empty_env("SFP_RAZORPAY_KEY_ID").unwrap_or_else(|| {
            warn!("SFP_RAZORPAY_KEY_ID not set. Calls to the Razorpay API will fail.");
            String::default()
        });
        let key_secret = Secret::new(non_empty_env("SFP_RAZORPAY_KEY_SECRET").unwrap_or_else(|| {
            warn!("SFP_RAZORPAY_KEY_SECRET not set. Calls to the Razorpay API and payment verification will fail.");
            String::default()
        }));
        let api_url = non_empty_env("SFP_RAZORPAY_API_URL").unwrap_or_else(|| {
            debug!("SFP_RAZORPAY_API_URL not set, using {DEFAULT_RAZORPAY_API_URL}");
            DEFAULT_RAZORPAY_API_URL.to_string()
        });
        let timeout = non_empty_env("SFP_RAZORPAY_TIMEOUT_SECS")
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("Invalid value for SFP_RAZORPAY_TIMEOUT_SECS ({s}). {e}. Using the default."))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_RAZORPAY_TIMEOUT);
        Self { key_id, key_secret, api_url, timeout }
    }
}
