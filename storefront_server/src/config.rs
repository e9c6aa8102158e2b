//! Server configuration
//!
//! Everything is read from `SFP_*` environment variables (a `.env` file is loaded first, if present). Missing or
//! invalid values fall back to defaults, with a log message saying so.
use std::env;

use log::*;
use razorpay_tools::RazorpayConfig;
use storefront_common::{
    helpers::{non_empty_env, parse_boolean_flag},
    DEFAULT_CURRENCY_CODE,
};

const DEFAULT_SFP_HOST: &str = "127.0.0.1";
const DEFAULT_SFP_PORT: u16 = 8360;
const DEFAULT_SFP_DATABASE_URL: &str = "sqlite://data/storefront.db";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// The currency code that orders are opened in with the payment provider.
    pub currency: String,
    /// If true (the default), pending database migrations are applied when the server starts.
    pub run_migrations: bool,
    /// Payment provider configuration. The key secret doubles as the payment signature verification key.
    pub razorpay: RazorpayConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SFP_HOST.to_string(),
            port: DEFAULT_SFP_PORT,
            database_url: DEFAULT_SFP_DATABASE_URL.to_string(),
            currency: DEFAULT_CURRENCY_CODE.to_string(),
            run_migrations: true,
            razorpay: RazorpayConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("SFP_HOST").ok().unwrap_or_else(|| DEFAULT_SFP_HOST.into());
        let port = env::var("SFP_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for SFP_PORT. {e} Using the default, {DEFAULT_SFP_PORT}, instead."
                    );
                    DEFAULT_SFP_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_SFP_PORT);
        let database_url = non_empty_env("SFP_DATABASE_URL").unwrap_or_else(|| {
            warn!("🪛️ SFP_DATABASE_URL is not set. Using the default, {DEFAULT_SFP_DATABASE_URL}.");
            DEFAULT_SFP_DATABASE_URL.to_string()
        });
        let currency = non_empty_env("SFP_CURRENCY").map(|s| s.to_uppercase()).unwrap_or_else(|| {
            info!("🪛️ SFP_CURRENCY is not set. Orders will be opened in {DEFAULT_CURRENCY_CODE}.");
            DEFAULT_CURRENCY_CODE.to_string()
        });
        let run_migrations = parse_boolean_flag(env::var("SFP_RUN_MIGRATIONS").ok(), true);
        let razorpay = RazorpayConfig::new_from_env_or_default();
        if razorpay.key_secret.is_empty() {
            warn!(
                "🚨️ SFP_RAZORPAY_KEY_SECRET is empty. Every payment confirmation will be rejected until it is set to \
                 the key secret of your Razorpay account."
            );
        }
        Self { host, port, database_url, currency, run_migrations, razorpay }
    }
}
