use std::{env, path::PathBuf, time::Duration};

/// Simulated payment gateway latency
pub const DEFAULT_PAYMENT_DELAY_MS: u64 = 2500;

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: String,
    /// JSON file replacing the bundled catalog
    pub catalog_path: Option<PathBuf>,
    pub payment_delay: Duration,
    pub upi_payee_address: String,
    pub upi_payee_name: String,
    /// Base URL of the assistant backend serving `POST /api/chat`
    pub chat_api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let payment_delay = env::var("PAYMENT_DELAY_MS")
            .ok()
            .and_then(|ms| ms.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.payment_delay);

        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            catalog_path: env::var("CATALOG_PATH").ok().map(PathBuf::from),
            payment_delay,
            upi_payee_address: env::var("UPI_PAYEE_ADDRESS").unwrap_or(defaults.upi_payee_address),
            upi_payee_name: env::var("UPI_PAYEE_NAME").unwrap_or(defaults.upi_payee_name),
            chat_api_url: env::var("CHAT_API_URL").unwrap_or(defaults.chat_api_url),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:3000".to_string(),
            catalog_path: None,
            payment_delay: Duration::from_millis(DEFAULT_PAYMENT_DELAY_MS),
            upi_payee_address: "carehub@upi".to_string(),
            upi_payee_name: "CareHub Health".to_string(),
            chat_api_url: "http://localhost:8000".to_string(),
        }
    }
}
