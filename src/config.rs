use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::utils::retry::RetryConfig;

// ============================================================================
// Core Configuration
// ============================================================================
//
// Pricing and timing knobs for the order core. Defaults mirror the
// restaurant's published numbers (8% tax, 45-minute delivery lead); every
// value can be overridden through the environment.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Sales tax rate in basis points (800 = 8%)
    pub tax_rate_bps: u32,
    /// Lead time quoted for delivery orders
    pub delivery_lead_minutes: i64,
    /// Bound on every payment/persistence call; elapsing surfaces as a
    /// retryable failure instead of hanging the checkout
    pub external_call_timeout: Duration,
    /// Backoff schedule for the idempotent order save
    pub persistence_retry: RetryConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            tax_rate_bps: 800,
            delivery_lead_minutes: 45,
            external_call_timeout: Duration::from_secs(5),
            persistence_retry: RetryConfig::default(),
        }
    }
}

impl CoreConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tax_rate_bps: load_or("KOMEAT_TAX_RATE_BPS", defaults.tax_rate_bps),
            delivery_lead_minutes: load_or(
                "KOMEAT_DELIVERY_LEAD_MINUTES",
                defaults.delivery_lead_minutes,
            ),
            external_call_timeout: Duration::from_millis(load_or(
                "KOMEAT_EXTERNAL_TIMEOUT_MS",
                defaults.external_call_timeout.as_millis() as u64,
            )),
            persistence_retry: defaults.persistence_retry,
        }
    }
}

fn load_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Display + Copy,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value ({e}), using default: {default}");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoreConfig::default();
        assert_eq!(config.tax_rate_bps, 800);
        assert_eq!(config.delivery_lead_minutes, 45);
        assert_eq!(config.external_call_timeout, Duration::from_secs(5));
    }
}
