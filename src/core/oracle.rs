//! Price oracle abstractions.
//!
//! Two independent sources: a crypto spot price and a USD exchange rate,
//! both quoted in the configured display currency. Each source fails on its
//! own; one failing never hides the other's result.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::warn;

use crate::core::error::PriceFetchError;

/// Fixed refresh cadence for the watch loop.
pub const POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[async_trait]
pub trait CryptoPriceProvider: Send + Sync {
    /// Bitcoin spot price quoted in `currency`.
    async fn fetch_price(&self, currency: &str) -> Result<f64, PriceFetchError>;
}

#[async_trait]
pub trait FxRateProvider: Send + Sync {
    /// How much one US dollar is worth in `currency`.
    async fn fetch_rate(&self, currency: &str) -> Result<f64, PriceFetchError>;
}

/// Result of one refresh. A missing price always comes with the error that
/// caused it; stale values are never carried over from earlier refreshes.
#[derive(Debug, Clone)]
pub struct PriceQuotes {
    pub bitcoin_price: Option<f64>,
    pub bitcoin_error: Option<String>,
    pub usd_rate: Option<f64>,
    pub usd_error: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

/// Fetches both sources concurrently.
pub async fn fetch_quotes(
    crypto: &dyn CryptoPriceProvider,
    fx: &dyn FxRateProvider,
    currency: &str,
) -> PriceQuotes {
    let (bitcoin, usd) = futures::join!(crypto.fetch_price(currency), fx.fetch_rate(currency));

    let (bitcoin_price, bitcoin_error) = split(bitcoin, "bitcoin price");
    let (usd_rate, usd_error) = split(usd, "USD rate");

    PriceQuotes {
        bitcoin_price,
        bitcoin_error,
        usd_rate,
        usd_error,
        fetched_at: Utc::now(),
    }
}

fn split(result: Result<f64, PriceFetchError>, what: &str) -> (Option<f64>, Option<String>) {
    match result {
        Ok(value) => (Some(value), None),
        Err(e) => {
            warn!("Failed to fetch {what}: {e}");
            (None, Some(e.to_string()))
        }
    }
}
