use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use crate::core::error::PriceFetchError;
use crate::core::oracle::FxRateProvider;
use crate::providers::util::with_retry;

/// USD exchange rate from an exchangerate-api-style `latest` endpoint.
pub struct ExchangeRateProvider {
    base_url: String,
    client: reqwest::Client,
}

impl ExchangeRateProvider {
    pub fn new(base_url: &str) -> Result<Self, PriceFetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("moneta/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(15))
            .build()?;
        Ok(ExchangeRateProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: Option<HashMap<String, f64>>,
}

#[async_trait]
impl FxRateProvider for ExchangeRateProvider {
    async fn fetch_rate(&self, currency: &str) -> Result<f64, PriceFetchError> {
        let quote = currency.to_uppercase();
        let url = format!("{}/v4/latest/USD", self.base_url);
        debug!("Requesting USD rates from {url}");

        let response = with_retry(|| async { self.client.get(&url).send().await }, 3, 500).await?;
        if !response.status().is_success() {
            return Err(PriceFetchError::Status(response.status().as_u16()));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| PriceFetchError::MalformedResponse(format!("USD rates: {e}")))?;

        data.rates
            .as_ref()
            .and_then(|rates| rates.get(&quote))
            .copied()
            .ok_or_else(|| {
                PriceFetchError::MalformedResponse(format!(
                    "response has no 'rates.{quote}' field"
                ))
            })
    }
}
