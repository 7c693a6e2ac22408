use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use crate::core::error::PriceFetchError;
use crate::core::oracle::CryptoPriceProvider;
use crate::providers::util::with_retry;

/// Bitcoin spot price from a CoinGecko-style `simple/price` endpoint.
pub struct CoinGeckoProvider {
    base_url: String,
    client: reqwest::Client,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str) -> Result<Self, PriceFetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("moneta/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(15))
            .build()?;
        Ok(CoinGeckoProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    bitcoin: Option<HashMap<String, f64>>,
}

#[async_trait]
impl CryptoPriceProvider for CoinGeckoProvider {
    async fn fetch_price(&self, currency: &str) -> Result<f64, PriceFetchError> {
        let vs = currency.to_lowercase();
        let url = format!(
            "{}/api/v3/simple/price?ids=bitcoin&vs_currencies={vs}",
            self.base_url
        );
        debug!("Requesting bitcoin price from {url}");

        let response = with_retry(|| async { self.client.get(&url).send().await }, 3, 500).await?;
        if !response.status().is_success() {
            return Err(PriceFetchError::Status(response.status().as_u16()));
        }

        let text = response.text().await?;
        let data: SimplePriceResponse = serde_json::from_str(&text)
            .map_err(|e| PriceFetchError::MalformedResponse(format!("bitcoin price: {e}")))?;

        data.bitcoin
            .as_ref()
            .and_then(|prices| prices.get(&vs))
            .copied()
            .ok_or_else(|| {
                PriceFetchError::MalformedResponse(format!(
                    "response has no 'bitcoin.{vs}' price field"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(mock_response: &str, status_code: u16) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .and(query_param("ids", "bitcoin"))
            .and(query_param("vs_currencies", "brl"))
            .respond_with(ResponseTemplate::new(status_code).set_body_string(mock_response))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_price_fetch() {
        let mock_server = create_mock_server(r#"{"bitcoin": {"brl": 350000.5}}"#, 200).await;
        let provider = CoinGeckoProvider::new(&mock_server.uri()).unwrap();

        let price = provider.fetch_price("BRL").await.unwrap();
        assert_eq!(price, 350000.5);
    }

    #[tokio::test]
    async fn test_missing_nested_field_is_malformed() {
        // Currency key present for another currency only.
        let mock_server = create_mock_server(r#"{"bitcoin": {"usd": 67000.0}}"#, 200).await;
        let provider = CoinGeckoProvider::new(&mock_server.uri()).unwrap();

        let result = provider.fetch_price("BRL").await;
        match result.unwrap_err() {
            PriceFetchError::MalformedResponse(reason) => {
                assert!(reason.contains("bitcoin.brl"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_bitcoin_object_is_malformed() {
        let mock_server = create_mock_server(r#"{}"#, 200).await;
        let provider = CoinGeckoProvider::new(&mock_server.uri()).unwrap();

        let result = provider.fetch_price("BRL").await;
        assert!(matches!(
            result.unwrap_err(),
            PriceFetchError::MalformedResponse(_)
        ));
    }

    #[tokio::test]
    async fn test_http_error_is_classified() {
        let mock_server = create_mock_server("Server Error", 500).await;
        let provider = CoinGeckoProvider::new(&mock_server.uri()).unwrap();

        let result = provider.fetch_price("BRL").await;
        assert!(matches!(result.unwrap_err(), PriceFetchError::Status(500)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let mock_server = create_mock_server("<html>rate limited</html>", 200).await;
        let provider = CoinGeckoProvider::new(&mock_server.uri()).unwrap();

        let result = provider.fetch_price("BRL").await;
        assert!(matches!(
            result.unwrap_err(),
            PriceFetchError::MalformedResponse(_)
        ));
    }
}
