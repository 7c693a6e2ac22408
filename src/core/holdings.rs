//! User-entered holdings and their valuation against oracle prices.

use crate::core::oracle::PriceQuotes;

/// Quantities the user declared for this invocation. Held in memory only,
/// never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Holdings {
    pub bitcoin: f64,
    pub dollars: f64,
}

impl Holdings {
    pub fn is_empty(&self) -> bool {
        self.bitcoin == 0.0 && self.dollars == 0.0
    }
}

/// Holdings combined with one refresh of oracle prices. A missing price
/// leaves the corresponding value as `None`; callers render it as pending.
#[derive(Debug, Clone)]
pub struct HoldingsValuation {
    pub holdings: Holdings,
    pub currency: String,
    pub bitcoin_price: Option<f64>,
    pub bitcoin_error: Option<String>,
    pub usd_rate: Option<f64>,
    pub usd_error: Option<String>,
}

impl HoldingsValuation {
    pub fn new(holdings: Holdings, quotes: &PriceQuotes, currency: &str) -> Self {
        HoldingsValuation {
            holdings,
            currency: currency.to_string(),
            bitcoin_price: quotes.bitcoin_price,
            bitcoin_error: quotes.bitcoin_error.clone(),
            usd_rate: quotes.usd_rate,
            usd_error: quotes.usd_error.clone(),
        }
    }

    /// Valuation without any prices, for contexts that skip the oracle.
    pub fn unpriced(holdings: Holdings, currency: &str) -> Self {
        HoldingsValuation {
            holdings,
            currency: currency.to_string(),
            bitcoin_price: None,
            bitcoin_error: None,
            usd_rate: None,
            usd_error: None,
        }
    }

    pub fn bitcoin_value(&self) -> Option<f64> {
        self.bitcoin_price.map(|p| p * self.holdings.bitcoin)
    }

    pub fn dollar_value(&self) -> Option<f64> {
        self.usd_rate.map(|r| r * self.holdings.dollars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn quotes(bitcoin: Option<f64>, usd: Option<f64>) -> PriceQuotes {
        PriceQuotes {
            bitcoin_price: bitcoin,
            bitcoin_error: bitcoin.is_none().then(|| "unavailable".to_string()),
            usd_rate: usd,
            usd_error: usd.is_none().then(|| "unavailable".to_string()),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_values_multiply_quantity_by_price() {
        let holdings = Holdings {
            bitcoin: 0.5,
            dollars: 100.0,
        };
        let valuation = HoldingsValuation::new(holdings, &quotes(Some(350000.0), Some(5.1)), "BRL");
        assert_eq!(valuation.bitcoin_value(), Some(175000.0));
        assert_eq!(valuation.dollar_value(), Some(510.0));
    }

    #[test]
    fn test_missing_prices_yield_no_value() {
        let holdings = Holdings {
            bitcoin: 0.5,
            dollars: 100.0,
        };
        let valuation = HoldingsValuation::new(holdings, &quotes(None, None), "BRL");
        assert_eq!(valuation.bitcoin_value(), None);
        assert_eq!(valuation.dollar_value(), None);
        assert!(valuation.bitcoin_error.is_some());
        assert!(valuation.usd_error.is_some());
    }

    #[test]
    fn test_empty_holdings() {
        assert!(Holdings::default().is_empty());
        assert!(
            !Holdings {
                bitcoin: 0.1,
                dollars: 0.0
            }
            .is_empty()
        );
    }
}
