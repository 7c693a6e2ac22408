use anyhow::Result;
use tracing::debug;

use super::ui;
use crate::core::holdings::{Holdings, HoldingsValuation};
use crate::core::oracle::{self, CryptoPriceProvider, FxRateProvider, POLL_INTERVAL, PriceQuotes};

/// Refreshes prices on the fixed polling interval until Ctrl-C. Each tick
/// is a fresh fetch; a failed source is shown as unavailable rather than
/// falling back to the previous value.
pub async fn run(
    crypto: &dyn CryptoPriceProvider,
    fx: &dyn FxRateProvider,
    holdings: Holdings,
    currency: &str,
) -> Result<()> {
    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    println!(
        "Refreshing prices every {} minutes. Press Ctrl-C to stop.",
        POLL_INTERVAL.as_secs() / 60
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let quotes = oracle::fetch_quotes(crypto, fx, currency).await;
                println!("{}", quote_line(&quotes, holdings, currency));
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("Watch loop cancelled");
                println!("Stopped.");
                break;
            }
        }
    }
    Ok(())
}

fn quote_line(quotes: &PriceQuotes, holdings: Holdings, currency: &str) -> String {
    let valuation = HoldingsValuation::new(holdings, quotes, currency);

    let bitcoin = match valuation.bitcoin_price {
        Some(p) => format!("BTC {currency} {p:.2}"),
        None => format!("BTC {}", ui::style_text("unavailable", ui::StyleType::Error)),
    };
    let usd = match valuation.usd_rate {
        Some(r) => format!("USD {currency} {r:.2}"),
        None => format!("USD {}", ui::style_text("unavailable", ui::StyleType::Error)),
    };
    let held = match (valuation.bitcoin_value(), valuation.dollar_value()) {
        (Some(b), Some(d)) => format!("holdings {currency} {:.2}", b + d),
        _ => "holdings pending".to_string(),
    };

    format!(
        "[{}] {bitcoin} | {usd} | {held}",
        quotes.fetched_at.format("%H:%M:%S")
    )
}
