use anyhow::Result;

use crate::core::advice::generate_advice;
use crate::core::holdings::{Holdings, HoldingsValuation};
use crate::core::ledger::Ledger;
use crate::core::oracle::{self, CryptoPriceProvider, FxRateProvider};
use crate::core::store::DocumentStore;
use crate::core::transaction;

/// Builds and prints the advice report from the current snapshot and
/// holdings. The report itself is pure; only the data fetches do I/O.
pub async fn run(
    store: &dyn DocumentStore,
    crypto: &dyn CryptoPriceProvider,
    fx: &dyn FxRateProvider,
    holdings: Holdings,
    currency: &str,
) -> Result<String> {
    let (transactions, quotes) = futures::join!(
        transaction::fetch_all(store),
        oracle::fetch_quotes(crypto, fx, currency)
    );

    let mut ledger = Ledger::new();
    let token = ledger.begin_fetch();
    ledger.complete_fetch(token, transactions?);

    let valuation = HoldingsValuation::new(holdings, &quotes, currency);
    let report = generate_advice(ledger.snapshot(), &valuation);
    println!("{report}");
    Ok(report)
}
