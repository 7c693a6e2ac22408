use anyhow::Result;
use comfy_table::Cell;

use super::ui;
use crate::core::holdings::{Holdings, HoldingsValuation};
use crate::core::ledger::Ledger;
use crate::core::oracle::{self, CryptoPriceProvider, FxRateProvider};
use crate::core::snapshot::FinancialSnapshot;
use crate::core::store::DocumentStore;
use crate::core::transaction;

/// Displays the current snapshot, recent transactions, and holdings
/// valuation. The transaction fetch and the two price fetches run
/// concurrently; a failed price source degrades its own column only.
pub async fn run(
    store: &dyn DocumentStore,
    crypto: &dyn CryptoPriceProvider,
    fx: &dyn FxRateProvider,
    holdings: Holdings,
    currency: &str,
) -> Result<()> {
    let pb = ui::new_progress_bar(2, true);
    pb.set_message("Fetching data...");

    let transactions = async {
        let result = transaction::fetch_all(store).await;
        pb.inc(1);
        result
    };
    let quotes = async {
        let result = oracle::fetch_quotes(crypto, fx, currency).await;
        pb.inc(1);
        result
    };
    let (transactions, quotes) = futures::join!(transactions, quotes);
    pb.finish_and_clear();

    let mut ledger = Ledger::new();
    let token = ledger.begin_fetch();
    ledger.complete_fetch(token, transactions?);
    let snapshot = ledger.snapshot();

    print_overview(snapshot, currency);
    ui::print_separator();
    print_recent(snapshot, currency);
    ui::print_separator();

    let valuation = HoldingsValuation::new(holdings, &quotes, currency);
    print_holdings(&valuation);
    println!(
        "{}",
        ui::style_text(
            &format!("Prices as of {}", quotes.fetched_at.format("%Y-%m-%d %H:%M:%S UTC")),
            ui::StyleType::Subtle
        )
    );

    Ok(())
}

fn print_overview(snapshot: &FinancialSnapshot, currency: &str) {
    println!("{}\n", ui::style_text("Overview", ui::StyleType::Title));

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(&format!("Balance ({currency})")),
        ui::header_cell(&format!("Income ({currency})")),
        ui::header_cell(&format!("Expenses ({currency})")),
    ]);
    table.add_row(vec![
        ui::amount_cell(snapshot.balance),
        ui::amount_cell(snapshot.income),
        ui::amount_cell(-snapshot.expense),
    ]);
    println!("{table}");
}

fn print_recent(snapshot: &FinancialSnapshot, currency: &str) {
    println!(
        "{}\n",
        ui::style_text("Recent transactions", ui::StyleType::Title)
    );

    if snapshot.recent.is_empty() {
        println!("No transactions found.");
        return;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("Description"),
        ui::header_cell("Category"),
        ui::header_cell(&format!("Amount ({currency})")),
    ]);
    for t in &snapshot.recent {
        table.add_row(vec![
            Cell::new(t.date.format("%Y-%m-%d").to_string()),
            Cell::new(&t.description),
            Cell::new(t.category.as_deref().unwrap_or("-")),
            ui::amount_cell(t.amount),
        ]);
    }
    println!("{table}");
}

fn print_holdings(valuation: &HoldingsValuation) {
    let currency = valuation.currency.as_str();
    println!("{}\n", ui::style_text("Holdings", ui::StyleType::Title));

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Asset"),
        ui::header_cell("Quantity"),
        ui::header_cell(&format!("Price ({currency})")),
        ui::header_cell(&format!("Value ({currency})")),
    ]);
    table.add_row(vec![
        Cell::new("Bitcoin"),
        Cell::new(format!("{}", valuation.holdings.bitcoin)),
        ui::format_optional_cell(valuation.bitcoin_price, |p| format!("{p:.2}")),
        ui::format_optional_cell(valuation.bitcoin_value(), |v| format!("{v:.2}")),
    ]);
    table.add_row(vec![
        Cell::new("Dollars"),
        Cell::new(format!("{}", valuation.holdings.dollars)),
        ui::format_optional_cell(valuation.usd_rate, |r| format!("{r:.2}")),
        ui::format_optional_cell(valuation.dollar_value(), |v| format!("{v:.2}")),
    ]);
    println!("{table}");

    if let Some(error) = &valuation.bitcoin_error {
        println!(
            "{}",
            ui::style_text(
                &format!("Bitcoin price unavailable: {error}"),
                ui::StyleType::Error
            )
        );
    }
    if let Some(error) = &valuation.usd_error {
        println!(
            "{}",
            ui::style_text(
                &format!("USD rate unavailable: {error}"),
                ui::StyleType::Error
            )
        );
    }
}
