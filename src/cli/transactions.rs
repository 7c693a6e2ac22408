use anyhow::Result;
use chrono::Utc;
use comfy_table::Cell;
use rust_decimal::Decimal;
use tracing::debug;

use super::ui;
use crate::core::category;
use crate::core::ledger::Ledger;
use crate::core::snapshot::FinancialSnapshot;
use crate::core::store::{DocumentStore, TRANSACTIONS};
use crate::core::transaction::{self, Transaction, TransactionKind, transaction_fields};

/// Records a new transaction: classify, stamp with the current time, store,
/// then reload and report the fresh totals.
pub async fn add(
    store: &dyn DocumentStore,
    description: &str,
    amount: Decimal,
    currency: &str,
) -> Result<FinancialSnapshot> {
    let categories = category::fetch_all(store).await?;
    let label = category::classify(
        &categories,
        description,
        amount,
        TransactionKind::from_amount(amount),
    );

    let fields = transaction_fields(description, amount, &label, Utc::now());
    let id = store.create(TRANSACTIONS, &fields).await?;
    debug!("Created transaction {id} with category '{label}'");
    println!("Added '{description}' ({label}).");

    reload_and_report(store, currency).await
}

/// Replaces a transaction's description and amount, recategorizing it
/// against the current category list.
pub async fn edit(
    store: &dyn DocumentStore,
    id: &str,
    description: &str,
    amount: Decimal,
    currency: &str,
) -> Result<FinancialSnapshot> {
    let categories = category::fetch_all(store).await?;
    let label = category::classify(
        &categories,
        description,
        amount,
        TransactionKind::from_amount(amount),
    );

    let mut fields = serde_json::Map::new();
    fields.insert("description".into(), description.into());
    fields.insert("amount".into(), amount.to_string().into());
    fields.insert("category".into(), label.clone().into());
    store.update(TRANSACTIONS, id, &fields).await?;
    println!("Updated '{description}' ({label}).");

    reload_and_report(store, currency).await
}

pub async fn remove(
    store: &dyn DocumentStore,
    id: &str,
    currency: &str,
) -> Result<FinancialSnapshot> {
    store.delete(TRANSACTIONS, id).await?;
    println!("Removed transaction {id}.");

    reload_and_report(store, currency).await
}

/// Lists transactions, optionally filtered by a term matched against the
/// description (case-insensitive) or the amount text.
pub async fn list(
    store: &dyn DocumentStore,
    search: Option<&str>,
    currency: &str,
) -> Result<Vec<Transaction>> {
    let transactions = transaction::fetch_all(store).await?;
    let filtered = filter_transactions(transactions, search);

    if filtered.is_empty() {
        println!("No transactions found.");
        return Ok(filtered);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Date"),
        ui::header_cell("Description"),
        ui::header_cell("Category"),
        ui::header_cell("Type"),
        ui::header_cell(&format!("Amount ({currency})")),
    ]);
    for t in &filtered {
        table.add_row(vec![
            Cell::new(&t.id),
            Cell::new(t.date.format("%Y-%m-%d").to_string()),
            Cell::new(&t.description),
            Cell::new(t.category.as_deref().unwrap_or("-")),
            Cell::new(t.kind().to_string()),
            ui::amount_cell(t.amount),
        ]);
    }
    println!("{table}");

    Ok(filtered)
}

pub fn filter_transactions(
    transactions: Vec<Transaction>,
    search: Option<&str>,
) -> Vec<Transaction> {
    let Some(term) = search.map(str::to_lowercase) else {
        return transactions;
    };
    transactions
        .into_iter()
        .filter(|t| {
            t.description.to_lowercase().contains(&term) || t.amount.to_string().contains(&term)
        })
        .collect()
}

async fn reload_and_report(store: &dyn DocumentStore, currency: &str) -> Result<FinancialSnapshot> {
    let mut ledger = Ledger::new();
    let token = ledger.begin_fetch();
    let transactions = transaction::fetch_all(store).await?;
    ledger.complete_fetch(token, transactions);

    let snapshot = ledger.snapshot();
    println!(
        "Balance: {currency} {:.2} (income {currency} {:.2}, expenses {currency} {:.2})",
        snapshot.balance, snapshot.income, snapshot.expense
    );
    Ok(snapshot.clone())
}
