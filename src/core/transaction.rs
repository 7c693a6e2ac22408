//! Transaction model and store record decoding.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

use crate::core::error::StoreError;
use crate::core::store::{Document, DocumentStore, TRANSACTIONS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// A zero amount counts as income.
    pub fn from_amount(amount: Decimal) -> Self {
        if amount < Decimal::ZERO {
            TransactionKind::Expense
        } else {
            TransactionKind::Income
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TransactionKind::Income => "income",
                TransactionKind::Expense => "expense",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount: Decimal,
    pub category: Option<String>,
    pub date: DateTime<Utc>,
}

impl Transaction {
    /// Derived from the amount sign; a zero amount counts as income.
    pub fn kind(&self) -> TransactionKind {
        TransactionKind::from_amount(self.amount)
    }

    /// Decodes a store document. The store does not enforce field types, so
    /// the amount is coerced from either a JSON number or a numeric string.
    pub fn from_document(doc: &Document) -> Result<Self, StoreError> {
        let description = required_str(doc, "description")?.to_string();
        let amount_value = doc
            .fields
            .get("amount")
            .ok_or_else(|| malformed(&doc.id, "missing field 'amount'"))?;
        let amount = coerce_amount(amount_value)
            .ok_or_else(|| malformed(&doc.id, "field 'amount' is not numeric"))?;
        let date = DateTime::parse_from_rfc3339(required_str(doc, "date")?)
            .map_err(|e| malformed(&doc.id, &format!("invalid date: {e}")))?
            .with_timezone(&Utc);
        let category = doc
            .fields
            .get("category")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Transaction {
            id: doc.id.clone(),
            description,
            amount,
            category,
            date,
        })
    }
}

/// Builds the fields of a new or replaced transaction record. The amount is
/// written as a string so the round trip through the store is exact.
pub fn transaction_fields(
    description: &str,
    amount: Decimal,
    category: &str,
    date: DateTime<Utc>,
) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("description".into(), Value::String(description.to_string()));
    fields.insert("amount".into(), Value::String(amount.to_string()));
    fields.insert("category".into(), Value::String(category.to_string()));
    fields.insert("date".into(), Value::String(date.to_rfc3339()));
    fields
}

/// Fetches the full transaction list, in store order.
pub async fn fetch_all(store: &dyn DocumentStore) -> Result<Vec<Transaction>, StoreError> {
    let docs = store.read_all(TRANSACTIONS).await?;
    docs.iter().map(Transaction::from_document).collect()
}

fn coerce_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => n.to_string().parse().ok(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn required_str<'a>(doc: &'a Document, name: &str) -> Result<&'a str, StoreError> {
    doc.fields
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(&doc.id, &format!("missing field '{name}'")))
}

fn malformed(id: &str, reason: &str) -> StoreError {
    StoreError::MalformedRecord {
        collection: TRANSACTIONS.to_string(),
        reason: format!("{id}: {reason}"),
    }
}
