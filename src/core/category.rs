//! Persisted categories and the category classifier.
//!
//! Classification is a fixed rule chain: persisted keyword mappings win,
//! then income, then the large-expense threshold, then the built-in grocery
//! and bill keyword sets. The persisted list is an explicit parameter, so
//! callers decide when it is refreshed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::StoreError;
use crate::core::store::{CATEGORIES, Document, DocumentStore};
use crate::core::transaction::TransactionKind;

pub const INCOME_LABEL: &str = "Income";
pub const LARGE_EXPENSE_LABEL: &str = "Large Expense";
pub const FOOD_LABEL: &str = "Food";
pub const BILLS_LABEL: &str = "Bills";
pub const OTHER_LABEL: &str = "Other";

/// Amounts above this (absolute value) classify as a large expense.
const LARGE_EXPENSE_THRESHOLD: u32 = 1000;

// Keyword sets keep the original Portuguese terms alongside English ones.
const GROCERY_KEYWORDS: &[&str] = &["mercado", "supermercado", "grocery", "market"];
const BILL_KEYWORDS: &[&str] = &["conta", "fatura", "bill", "invoice"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub keywords: Vec<String>,
}

impl Category {
    fn matches(&self, description: &str) -> bool {
        let haystack = description.to_lowercase();
        self.keywords
            .iter()
            .any(|k| haystack.contains(&k.to_lowercase()))
    }

    /// Decodes a store document. `keywords` is optional on the wire and
    /// defaults to empty, matching records written before keywords existed.
    pub fn from_document(doc: &Document) -> Result<Self, StoreError> {
        let name = doc
            .fields
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::MalformedRecord {
                collection: CATEGORIES.to_string(),
                reason: format!("{}: missing field 'name'", doc.id),
            })?
            .to_string();
        let keywords = doc
            .fields
            .get("keywords")
            .and_then(Value::as_array)
            .map(|words| {
                words
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Category {
            id: doc.id.clone(),
            name,
            keywords,
        })
    }
}

/// Fetches the persisted category list, in store order.
pub async fn fetch_all(store: &dyn DocumentStore) -> Result<Vec<Category>, StoreError> {
    let docs = store.read_all(CATEGORIES).await?;
    docs.iter().map(Category::from_document).collect()
}

/// Assigns a category label. First match wins; always returns a label.
pub fn classify(
    categories: &[Category],
    description: &str,
    amount: Decimal,
    kind: TransactionKind,
) -> String {
    if let Some(category) = categories.iter().find(|c| c.matches(description)) {
        return category.name.clone();
    }
    if kind == TransactionKind::Income {
        return INCOME_LABEL.to_string();
    }
    if amount.abs() > Decimal::from(LARGE_EXPENSE_THRESHOLD) {
        return LARGE_EXPENSE_LABEL.to_string();
    }
    let haystack = description.to_lowercase();
    if GROCERY_KEYWORDS.iter().any(|k| haystack.contains(k)) {
        return FOOD_LABEL.to_string();
    }
    if BILL_KEYWORDS.iter().any(|k| haystack.contains(k)) {
        return BILLS_LABEL.to_string();
    }
    OTHER_LABEL.to_string()
}
