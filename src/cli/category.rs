use anyhow::Result;
use comfy_table::Cell;
use serde_json::{Map, Value, json};

use super::ui;
use crate::core::category::{self, Category};
use crate::core::store::{CATEGORIES, DocumentStore};

/// Persists a category with its keyword mappings. Takes effect on the next
/// classification; nothing is cached between commands.
pub async fn add(store: &dyn DocumentStore, name: &str, keywords: &[String]) -> Result<()> {
    let mut fields = Map::new();
    fields.insert("name".into(), Value::String(name.to_string()));
    fields.insert("keywords".into(), json!(keywords));
    let id = store.create(CATEGORIES, &fields).await?;
    println!("Added category '{name}' ({id}).");
    Ok(())
}

pub async fn list(store: &dyn DocumentStore) -> Result<Vec<Category>> {
    let categories = category::fetch_all(store).await?;
    if categories.is_empty() {
        println!("No categories defined.");
        return Ok(categories);
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("ID"),
        ui::header_cell("Name"),
        ui::header_cell("Keywords"),
    ]);
    for c in &categories {
        table.add_row(vec![
            Cell::new(&c.id),
            Cell::new(&c.name),
            Cell::new(c.keywords.join(", ")),
        ]);
    }
    println!("{table}");

    Ok(categories)
}

pub async fn remove(store: &dyn DocumentStore, id: &str) -> Result<()> {
    store.delete(CATEGORIES, id).await?;
    println!("Removed category {id}.");
    Ok(())
}
