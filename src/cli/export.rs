use anyhow::{Context, Result};
use std::path::Path;

use crate::core::store::DocumentStore;
use crate::core::transaction::{self, Transaction};

/// Writes the full transaction list as two-column CSV.
pub async fn run(store: &dyn DocumentStore, out: &Path) -> Result<()> {
    let transactions = transaction::fetch_all(store).await?;
    write_csv(&transactions, out)?;
    println!(
        "Exported {} transactions to {}",
        transactions.len(),
        out.display()
    );
    Ok(())
}

pub fn write_csv(transactions: &[Transaction], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    writer.write_record(["description", "amount"])?;
    for t in transactions {
        writer.write_record([t.description.as_str(), &t.amount.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn txn(description: &str, amount: &str) -> Transaction {
        Transaction {
            id: "t".to_string(),
            description: description.to_string(),
            amount: amount.parse().unwrap(),
            category: None,
            date: Utc::now(),
        }
    }

    #[test]
    fn test_csv_round_trip_recovers_pairs() {
        let transactions = vec![
            txn("Salary for May", "1000"),
            txn("Supermercado, Extra", "-150.25"),
            txn("quoted \"note\"", "-0.5"),
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transactions.csv");
        write_csv(&transactions, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(vec!["description", "amount"])
        );

        let pairs: Vec<(String, Decimal)> = reader
            .records()
            .map(|r| {
                let record = r.unwrap();
                (record[0].to_string(), record[1].parse().unwrap())
            })
            .collect();

        let expected: Vec<(String, Decimal)> = transactions
            .iter()
            .map(|t| (t.description.clone(), t.amount))
            .collect();
        assert_eq!(pairs, expected);
    }

    #[test]
    fn test_empty_list_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        write_csv(&[], &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), 0);
    }
}
