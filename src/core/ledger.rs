//! In-memory transaction state.
//!
//! The ledger is the single owner of the fetched transaction list. Every
//! mutation recomputes the snapshot and hands it back, so callers never
//! read half-updated aggregates. Reloads go through fetch tokens: a token
//! is issued when a fetch starts, and only the completion carrying the
//! latest issued token is applied. A slow early fetch finishing after a
//! later one is discarded instead of overwriting newer data.

use tracing::debug;

use crate::core::snapshot::{FinancialSnapshot, aggregate};
use crate::core::transaction::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

#[derive(Debug, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    snapshot: FinancialSnapshot,
    issued: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger::default()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn snapshot(&self) -> &FinancialSnapshot {
        &self.snapshot
    }

    /// Issues the token for a fetch that is about to start.
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.issued += 1;
        FetchToken(self.issued)
    }

    /// Applies a completed fetch, unless a newer fetch has been issued in
    /// the meantime. Returns the fresh snapshot, or `None` for a stale
    /// completion (state is left untouched).
    pub fn complete_fetch(
        &mut self,
        token: FetchToken,
        transactions: Vec<Transaction>,
    ) -> Option<&FinancialSnapshot> {
        if token.0 != self.issued {
            debug!(
                "Discarding stale fetch completion (token {}, latest {})",
                token.0, self.issued
            );
            return None;
        }
        self.transactions = transactions;
        self.recompute();
        Some(&self.snapshot)
    }

    pub fn insert(&mut self, transaction: Transaction) -> &FinancialSnapshot {
        self.transactions.push(transaction);
        self.recompute();
        &self.snapshot
    }

    /// Full replace by id; unknown ids leave the list unchanged.
    pub fn replace(&mut self, transaction: Transaction) -> &FinancialSnapshot {
        if let Some(slot) = self.transactions.iter_mut().find(|t| t.id == transaction.id) {
            *slot = transaction;
        }
        self.recompute();
        &self.snapshot
    }

    pub fn remove(&mut self, id: &str) -> &FinancialSnapshot {
        self.transactions.retain(|t| t.id != id);
        self.recompute();
        &self.snapshot
    }

    fn recompute(&mut self) {
        self.snapshot = aggregate(&self.transactions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn txn(id: &str, amount: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            description: format!("txn {id}"),
            amount: amount.parse().unwrap(),
            category: None,
            date: Utc::now(),
        }
    }

    #[test]
    fn test_mutations_recompute_snapshot() {
        let mut ledger = Ledger::new();
        let snapshot = ledger.insert(txn("a", "1000"));
        assert_eq!(snapshot.balance, Decimal::from(1000));

        let snapshot = ledger.insert(txn("b", "-400"));
        assert_eq!(snapshot.balance, Decimal::from(600));

        let snapshot = ledger.replace(txn("b", "-100"));
        assert_eq!(snapshot.balance, Decimal::from(900));

        let snapshot = ledger.remove("a");
        assert_eq!(snapshot.balance, Decimal::from(-100));
    }

    #[test]
    fn test_stale_fetch_completion_is_discarded() {
        let mut ledger = Ledger::new();
        let slow = ledger.begin_fetch();
        let fast = ledger.begin_fetch();

        // The later fetch finishes first and is applied.
        assert!(ledger.complete_fetch(fast, vec![txn("new", "10")]).is_some());

        // The earlier fetch finishes afterwards with stale data.
        assert!(ledger.complete_fetch(slow, vec![txn("old", "99")]).is_none());

        assert_eq!(ledger.transactions().len(), 1);
        assert_eq!(ledger.transactions()[0].id, "new");
        assert_eq!(ledger.snapshot().balance, Decimal::from(10));
    }

    #[test]
    fn test_fetch_then_mutate() {
        let mut ledger = Ledger::new();
        let token = ledger.begin_fetch();
        ledger
            .complete_fetch(token, vec![txn("a", "5"), txn("b", "-2")])
            .unwrap();

        let snapshot = ledger.insert(txn("c", "1"));
        assert_eq!(snapshot.balance, Decimal::from(4));
        assert_eq!(snapshot.recent.len(), 3);
    }
}
