//! Aggregation over the full transaction list.

use rust_decimal::Decimal;

use crate::core::transaction::Transaction;

/// How many trailing transactions the snapshot keeps for display and advice.
pub const RECENT_WINDOW: usize = 5;

/// Derived aggregate over the transaction list. Never persisted; recomputed
/// in full on every list change.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialSnapshot {
    pub balance: Decimal,
    pub income: Decimal,
    pub expense: Decimal,
    pub recent: Vec<Transaction>,
}

impl Default for FinancialSnapshot {
    fn default() -> Self {
        FinancialSnapshot::empty()
    }
}

impl FinancialSnapshot {
    pub fn empty() -> Self {
        FinancialSnapshot {
            balance: Decimal::ZERO,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
            recent: Vec::new(),
        }
    }
}

/// Full recompute, O(n). The totals depend only on the multiset of amounts;
/// the recent window follows insertion order.
pub fn aggregate(transactions: &[Transaction]) -> FinancialSnapshot {
    let mut balance = Decimal::ZERO;
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;

    for t in transactions {
        balance += t.amount;
        if t.amount < Decimal::ZERO {
            expense -= t.amount;
        } else {
            income += t.amount;
        }
    }

    let recent = transactions
        .iter()
        .rev()
        .take(RECENT_WINDOW)
        .rev()
        .cloned()
        .collect();

    FinancialSnapshot {
        balance,
        income,
        expense,
        recent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

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
    fn test_empty_list_yields_zero_snapshot() {
        let snapshot = aggregate(&[]);
        assert_eq!(snapshot, FinancialSnapshot::empty());
    }

    #[test]
    fn test_documented_scenario() {
        let snapshot = aggregate(&[txn("a", "1000"), txn("b", "-400")]);
        assert_eq!(snapshot.balance, "600".parse().unwrap());
        assert_eq!(snapshot.income, "1000".parse().unwrap());
        assert_eq!(snapshot.expense, "400".parse().unwrap());
    }

    #[test]
    fn test_balance_equals_income_minus_expense() {
        let txns = vec![
            txn("a", "1250.75"),
            txn("b", "-399.99"),
            txn("c", "-0.01"),
            txn("d", "12"),
            txn("e", "0"),
        ];
        let snapshot = aggregate(&txns);
        assert_eq!(snapshot.balance, snapshot.income - snapshot.expense);
    }

    #[test]
    fn test_totals_are_order_independent() {
        let forward = vec![txn("a", "10"), txn("b", "-3"), txn("c", "7.5")];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = aggregate(&forward);
        let b = aggregate(&reversed);
        assert_eq!(a.balance, b.balance);
        assert_eq!(a.income, b.income);
        assert_eq!(a.expense, b.expense);
    }

    #[test]
    fn test_recent_window_keeps_last_five_in_order() {
        let txns: Vec<_> = (0..7).map(|i| txn(&i.to_string(), "1")).collect();
        let snapshot = aggregate(&txns);
        let ids: Vec<_> = snapshot.recent.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["2", "3", "4", "5", "6"]);
    }

    #[test]
    fn test_zero_amount_counts_as_income() {
        let snapshot = aggregate(&[txn("a", "0")]);
        assert_eq!(snapshot.income, Decimal::ZERO);
        assert_eq!(snapshot.expense, Decimal::ZERO);
    }
}
