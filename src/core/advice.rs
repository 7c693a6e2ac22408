//! Deterministic financial advice built from the aggregated numbers.
//!
//! This is a local rule engine, not an AI call: the report is a pure
//! function of the snapshot and holdings valuation, so the same inputs
//! always produce the same text.

use rust_decimal::Decimal;
use std::fmt::Write;

use crate::core::holdings::HoldingsValuation;
use crate::core::snapshot::FinancialSnapshot;
use crate::core::transaction::TransactionKind;

const RECOMMENDATION_CUT_EXPENSES: &str =
    "Prioritize reducing expenses. Identify areas where you can cut non-essential spending.";
const RECOMMENDATION_GROW_SAVINGS: &str =
    "Try to increase your savings. Aim to set aside at least 10% of your income.";
const RECOMMENDATION_WATCH_LARGE_EXPENSES: &str = "Watch your recent large expenses. Consider \
     whether they are necessary and how they affect your budget in the long run.";
const RECOMMENDATION_ON_TRACK: &str =
    "Keep following your current strategy. Your financial management looks on track.";

/// Builds the multi-section advice report. Pure and deterministic; missing
/// prices render as pending and never abort the report.
pub fn generate_advice(snapshot: &FinancialSnapshot, valuation: &HoldingsValuation) -> String {
    let mut report = String::new();
    let ccy = valuation.currency.as_str();

    report.push_str("Financial analysis\n\n");

    // 1. Current situation
    report.push_str("1. Current situation:\n");
    let _ = writeln!(report, "   - Balance: {ccy} {:.2}", snapshot.balance);
    let _ = writeln!(report, "   - Total income: {ccy} {:.2}", snapshot.income);
    let _ = writeln!(report, "   - Total expenses: {ccy} {:.2}", snapshot.expense);
    report.push_str(&holding_line(
        "Bitcoin",
        "BTC",
        valuation.holdings.bitcoin,
        valuation.bitcoin_value(),
        ccy,
    ));
    report.push_str(&holding_line(
        "Dollars",
        "USD",
        valuation.holdings.dollars,
        valuation.dollar_value(),
        ccy,
    ));

    // 2. Analysis
    report.push_str("\n2. Analysis:\n");
    if snapshot.expense > snapshot.income {
        report.push_str("   You are spending more than you earn; expenses currently exceed income.\n");
    } else {
        report.push_str("   Your income covers your expenses. Keep it up.\n");
    }
    if !valuation.holdings.is_empty() {
        report.push_str("   Your bitcoin and dollar holdings add diversification beyond cash.\n");
    }

    // 3. Recommendations: all true predicates, in declaration order.
    report.push_str("\n3. Recommendations:\n");
    let mut fired = 0;
    for (applies, text) in recommendations(snapshot) {
        if applies {
            let _ = writeln!(report, "   - {text}");
            fired += 1;
        }
    }
    if fired == 0 {
        let _ = writeln!(report, "   - {RECOMMENDATION_ON_TRACK}");
    }

    // 4. Next steps: fixed boilerplate.
    report.push_str("\n4. Next steps:\n");
    report.push_str("   - Set clear financial goals for the next 3, 6 and 12 months.\n");
    report.push_str("   - Review your budget monthly and adjust as needed.\n");
    report.push_str("   - Build an emergency fund if you do not have one yet.\n");
    report.push_str(
        "\nKeep monitoring your finances closely and seek further advice as your situation evolves.\n",
    );

    report
}

fn recommendations(snapshot: &FinancialSnapshot) -> [(bool, &'static str); 3] {
    let overspending = snapshot.expense > snapshot.income;
    let thin_savings = snapshot.balance < snapshot.income * Decimal::new(1, 1);
    let recent_large_expense = snapshot.recent.iter().any(|t| {
        t.kind() == TransactionKind::Expense && t.amount.abs() > snapshot.income * Decimal::new(2, 1)
    });

    [
        (overspending, RECOMMENDATION_CUT_EXPENSES),
        (thin_savings, RECOMMENDATION_GROW_SAVINGS),
        (recent_large_expense, RECOMMENDATION_WATCH_LARGE_EXPENSES),
    ]
}

fn holding_line(
    label: &str,
    unit: &str,
    quantity: f64,
    value: Option<f64>,
    currency: &str,
) -> String {
    match value {
        Some(v) => format!("   - {label}: {quantity} {unit} = {currency} {v:.2}\n"),
        None => format!("   - {label}: {quantity} {unit} (price pending)\n"),
    }
}
