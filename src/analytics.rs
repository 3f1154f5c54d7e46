//! Aggregation over in-memory transaction and budget collections
//!
//! All functions here are pure: no side effects, no persistence, and output
//! orders are deterministic so charting callers and tests see stable results.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::models::{
    Budget, BudgetId, CategoryId, CurrencyCode, Money, Month, Transaction, TransactionType,
};

/// Expense total for one category within a month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSlice {
    pub category_id: CategoryId,
    pub total: Money,
}

/// Net total for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub period: Month,
    pub total: Money,
}

/// Spend against limit for one budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub budget_id: BudgetId,
    pub spent: Money,
    pub remaining: Money,
    /// spent / limit at 4 decimal places, half-up; saturates to 0 or 1 when
    /// the limit is zero
    pub percent_used: Decimal,
}

/// Expense totals by category for a month, sorted by total descending then
/// category id ascending
pub fn category_breakdown(
    transactions: &[Transaction],
    month: Month,
    currency: &CurrencyCode,
) -> Vec<PieSlice> {
    let mut totals: Vec<(CategoryId, Decimal)> = Vec::new();
    for tx in transactions {
        if tx.kind != TransactionType::Expense
            || tx.amount.currency() != currency
            || !month.contains(tx.date)
        {
            continue;
        }
        let category_id = match &tx.category_id {
            Some(id) => id.clone(),
            None => continue,
        };
        let amount = tx.signed_amount().abs().amount();
        match totals.iter_mut().find(|(id, _)| *id == category_id) {
            Some((_, total)) => *total += amount,
            None => totals.push((category_id, amount)),
        }
    }
    totals.sort_by(|(a_id, a_total), (b_id, b_total)| {
        b_total.cmp(a_total).then_with(|| a_id.cmp(b_id))
    });
    totals
        .into_iter()
        .map(|(category_id, total)| PieSlice {
            category_id,
            total: Money::from_decimal(total, currency.clone()),
        })
        .collect()
}

/// Net totals per month across the inclusive range; months without matching
/// transactions are included with a total of zero, so the output length
/// always equals the number of months in the range
pub fn monthly_totals(
    transactions: &[Transaction],
    start: Month,
    end: Month,
    currency: &CurrencyCode,
) -> Vec<TimeSeriesPoint> {
    let mut points = Vec::new();
    let mut current = start;
    while current <= end {
        let total = transactions
            .iter()
            .filter(|tx| tx.amount.currency() == currency && current.contains(tx.date))
            .map(|tx| tx.signed_amount().amount())
            .sum::<Decimal>();
        points.push(TimeSeriesPoint {
            period: current,
            total: Money::from_decimal(total, currency.clone()),
        });
        current = current.next();
    }
    points
}

/// Spend vs limit per budget, sorted by budget name then id. Remaining may go
/// negative to signal overspend.
pub fn budget_progress(budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetProgress> {
    let mut sorted: Vec<&Budget> = budgets.iter().collect();
    sorted.sort_by(|a, b| (&a.name, &a.id).cmp(&(&b.name, &b.id)));

    sorted
        .into_iter()
        .map(|budget| {
            let currency = budget.limit.currency();
            let spent = transactions
                .iter()
                .filter(|tx| {
                    tx.kind == TransactionType::Expense
                        && tx.amount.currency() == currency
                        && budget.month.contains(tx.date)
                        && tx
                            .category_id
                            .as_ref()
                            .is_some_and(|id| budget.category_ids.contains(id))
                })
                .map(|tx| tx.signed_amount().abs().amount())
                .sum::<Decimal>();
            let limit = budget.limit.amount();
            let percent_used = if limit.is_zero() {
                if spent.is_zero() {
                    Decimal::ZERO
                } else {
                    Decimal::ONE
                }
            } else {
                let mut ratio =
                    (spent / limit).round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero);
                ratio.rescale(4);
                ratio
            };
            BudgetProgress {
                budget_id: budget.id.clone(),
                spent: Money::from_decimal(spent, currency.clone()),
                remaining: Money::from_decimal(limit - spent, currency.clone()),
                percent_used,
            }
        })
        .collect()
}
