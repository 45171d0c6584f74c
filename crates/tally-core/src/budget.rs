//! Budget comparator
//!
//! Joins a month's budgets with the month's actual expense spend per category
//! and classifies each category as under, on-track, or over budget.

use std::collections::HashSet;

use tracing::debug;

use crate::aggregate::{by_amount_desc, percent_of, sum_by_category};
use crate::error::Result;
use crate::models::{Budget, BudgetComparison, BudgetReport, BudgetStatus, BudgetSummary, Transaction};
use crate::period::validate_month;

/// Compare budgets against actual spend for `month` (`YYYY-MM`).
///
/// Callers may pass full record lists: only budgets for `month` and expense
/// transactions dated in `month` are considered. Categories with spend but no
/// budget are reported with `budgeted = 0` and forced to [`BudgetStatus::Over`].
///
/// Fails with `InvalidInput` when `month` is empty or not `YYYY-MM`.
pub fn compare_budgets(
    month: &str,
    budgets: &[Budget],
    transactions: &[Transaction],
) -> Result<BudgetReport> {
    validate_month(month)?;

    let month_budgets: Vec<&Budget> = budgets.iter().filter(|b| b.month == month).collect();
    let actual_spending = sum_by_category(
        transactions
            .iter()
            .filter(|tx| tx.is_expense() && tx.month_key() == month),
    );

    let actual_for = |category: &str| -> f64 {
        actual_spending
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, amount)| *amount)
            .unwrap_or(0.0)
    };

    let mut comparisons: Vec<BudgetComparison> = month_budgets
        .iter()
        .map(|budget| {
            let actual = actual_for(&budget.category);
            let percentage = percent_of(actual, budget.amount);
            BudgetComparison {
                category: budget.category.clone(),
                budgeted: budget.amount,
                actual,
                percentage,
                status: BudgetStatus::classify(actual, budget.amount),
            }
        })
        .collect();

    let budgeted_categories: HashSet<&str> =
        month_budgets.iter().map(|b| b.category.as_str()).collect();
    for (category, amount) in &actual_spending {
        if !budgeted_categories.contains(category.as_str()) {
            comparisons.push(BudgetComparison {
                category: category.clone(),
                budgeted: 0.0,
                actual: *amount,
                percentage: 0.0,
                status: BudgetStatus::Over,
            });
        }
    }

    comparisons.sort_by(|a, b| {
        by_amount_desc(a.budgeted, b.budgeted).then_with(|| by_amount_desc(a.actual, b.actual))
    });

    let summary = summarize(&comparisons, month_budgets.len());

    debug!(
        month,
        budgets = month_budgets.len(),
        comparisons = comparisons.len(),
        over = summary.categories_over_budget,
        "Budget comparison computed"
    );

    Ok(BudgetReport {
        month: month.to_string(),
        comparisons,
        summary,
    })
}

fn summarize(comparisons: &[BudgetComparison], categories_with_budget: usize) -> BudgetSummary {
    let total_budgeted: f64 = comparisons.iter().map(|c| c.budgeted).sum();
    let total_actual: f64 = comparisons.iter().map(|c| c.actual).sum();
    let percentage = percent_of(total_actual, total_budgeted);

    BudgetSummary {
        total_budgeted,
        total_actual,
        percentage,
        status: BudgetStatus::classify(total_actual, total_budgeted),
        categories_with_budget,
        categories_over_budget: comparisons
            .iter()
            .filter(|c| c.status == BudgetStatus::Over)
            .count(),
    }
}
