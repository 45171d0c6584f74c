//! Aggregation engine
//!
//! Pure functions turning a list of transactions into the numbers the
//! dashboard shows: monthly income/expense totals, per-category totals, and
//! the headline dashboard statistics. None of these fail; empty input yields
//! zeroed or empty output.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{Local, NaiveDate};

use crate::catalog;
use crate::models::{
    CategoryFilter, CategoryShare, CategoryTotal, DashboardStats, MonthlyTotal, Transaction,
    TransactionType,
};
use crate::period::YearMonth;

/// Months shown by the monthly overview chart
pub const DEFAULT_MONTHS_BACK: u32 = 12;

/// Longest monthly window a report covers
pub const MAX_MONTHS_BACK: u32 = 60;

/// Expense categories listed on the dashboard
pub const TOP_CATEGORY_COUNT: usize = 3;

/// Sum amounts per category, keeping categories in order of first appearance
pub(crate) fn sum_by_category<'a, I>(transactions: I) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut sums: Vec<(String, f64)> = Vec::new();

    for tx in transactions {
        match index.get(tx.category.as_str()) {
            Some(&i) => sums[i].1 += tx.amount,
            None => {
                index.insert(tx.category.as_str(), sums.len());
                sums.push((tx.category.clone(), tx.amount));
            }
        }
    }

    sums
}

/// Descending comparison on amounts; NaN never reaches here because amounts
/// are validated on write
pub(crate) fn by_amount_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// `part / whole * 100`, or 0 when `whole` is not positive
pub(crate) fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// Amount in whole cents
pub(crate) fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Whether `part` is strictly more than `percent`% of `whole`.
///
/// Compared in integer cents so a share sitting exactly on a threshold
/// (16.92 of 21.15 is 80%) does not drift across it.
pub(crate) fn exceeds_percent(part: f64, whole: f64, percent: i64) -> bool {
    i128::from(to_cents(part)) * 100 > i128::from(to_cents(whole)) * i128::from(percent)
}

/// Income and expense totals for the `months_back` calendar months ending
/// with `as_of`'s month, oldest first.
///
/// Always returns exactly `months_back` entries; months without transactions
/// are zero-filled. Windows longer than [`MAX_MONTHS_BACK`] are clamped to it.
pub fn monthly_totals(
    transactions: &[Transaction],
    as_of: NaiveDate,
    months_back: u32,
) -> Vec<MonthlyTotal> {
    let months_back = months_back.min(MAX_MONTHS_BACK);
    let newest = YearMonth::from_date(as_of);
    let oldest = newest.offset(1 - months_back as i32);

    let mut slots: Vec<(YearMonth, f64, f64)> = (0..months_back as i32)
        .map(|i| (oldest.offset(i), 0.0, 0.0))
        .collect();

    for tx in transactions {
        let month = YearMonth::from_date(tx.date);
        if month < oldest || month > newest {
            continue;
        }
        let (_, income, expenses) = &mut slots[month_distance(oldest, month)];
        match tx.kind {
            TransactionType::Income => *income += tx.amount,
            TransactionType::Expense => *expenses += tx.amount,
        }
    }

    slots
        .into_iter()
        .map(|(month, income, expenses)| MonthlyTotal {
            month: month.key(),
            label: month.label(),
            income,
            expenses,
            balance: income - expenses,
        })
        .collect()
}

fn month_distance(from: YearMonth, to: YearMonth) -> usize {
    ((to.year() - from.year()) * 12 + to.month() as i32 - from.month() as i32) as usize
}

/// Twelve months of totals ending with the current month
pub fn compute_monthly_totals(transactions: &[Transaction]) -> Vec<MonthlyTotal> {
    monthly_totals(
        transactions,
        Local::now().date_naive(),
        DEFAULT_MONTHS_BACK,
    )
}

/// Per-category totals for the transactions matching `filter`, largest first.
///
/// Returns an empty list when the filtered total is zero.
pub fn category_totals(transactions: &[Transaction], filter: CategoryFilter) -> Vec<CategoryTotal> {
    let sums = sum_by_category(transactions.iter().filter(|tx| filter.matches(tx.kind)));
    let total: f64 = sums.iter().map(|(_, amount)| amount).sum();

    if total == 0.0 {
        return Vec::new();
    }

    let mut totals: Vec<CategoryTotal> = sums
        .into_iter()
        .map(|(category, amount)| CategoryTotal {
            color: catalog::color_for(&category).to_string(),
            percentage: amount / total * 100.0,
            category,
            amount,
        })
        .collect();

    totals.sort_by(|a, b| by_amount_desc(a.amount, b.amount));
    totals
}

/// Headline numbers for the dashboard in a single pass
pub fn dashboard_stats(transactions: &[Transaction]) -> DashboardStats {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;

    for tx in transactions {
        match tx.kind {
            TransactionType::Income => total_income += tx.amount,
            TransactionType::Expense => total_expenses += tx.amount,
        }
    }

    let mut top_categories: Vec<CategoryShare> =
        sum_by_category(transactions.iter().filter(|tx| tx.is_expense()))
            .into_iter()
            .map(|(category, amount)| CategoryShare {
                percentage: percent_of(amount, total_expenses),
                category,
                amount,
            })
            .collect();
    top_categories.sort_by(|a, b| by_amount_desc(a.amount, b.amount));
    top_categories.truncate(TOP_CATEGORY_COUNT);

    DashboardStats {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
        transaction_count: transactions.len(),
        top_categories,
    }
}
