//! Built-in spending checks
//!
//! Every threshold comparison is a strict `>`: a value sitting exactly on a
//! threshold does not fire. Money shares are compared in integer cents.

use std::collections::HashSet;

use chrono::{Datelike, Weekday};

use super::engine::{InsightCheck, MonthContext};
use crate::aggregate::{exceeds_percent, percent_of, sum_by_category, to_cents};
use super::types::{format_currency, Insight, InsightKind};

/// Month-over-month change (percent) needed before it is reported
const TREND_THRESHOLD: i64 = 10;
/// Share of the month (percent) above which one category "dominates"
const CONCENTRATION_THRESHOLD: i64 = 40;
/// Average expense (dollars) considered high
const AVERAGE_THRESHOLD: i64 = 100;
/// Share of the month's days (percent) with spending considered frequent
const FREQUENCY_THRESHOLD: usize = 70;
/// Share of spend (percent) on Saturday/Sunday considered weekend-heavy
const WEEKEND_THRESHOLD: i64 = 50;

/// Spending moved noticeably against the previous month
pub struct MonthOverMonthCheck;

impl InsightCheck for MonthOverMonthCheck {
    fn name(&self) -> &'static str {
        "Month Over Month"
    }

    fn check(&self, ctx: &MonthContext<'_>) -> Option<Insight> {
        if to_cents(ctx.previous_total) <= 0 {
            return None;
        }

        let difference = (ctx.current_total - ctx.previous_total).abs();
        if !exceeds_percent(difference, ctx.previous_total, TREND_THRESHOLD) {
            return None;
        }

        let change = (ctx.current_total - ctx.previous_total) / ctx.previous_total * 100.0;
        let insight = if change > 0.0 {
            Insight::new(
                InsightKind::Warning,
                "Spending Increased",
                format!(
                    "Your spending increased by {:.1}% compared to last month",
                    change.abs()
                ),
            )
            .with_value(format!("+{:.1}%", change))
        } else {
            Insight::new(
                InsightKind::Success,
                "Spending Decreased",
                format!(
                    "Your spending decreased by {:.1}% compared to last month",
                    change.abs()
                ),
            )
            .with_value(format!("{:.1}%", change))
        };

        Some(insight)
    }
}

/// Names the month's top expense category, warning when it dominates
pub struct CategoryConcentrationCheck;

impl InsightCheck for CategoryConcentrationCheck {
    fn name(&self) -> &'static str {
        "Category Concentration"
    }

    fn check(&self, ctx: &MonthContext<'_>) -> Option<Insight> {
        let sums = sum_by_category(ctx.current.iter().copied());

        // First category reached wins ties
        let (category, amount) = sums.into_iter().fold(None, |best: Option<(String, f64)>, entry| {
            match best {
                Some(b) if b.1 >= entry.1 => Some(b),
                _ => Some(entry),
            }
        })?;

        let share = percent_of(amount, ctx.current_total);

        let insight = if exceeds_percent(amount, ctx.current_total, CONCENTRATION_THRESHOLD) {
            Insight::new(
                InsightKind::Warning,
                "High Category Concentration",
                format!(
                    "{} accounts for {:.1}% of your spending this month",
                    category, share
                ),
            )
            .with_value(format!("{:.1}%", share))
        } else {
            Insight::new(
                InsightKind::Info,
                "Top Spending Category",
                format!("Your highest spending category this month is {}", category),
            )
            .with_value(format_currency(amount))
        };

        Some(insight)
    }
}

/// Average expense size is high
pub struct AverageTransactionCheck;

impl InsightCheck for AverageTransactionCheck {
    fn name(&self) -> &'static str {
        "Average Transaction"
    }

    fn check(&self, ctx: &MonthContext<'_>) -> Option<Insight> {
        if ctx.current.is_empty() {
            return None;
        }

        let count = ctx.current.len() as i64;
        if to_cents(ctx.current_total) <= AVERAGE_THRESHOLD * 100 * count {
            return None;
        }
        let average = ctx.current_total / count as f64;

        Some(
            Insight::new(
                InsightKind::Info,
                "High Average Transaction",
                format!(
                    "Your average transaction this month is {}",
                    format_currency(average)
                ),
            )
            .with_value(format_currency(average)),
        )
    }
}

/// Spending happens on most days of the month
pub struct SpendingFrequencyCheck;

impl InsightCheck for SpendingFrequencyCheck {
    fn name(&self) -> &'static str {
        "Spending Frequency"
    }

    fn check(&self, ctx: &MonthContext<'_>) -> Option<Insight> {
        let days_with_spending = ctx
            .current
            .iter()
            .map(|tx| tx.date)
            .collect::<HashSet<_>>()
            .len();
        let days_in_month = ctx.month.days();
        if days_with_spending * 100 <= days_in_month as usize * FREQUENCY_THRESHOLD {
            return None;
        }
        let frequency = days_with_spending as f64 / days_in_month as f64 * 100.0;

        Some(
            Insight::new(
                InsightKind::Tip,
                "Frequent Spending",
                format!(
                    "You made purchases on {} out of {} days this month",
                    days_with_spending, days_in_month
                ),
            )
            .with_value(format!("{:.0}%", frequency)),
        )
    }
}

/// Most of the month's spending lands on weekends
pub struct WeekendSpendingCheck;

impl InsightCheck for WeekendSpendingCheck {
    fn name(&self) -> &'static str {
        "Weekend Spending"
    }

    fn check(&self, ctx: &MonthContext<'_>) -> Option<Insight> {
        if ctx.current.is_empty() {
            return None;
        }

        let weekend_total: f64 = ctx
            .current
            .iter()
            .filter(|tx| matches!(tx.date.weekday(), Weekday::Sat | Weekday::Sun))
            .map(|tx| tx.amount)
            .sum();
        if !exceeds_percent(weekend_total, ctx.current_total, WEEKEND_THRESHOLD) {
            return None;
        }
        let share = percent_of(weekend_total, ctx.current_total);

        Some(
            Insight::new(
                InsightKind::Info,
                "Weekend Spender",
                format!("{:.1}% of your spending happens on weekends", share),
            )
            .with_value(format!("{:.1}%", share)),
        )
    }
}
