//! Insight Engine - runs the registered checks in order

use chrono::{Local, NaiveDate};

use crate::models::Transaction;
use crate::period::YearMonth;

use super::types::{Insight, InsightKind};
use super::{
    AverageTransactionCheck, CategoryConcentrationCheck, MonthOverMonthCheck,
    SpendingFrequencyCheck, WeekendSpendingCheck,
};

/// Most insights shown at once
pub const MAX_INSIGHTS: usize = 4;

/// Current and previous month expenses, precomputed once for all checks
pub struct MonthContext<'a> {
    /// The calendar month being analyzed
    pub month: YearMonth,
    /// Expense transactions dated in `month`
    pub current: Vec<&'a Transaction>,
    /// Expense transactions dated in the month before `month`
    pub previous: Vec<&'a Transaction>,
    pub current_total: f64,
    pub previous_total: f64,
}

impl<'a> MonthContext<'a> {
    /// Partition `transactions` around the month containing `today`
    pub fn new(transactions: &'a [Transaction], today: NaiveDate) -> Self {
        let month = YearMonth::from_date(today);
        let last_month = month.pred();

        let current: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| tx.is_expense() && tx.in_month(month))
            .collect();
        let previous: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| tx.is_expense() && tx.in_month(last_month))
            .collect();

        let current_total: f64 = current.iter().map(|tx| tx.amount).sum();
        let previous_total: f64 = previous.iter().map(|tx| tx.amount).sum();

        Self {
            month,
            current,
            previous,
            current_total,
            previous_total,
        }
    }
}

/// A single spending heuristic
pub trait InsightCheck: Send + Sync {
    /// Human-readable name (for logging)
    fn name(&self) -> &'static str;

    /// Produce an observation, or `None` when the threshold is not met
    fn check(&self, ctx: &MonthContext<'_>) -> Option<Insight>;
}

/// Ordered collection of checks
pub struct InsightEngine {
    checks: Vec<Box<dyn InsightCheck>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create an engine with the built-in checks
    pub fn new() -> Self {
        let mut engine = Self { checks: vec![] };

        // Registration order is output order
        engine.register(Box::new(MonthOverMonthCheck));
        engine.register(Box::new(CategoryConcentrationCheck));
        engine.register(Box::new(AverageTransactionCheck));
        engine.register(Box::new(SpendingFrequencyCheck));
        engine.register(Box::new(WeekendSpendingCheck));

        engine
    }

    pub fn register(&mut self, check: Box<dyn InsightCheck>) {
        self.checks.push(check);
    }

    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Run every check and keep at most [`MAX_INSIGHTS`] results in
    /// generation order. Falls back to a single tip when nothing fired.
    pub fn analyze(&self, ctx: &MonthContext<'_>) -> Vec<Insight> {
        let mut insights = Vec::new();

        for check in &self.checks {
            if let Some(insight) = check.check(ctx) {
                tracing::debug!(
                    check = check.name(),
                    kind = insight.kind.as_str(),
                    "Insight produced"
                );
                insights.push(insight);
            }
        }

        if insights.is_empty() {
            insights.push(Insight::new(
                InsightKind::Tip,
                "Track Your Progress",
                "Keep adding transactions to get personalized spending insights",
            ));
        }

        insights.truncate(MAX_INSIGHTS);
        insights
    }
}

/// Insights for the month containing `today`
pub fn generate_insights_as_of(transactions: &[Transaction], today: NaiveDate) -> Vec<Insight> {
    let ctx = MonthContext::new(transactions, today);
    InsightEngine::new().analyze(&ctx)
}

/// Insights for the current local month
pub fn generate_insights(transactions: &[Transaction]) -> Vec<Insight> {
    generate_insights_as_of(transactions, Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use crate::test_utils::tx;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_engine_order() {
        let engine = InsightEngine::new();
        assert_eq!(
            engine.check_names(),
            vec![
                "Month Over Month",
                "Category Concentration",
                "Average Transaction",
                "Spending Frequency",
                "Weekend Spending",
            ]
        );
    }

    #[test]
    fn test_no_transactions_gives_single_tip() {
        let insights = generate_insights_as_of(&[], d(2024, 3, 15));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Tip);
        assert_eq!(insights[0].title, "Track Your Progress");
        assert!(insights[0].value.is_none());
    }

    #[test]
    fn test_context_partitions_months() {
        let txs = vec![
            tx(1, 10.0, d(2024, 3, 1), "Food", TransactionType::Expense),
            tx(2, 20.0, d(2024, 2, 29), "Food", TransactionType::Expense),
            tx(3, 500.0, d(2024, 3, 2), "Salary", TransactionType::Income),
            tx(4, 40.0, d(2024, 1, 31), "Food", TransactionType::Expense),
        ];
        let ctx = MonthContext::new(&txs, d(2024, 3, 20));
        assert_eq!(ctx.current.len(), 1);
        assert_eq!(ctx.previous.len(), 1);
        assert_eq!(ctx.current_total, 10.0);
        assert_eq!(ctx.previous_total, 20.0);
    }

    #[test]
    fn test_previous_month_wraps_year() {
        let txs = vec![tx(1, 75.0, d(2023, 12, 24), "Gifts", TransactionType::Expense)];
        let ctx = MonthContext::new(&txs, d(2024, 1, 3));
        assert_eq!(ctx.previous_total, 75.0);
        assert!(ctx.current.is_empty());
    }

    #[test]
    fn test_truncates_to_four_in_generation_order() {
        // March 2024: 31 days. Spend every day, all in one category, large
        // amounts, heavier on weekends, and far above February.
        let mut txs = Vec::new();
        for day in 1..=31 {
            let date = d(2024, 3, day);
            let amount = match date.format("%a").to_string().as_str() {
                "Sat" | "Sun" => 1000.0,
                _ => 150.0,
            };
            txs.push(tx(day as i64, amount, date, "Travel", TransactionType::Expense));
        }
        txs.push(tx(100, 50.0, d(2024, 2, 10), "Travel", TransactionType::Expense));

        let insights = generate_insights_as_of(&txs, d(2024, 3, 31));
        assert_eq!(insights.len(), MAX_INSIGHTS);
        let titles: Vec<&str> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Spending Increased",
                "High Category Concentration",
                "High Average Transaction",
                "Frequent Spending",
            ]
        );
    }

    struct AlwaysTip;

    impl InsightCheck for AlwaysTip {
        fn name(&self) -> &'static str {
            "Always"
        }

        fn check(&self, _ctx: &MonthContext<'_>) -> Option<Insight> {
            Some(Insight::new(InsightKind::Tip, "Custom", "Registered check"))
        }
    }

    #[test]
    fn test_register_custom_check_suppresses_fallback() {
        let mut engine = InsightEngine { checks: vec![] };
        engine.register(Box::new(AlwaysTip));

        let ctx = MonthContext::new(&[], d(2024, 3, 1));
        let insights = engine.analyze(&ctx);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Custom");
    }
}
