//! Spending insights
//!
//! A fixed battery of threshold checks over the current and previous calendar
//! month's expenses. Each check is an [`InsightCheck`]; the [`InsightEngine`]
//! runs them in registration order and keeps at most four observations.
//!
//! ## Checks (in order)
//!
//! - **Month over month** - spending moved more than 10% against last month
//! - **Category concentration** - the top category and whether it dominates
//! - **Average transaction** - average expense above $100
//! - **Spending frequency** - spending on more than 70% of the month's days
//! - **Weekend spending** - more than half of the month's spend on weekends
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_core::insights::generate_insights;
//!
//! let transactions = db.list_transactions()?;
//! for insight in generate_insights(&transactions) {
//!     println!("{}: {}", insight.title, insight.description);
//! }
//! ```

pub mod checks;
pub mod engine;
pub mod types;

pub use checks::{
    AverageTransactionCheck, CategoryConcentrationCheck, MonthOverMonthCheck,
    SpendingFrequencyCheck, WeekendSpendingCheck,
};
pub use engine::{
    generate_insights, generate_insights_as_of, InsightCheck, InsightEngine, MonthContext,
    MAX_INSIGHTS,
};
pub use types::{Insight, InsightKind};
