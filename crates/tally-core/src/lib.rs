//! Tally Core Library
//!
//! Shared functionality for the Tally personal finance tracker:
//! - Category catalog with chart colors and icons
//! - Monthly and per-category aggregation for the dashboard
//! - Budget-vs-actual comparison
//! - Spending insight heuristics
//! - SQLite storage with connection pooling and migrations
//! - Import of the legacy JSON data files

pub mod aggregate;
pub mod budget;
pub mod catalog;
pub mod db;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod period;

#[cfg(test)]
mod test_utils;

pub use aggregate::{category_totals, compute_monthly_totals, dashboard_stats, monthly_totals};
pub use budget::compare_budgets;
pub use catalog::{category_by_name, Category};
pub use db::Database;
pub use error::{Error, Result};
pub use insights::{generate_insights, generate_insights_as_of, Insight, InsightKind};
pub use models::{
    Budget, BudgetComparison, BudgetReport, BudgetStatus, BudgetSummary, CategoryFilter,
    CategoryShare, CategoryTotal, DashboardStats, ImportStats, MonthlyTotal, NewBudget,
    NewTransaction, Transaction, TransactionType,
};
pub use period::YearMonth;
