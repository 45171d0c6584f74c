//! Domain models for Tally

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::{exceeds_percent, to_cents};
use crate::error::{Error, Result};
use crate::period::{validate_month, YearMonth};

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!(
                "Unknown transaction type: {} (valid: income, expense)",
                s
            )),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which transactions a category breakdown covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    Income,
    #[default]
    Expense,
    All,
}

impl CategoryFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::All => "all",
        }
    }

    pub fn matches(&self, kind: TransactionType) -> bool {
        match self {
            Self::Income => kind == TransactionType::Income,
            Self::Expense => kind == TransactionType::Expense,
            Self::All => true,
        }
    }
}

impl std::str::FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "all" => Ok(Self::All),
            _ => Err(format!(
                "Unknown category filter: {} (valid: income, expense, all)",
                s
            )),
        }
    }
}

impl From<TransactionType> for CategoryFilter {
    fn from(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Income => Self::Income,
            TransactionType::Expense => Self::Expense,
        }
    }
}

/// A single dated money movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    /// Always positive; direction is carried by `kind`
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Whether the transaction is dated within the given calendar month
    pub fn in_month(&self, month: YearMonth) -> bool {
        YearMonth::from_date(self.date) == month
    }

    /// `YYYY-MM` key of the transaction's month
    pub fn month_key(&self) -> String {
        YearMonth::from_date(self.date).key()
    }
}

/// Transaction fields supplied by the user (create or full update)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl NewTransaction {
    /// Reject records that would corrupt the aggregates
    pub fn validate(&self) -> Result<()> {
        validate_amount(self.amount, "Amount")?;
        if self.description.trim().is_empty() {
            return Err(Error::invalid_input("Description is required"));
        }
        if self.category.trim().is_empty() {
            return Err(Error::invalid_input("Category is required"));
        }
        Ok(())
    }
}

/// A per-category monthly spending ceiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: f64,
    /// Calendar month in `YYYY-MM` form
    pub month: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Budget fields supplied by the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBudget {
    pub category: String,
    pub amount: f64,
    pub month: String,
}

impl NewBudget {
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(Error::invalid_input("Category is required"));
        }
        validate_amount(self.amount, "Budget amount")?;
        validate_month(&self.month)
    }
}

fn validate_amount(amount: f64, what: &str) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::invalid_input(format!(
            "{} must be greater than 0",
            what
        )));
    }
    Ok(())
}

// ========== Budget Comparison Models ==========

/// Where actual spend sits relative to the budget ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetStatus {
    /// At or below 80% of the budget
    Under,
    /// Above 80% and at most 100%
    OnTrack,
    /// Above 100%, or spending with no budget at all
    Over,
}

impl BudgetStatus {
    /// Classify `actual` spend against `budgeted`.
    ///
    /// The boundaries are `<= 80%` for under and `> 100%` for over, tested
    /// exactly in cents. A non-positive budget counts as 0% used.
    pub fn classify(actual: f64, budgeted: f64) -> Self {
        if to_cents(budgeted) <= 0 || !exceeds_percent(actual, budgeted, 80) {
            Self::Under
        } else if exceeds_percent(actual, budgeted, 100) {
            Self::Over
        } else {
            Self::OnTrack
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under => "under",
            Self::OnTrack => "on-track",
            Self::Over => "over",
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A budget joined with the month's actual spend for its category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetComparison {
    pub category: String,
    pub budgeted: f64,
    pub actual: f64,
    pub percentage: f64,
    pub status: BudgetStatus,
}

/// Totals across every comparison for a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_budgeted: f64,
    pub total_actual: f64,
    pub percentage: f64,
    pub status: BudgetStatus,
    pub categories_with_budget: usize,
    pub categories_over_budget: usize,
}

/// Budget-vs-actual report for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub month: String,
    pub comparisons: Vec<BudgetComparison>,
    pub summary: BudgetSummary,
}

// ========== Aggregation Models ==========

/// Income and expenses for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// `YYYY-MM`
    pub month: String,
    /// Display label, e.g. "Mar 2024"
    pub label: String,
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
}

/// A category's share of the filtered total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
    pub color: String,
}

/// A top expense category on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
}

/// Dashboard summary statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub transaction_count: usize,
    pub top_categories: Vec<CategoryShare>,
}

/// Counts from a legacy data import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub transactions_imported: usize,
    pub transactions_skipped: usize,
    pub budgets_imported: usize,
    pub budgets_skipped: usize,
}
