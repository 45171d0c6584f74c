//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `budgets` - Budget commands (list, set, delete, compare)
//! - `core` - Core commands (init) and shared utilities (open_db)
//! - `import` - Legacy JSON data import
//! - `insights` - Spending insights and the category catalog
//! - `reports` - Monthly, category and dashboard reports
//! - `serve` - Web server command
//! - `transactions` - Transaction commands (add, list, update, delete)

pub mod budgets;
pub mod core;
pub mod import;
pub mod insights;
pub mod reports;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use budgets::*;
pub use core::*;
pub use import::*;
pub use insights::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;

use serde::Serialize;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print a value as pretty JSON for `--json` output
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Signed, colored amount: red for expenses, green for income
pub fn format_amount(amount: f64, kind: tally_core::TransactionType) -> String {
    match kind {
        tally_core::TransactionType::Expense => format!("\x1b[31m-${:.2}\x1b[0m", amount),
        tally_core::TransactionType::Income => format!("\x1b[32m+${:.2}\x1b[0m", amount),
    }
}
