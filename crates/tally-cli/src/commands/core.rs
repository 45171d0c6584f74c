//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use tally_core::db::Database;

/// Open (and migrate) the database at `db_path`
pub fn open_db(db_path: &Path) -> Result<Database> {
    Database::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    let transactions = db.count_transactions()?;
    let budgets = db.list_budgets(None)?.len();
    println!(
        "   {} transactions, {} budgets",
        transactions, budgets
    );

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record a transaction: tally add expense 12.50 -c \"Food & Dining\" -d Lunch");
    println!("  2. Import legacy data: tally import --transactions transactions.json");
    println!("  3. Start web UI: tally serve");

    Ok(())
}
