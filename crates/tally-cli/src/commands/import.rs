//! Legacy JSON data import

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tally_core::db::Database;
use tally_core::import::{load_legacy_budgets, load_legacy_transactions};
use tally_core::ImportStats;
use tracing::info;

pub fn cmd_import(
    db: &Database,
    transactions_path: Option<&Path>,
    budgets_path: Option<&Path>,
) -> Result<()> {
    if transactions_path.is_none() && budgets_path.is_none() {
        bail!("Nothing to import: pass --transactions and/or --budgets");
    }

    let transactions = match transactions_path {
        Some(path) => {
            println!("📥 Reading {}...", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            load_legacy_transactions(BufReader::new(file))
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => Vec::new(),
    };

    let budgets = match budgets_path {
        Some(path) => {
            println!("📥 Reading {}...", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            load_legacy_budgets(BufReader::new(file))
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => Vec::new(),
    };

    let stats = db
        .import_legacy(&transactions, &budgets)
        .context("Import failed")?;
    info!(
        transactions = stats.transactions_imported,
        budgets = stats.budgets_imported,
        "legacy import complete"
    );

    print_import_stats(&stats);
    Ok(())
}

fn print_import_stats(stats: &ImportStats) {
    println!("✅ Import complete");
    println!(
        "   Transactions: {} imported, {} skipped",
        stats.transactions_imported, stats.transactions_skipped
    );
    println!(
        "   Budgets:      {} imported, {} skipped",
        stats.budgets_imported, stats.budgets_skipped
    );
    if stats.transactions_skipped + stats.budgets_skipped > 0 {
        println!("   Run with --verbose to see why records were skipped");
    }
}
