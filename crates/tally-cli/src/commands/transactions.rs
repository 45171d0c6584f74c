//! Transaction command implementations

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use tally_core::db::Database;
use tally_core::{catalog, NewTransaction, TransactionType};
use tracing::warn;

use super::{format_amount, print_json, truncate};

pub fn cmd_add(
    db: &Database,
    kind: TransactionType,
    amount: f64,
    category: &str,
    description: &str,
    date: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    if catalog::category_by_name(category).is_none() {
        warn!("'{}' is not a predefined category", category);
    }

    let tx = db.create_transaction(&NewTransaction {
        amount,
        date: date.unwrap_or_else(|| Local::now().date_naive()),
        description: description.to_string(),
        category: category.to_string(),
        kind,
    })?;

    if json {
        return print_json(&tx);
    }

    println!(
        "✅ Recorded {} [{}] {} │ {} │ {}",
        tx.kind,
        tx.id,
        tx.date,
        format_amount(tx.amount, tx.kind),
        tx.description
    );
    Ok(())
}

pub fn cmd_transactions_list(db: &Database, limit: i64, offset: i64, json: bool) -> Result<()> {
    let transactions = db.list_transactions_page(limit.max(1), offset.max(0))?;

    if json {
        return print_json(&transactions);
    }

    if transactions.is_empty() {
        println!("No transactions found. Add one with:");
        println!("  tally add expense 12.50 -c \"Food & Dining\" -d Lunch");
        return Ok(());
    }

    let total = db.count_transactions()?;

    println!();
    println!("📝 Recent Transactions ({} total)", total);
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in &transactions {
        println!(
            "   [{}] {} │ {:>20} │ {:<18} │ {}",
            tx.id,
            tx.date,
            format_amount(tx.amount, tx.kind),
            truncate(&tx.category, 18),
            truncate(&tx.description, 35)
        );
    }

    Ok(())
}

pub fn cmd_transactions_update(
    db: &Database,
    id: i64,
    update: NewTransaction,
    json: bool,
) -> Result<()> {
    let tx = db
        .update_transaction(id, &update)
        .with_context(|| format!("Failed to update transaction {}", id))?;

    if json {
        return print_json(&tx);
    }

    println!(
        "✅ Updated transaction {}: {} │ {} │ {}",
        tx.id,
        tx.date,
        format_amount(tx.amount, tx.kind),
        tx.description
    );
    Ok(())
}

pub fn cmd_transactions_delete(db: &Database, id: i64) -> Result<()> {
    if !db.delete_transaction(id)? {
        bail!("Transaction {} not found", id);
    }
    println!("🗑️  Deleted transaction {}", id);
    Ok(())
}
