//! Insight and category catalog commands

use anyhow::{anyhow, Result};
use tally_core::catalog::{self, Category};
use tally_core::db::Database;
use tally_core::{generate_insights, InsightKind, TransactionType};

use super::print_json;

pub fn cmd_insights(db: &Database, json: bool) -> Result<()> {
    let transactions = db.list_transactions()?;
    let insights = generate_insights(&transactions);

    if json {
        return print_json(&insights);
    }

    println!();
    println!("💡 Spending Insights");
    println!("   ─────────────────────────────────────────────");

    if insights.is_empty() {
        println!("   Nothing to report for this month yet.");
        return Ok(());
    }

    for insight in &insights {
        let icon = match insight.kind {
            InsightKind::Warning => "⚠️ ",
            InsightKind::Info => "ℹ️ ",
            InsightKind::Success => "✅",
            InsightKind::Tip => "💡",
        };
        match &insight.value {
            Some(value) => println!("   {} {} ({})", icon, insight.title, value),
            None => println!("   {} {}", icon, insight.title),
        }
        println!("      {}", insight.description);
    }

    Ok(())
}

pub fn cmd_categories(kind: &str, json: bool) -> Result<()> {
    let categories = filter_categories(kind)?;

    if json {
        return print_json(&categories);
    }

    println!();
    println!("🏷️  Categories");
    println!("   ─────────────────────────────────────────────");
    for c in &categories {
        println!("   {:<8} │ {:<22} │ {} │ {}", c.kind, c.name, c.color, c.icon);
    }

    Ok(())
}

/// Catalog entries for `all`, `income` or `expense`
pub fn filter_categories(kind: &str) -> Result<Vec<Category>> {
    if kind.eq_ignore_ascii_case("all") {
        return Ok(catalog::all_categories().to_vec());
    }
    let kind: TransactionType = kind.parse().map_err(|e: String| anyhow!(e))?;
    Ok(catalog::categories_of(kind).copied().collect())
}
