//! Budget command implementations

use anyhow::{bail, Result};
use tally_core::db::Database;
use tally_core::{BudgetStatus, NewBudget, YearMonth};

use super::{print_json, truncate};

pub fn cmd_budgets_list(db: &Database, month: Option<&str>, json: bool) -> Result<()> {
    let budgets = db.list_budgets(month)?;

    if json {
        return print_json(&budgets);
    }

    if budgets.is_empty() {
        println!("No budgets found. Set one with:");
        println!("  tally budgets set Shopping 200 --month {}", YearMonth::current().key());
        return Ok(());
    }

    println!();
    println!("💰 Budgets");
    println!("   ─────────────────────────────────────────────");

    for budget in &budgets {
        println!(
            "   [{}] {} │ {:<22} │ {:>10}",
            budget.id,
            budget.month,
            truncate(&budget.category, 22),
            format!("${:.2}", budget.amount)
        );
    }

    Ok(())
}

pub fn cmd_budgets_set(
    db: &Database,
    category: &str,
    amount: f64,
    month: Option<&str>,
    json: bool,
) -> Result<()> {
    let month = month
        .map(String::from)
        .unwrap_or_else(|| YearMonth::current().key());

    let budget = db.upsert_budget(&NewBudget {
        category: category.to_string(),
        amount,
        month,
    })?;

    if json {
        return print_json(&budget);
    }

    println!(
        "✅ Budget for {} in {} set to ${:.2}",
        budget.category, budget.month, budget.amount
    );
    Ok(())
}

pub fn cmd_budgets_delete(db: &Database, id: i64) -> Result<()> {
    if !db.delete_budget(id)? {
        bail!("Budget {} not found", id);
    }
    println!("🗑️  Deleted budget {}", id);
    Ok(())
}

pub fn cmd_compare(db: &Database, month: Option<&str>, json: bool) -> Result<()> {
    let month = month
        .map(String::from)
        .unwrap_or_else(|| YearMonth::current().key());
    let report = db.compute_budget_comparison(&month)?;

    if json {
        return print_json(&report);
    }

    println!();
    println!("📊 Budget vs Actual: {}", report.month);
    println!("   ─────────────────────────────────────────────────────────────");

    if report.comparisons.is_empty() {
        println!("   No budgets or spending for this month.");
        return Ok(());
    }

    for c in &report.comparisons {
        println!(
            "   {} {:<22} │ {:>10} of {:>10} │ {:>6.1}% │ {}",
            status_icon(c.status),
            truncate(&c.category, 22),
            format!("${:.2}", c.actual),
            format!("${:.2}", c.budgeted),
            c.percentage,
            c.status
        );
    }

    let s = &report.summary;
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Total: ${:.2} of ${:.2} ({:.1}%, {})",
        s.total_actual, s.total_budgeted, s.percentage, s.status
    );
    println!(
        "   {} categories budgeted, {} over budget",
        s.categories_with_budget, s.categories_over_budget
    );

    Ok(())
}

fn status_icon(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::Under => "🟢",
        BudgetStatus::OnTrack => "🟡",
        BudgetStatus::Over => "🔴",
    }
}
