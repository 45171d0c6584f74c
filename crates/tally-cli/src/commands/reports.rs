//! Report command implementations

use anyhow::{bail, Result};
use chrono::Local;
use tally_core::db::Database;
use tally_core::aggregate::MAX_MONTHS_BACK;
use tally_core::{category_totals, dashboard_stats, monthly_totals, CategoryFilter};

use super::{print_json, truncate};

pub fn cmd_report_monthly(db: &Database, months: u32, json: bool) -> Result<()> {
    if months == 0 || months > MAX_MONTHS_BACK {
        bail!("Months must be between 1 and {}", MAX_MONTHS_BACK);
    }

    let transactions = db.list_transactions()?;
    let totals = monthly_totals(&transactions, Local::now().date_naive(), months);

    if json {
        return print_json(&totals);
    }

    println!();
    println!("📅 Monthly Totals (last {} months)", months);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   {:<10} │ {:>12} │ {:>12} │ {:>12}",
        "Month", "Income", "Expenses", "Balance"
    );

    for m in &totals {
        println!(
            "   {:<10} │ {:>12} │ {:>12} │ {:>12}",
            m.label,
            format!("${:.2}", m.income),
            format!("${:.2}", m.expenses),
            format!("${:.2}", m.balance)
        );
    }

    Ok(())
}

pub fn cmd_report_categories(db: &Database, filter: CategoryFilter, json: bool) -> Result<()> {
    let transactions = db.list_transactions()?;
    let totals = category_totals(&transactions, filter);

    if json {
        return print_json(&totals);
    }

    println!();
    println!("🏷️  Category Totals ({})", filter.as_str());
    println!("   ─────────────────────────────────────────────");

    if totals.is_empty() {
        println!("   No matching transactions.");
        return Ok(());
    }

    for c in &totals {
        let bar = "█".repeat((c.percentage / 5.0).round() as usize);
        println!(
            "   {:<22} │ {:>10} │ {:>5.1}% {}",
            truncate(&c.category, 22),
            format!("${:.2}", c.amount),
            c.percentage,
            bar
        );
    }

    Ok(())
}

pub fn cmd_dashboard(db: &Database, json: bool) -> Result<()> {
    let transactions = db.list_transactions()?;
    let stats = dashboard_stats(&transactions);

    if json {
        return print_json(&stats);
    }

    println!();
    println!("📊 Tally Dashboard");
    println!("   ─────────────────────────────────────────────");
    println!("   Income:        ${:.2}", stats.total_income);
    println!("   Expenses:      ${:.2}", stats.total_expenses);
    println!("   Balance:       ${:.2}", stats.balance);
    println!("   Transactions:  {}", stats.transaction_count);

    if !stats.top_categories.is_empty() {
        println!();
        println!("   Top spending categories:");
        for c in &stats.top_categories {
            println!(
                "   • {:<22} ${:.2} ({:.1}%)",
                c.category, c.amount, c.percentage
            );
        }
    }

    Ok(())
}
