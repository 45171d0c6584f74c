//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tally_core::models::{CategoryFilter, TransactionType};

/// Tally - Track income, expenses and monthly budgets
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal finance tracker with budgets and spending insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, env = "TALLY_DB", default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record a transaction
    Add {
        /// income or expense
        #[arg(value_parser = parse_kind)]
        kind: TransactionType,

        /// Amount (positive; the direction comes from the kind)
        amount: f64,

        /// Category, e.g. "Food & Dining"
        #[arg(short, long)]
        category: String,

        /// Description
        #[arg(short, long)]
        description: String,

        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// List and manage transactions
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// List and manage monthly budgets
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Compare budgets with actual spending for a month
    Compare {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Generate reports
    Report {
        #[command(subcommand)]
        report: ReportType,
    },

    /// Show dashboard summary
    Dashboard,

    /// Show spending insights for the current month
    Insights,

    /// List the predefined categories
    Categories {
        /// Filter: income, expense or all
        #[arg(short = 't', long = "type", default_value = "all")]
        kind: String,
    },

    /// Import legacy transactions.json / budgets.json files
    Import {
        /// transactions.json file
        #[arg(short, long)]
        transactions: Option<PathBuf>,

        /// budgets.json file
        #[arg(short, long)]
        budgets: Option<PathBuf>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Comma-separated API keys accepted as "Bearer <key>"
        #[arg(long, env = "TALLY_API_KEYS", hide_env_values = true, default_value = "")]
        api_keys: String,

        /// Comma-separated allowed CORS origins
        #[arg(long, env = "TALLY_ALLOWED_ORIGINS", default_value = "")]
        allowed_origins: String,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List recent transactions
    List {
        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Number of transactions to skip
        #[arg(long, default_value = "0")]
        offset: i64,
    },
    /// Replace a transaction's fields
    Update {
        /// Transaction ID
        id: i64,

        /// income or expense
        #[arg(long, value_parser = parse_kind)]
        kind: TransactionType,

        /// Amount
        #[arg(long)]
        amount: f64,

        /// Category
        #[arg(short, long)]
        category: String,

        /// Description
        #[arg(short, long)]
        description: String,

        /// Date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Set (create or overwrite) the budget for a category and month
    Set {
        /// Category
        category: String,

        /// Monthly amount
        amount: f64,

        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Delete a budget
    Delete {
        /// Budget ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Income and expenses per month
    Monthly {
        /// Number of months ending with the current one
        #[arg(short, long, default_value = "12")]
        months: u32,
    },
    /// Totals per category
    Categories {
        /// Filter: income, expense or all
        #[arg(short = 't', long = "type", default_value = "expense", value_parser = parse_filter)]
        kind: CategoryFilter,
    },
}

fn parse_kind(s: &str) -> Result<TransactionType, String> {
    s.parse()
}

fn parse_filter(s: &str) -> Result<CategoryFilter, String> {
    s.parse()
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| format!("Invalid date: {} (use YYYY-MM-DD)", s))
}
