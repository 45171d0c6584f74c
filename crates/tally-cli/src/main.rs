//! Tally CLI - Personal finance tracker
//!
//! Usage:
//!   tally init                               Initialize database
//!   tally add expense 42.50 -c Travel -d Taxi  Record a transaction
//!   tally compare --month 2024-03            Budget vs actual
//!   tally serve --port 3000                  Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let json = cli.json;

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Add {
            kind,
            amount,
            category,
            description,
            date,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(&db, kind, amount, &category, &description, date, json)
        }
        Commands::Transactions { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None => commands::cmd_transactions_list(&db, 20, 0, json),
                Some(TransactionsAction::List { limit, offset }) => {
                    commands::cmd_transactions_list(&db, limit, offset, json)
                }
                Some(TransactionsAction::Update {
                    id,
                    kind,
                    amount,
                    category,
                    description,
                    date,
                }) => commands::cmd_transactions_update(
                    &db,
                    id,
                    tally_core::NewTransaction {
                        amount,
                        date,
                        description,
                        category,
                        kind,
                    },
                    json,
                ),
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&db, id)
                }
            }
        }
        Commands::Budgets { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                None => commands::cmd_budgets_list(&db, None, json),
                Some(BudgetsAction::List { month }) => {
                    commands::cmd_budgets_list(&db, month.as_deref(), json)
                }
                Some(BudgetsAction::Set {
                    category,
                    amount,
                    month,
                }) => commands::cmd_budgets_set(&db, &category, amount, month.as_deref(), json),
                Some(BudgetsAction::Delete { id }) => commands::cmd_budgets_delete(&db, id),
            }
        }
        Commands::Compare { month } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_compare(&db, month.as_deref(), json)
        }
        Commands::Report { report } => {
            let db = commands::open_db(&cli.db)?;
            match report {
                ReportType::Monthly { months } => commands::cmd_report_monthly(&db, months, json),
                ReportType::Categories { kind } => {
                    commands::cmd_report_categories(&db, kind, json)
                }
            }
        }
        Commands::Dashboard => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_dashboard(&db, json)
        }
        Commands::Insights => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_insights(&db, json)
        }
        Commands::Categories { kind } => commands::cmd_categories(&kind, json),
        Commands::Import {
            transactions,
            budgets,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_import(&db, transactions.as_deref(), budgets.as_deref())
        }
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
            api_keys,
            allowed_origins,
        } => {
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                no_auth,
                static_dir.as_deref(),
                &api_keys,
                &allowed_origins,
            )
            .await
        }
    }
}
