//! Bulk load of legacy JSON records

use chrono::Utc;
use rusqlite::params;
use tracing::{info, warn};

use super::{format_datetime, Database};
use crate::error::Result;
use crate::import::{LegacyBudget, LegacyTransaction};
use crate::models::ImportStats;

impl Database {
    /// Insert legacy records in a single SQLite transaction.
    ///
    /// Records that fail validation are skipped and counted. Original
    /// `createdAt`/`updatedAt` values are kept when present. Budgets follow
    /// the usual upsert rule, so a later record for the same category and
    /// month overwrites an earlier one.
    pub fn import_legacy(
        &self,
        transactions: &[LegacyTransaction],
        budgets: &[LegacyBudget],
    ) -> Result<ImportStats> {
        let mut stats = ImportStats::default();
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let now = Utc::now();

        for record in transactions {
            let new_tx = match record.to_new_transaction() {
                Ok(t) => t,
                Err(e) => {
                    warn!(id = ?record.id, error = %e, "Skipping legacy transaction");
                    stats.transactions_skipped += 1;
                    continue;
                }
            };
            let ts = record.timestamps();
            let created_at = ts.created_at.unwrap_or(now);
            let updated_at = ts.updated_at.unwrap_or(created_at);

            tx.execute(
                r#"
                INSERT INTO transactions (amount, date, description, category, type, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
                params![
                    new_tx.amount,
                    new_tx.date.to_string(),
                    new_tx.description.trim(),
                    new_tx.category.trim(),
                    new_tx.kind.as_str(),
                    format_datetime(created_at),
                    format_datetime(updated_at),
                ],
            )?;
            stats.transactions_imported += 1;
        }

        for record in budgets {
            let new_budget = match record.to_new_budget() {
                Ok(b) => b,
                Err(e) => {
                    warn!(id = ?record.id, error = %e, "Skipping legacy budget");
                    stats.budgets_skipped += 1;
                    continue;
                }
            };
            let ts = record.timestamps();
            let created_at = ts.created_at.unwrap_or(now);
            let updated_at = ts.updated_at.unwrap_or(created_at);

            tx.execute(
                r#"
                INSERT INTO budgets (category, amount, month, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
                ON CONFLICT(category, month) DO UPDATE SET
                    amount = excluded.amount,
                    updated_at = excluded.updated_at
                "#,
                params![
                    new_budget.category.trim(),
                    new_budget.amount,
                    new_budget.month,
                    format_datetime(created_at),
                    format_datetime(updated_at),
                ],
            )?;
            stats.budgets_imported += 1;
        }

        tx.commit()?;

        info!(
            transactions = stats.transactions_imported,
            transactions_skipped = stats.transactions_skipped,
            budgets = stats.budgets_imported,
            budgets_skipped = stats.budgets_skipped,
            "Legacy import complete"
        );
        Ok(stats)
    }
}
