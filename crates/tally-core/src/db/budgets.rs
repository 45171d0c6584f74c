//! Budget operations

use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{format_datetime, parse_datetime, Database};
use crate::budget::compare_budgets;
use crate::error::{Error, Result};
use crate::models::{Budget, BudgetReport, NewBudget};
use crate::period::validate_month;

const BUDGET_COLUMNS: &str = "id, category, amount, month, created_at, updated_at";

impl Database {
    /// Create the budget for `(category, month)`, or overwrite the amount of
    /// the existing one. Returns the stored record either way.
    pub fn upsert_budget(&self, budget: &NewBudget) -> Result<Budget> {
        budget.validate()?;

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let now = format_datetime(Utc::now());
        let category = budget.category.trim();

        tx.execute(
            r#"
            INSERT INTO budgets (category, amount, month, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(category, month) DO UPDATE SET
                amount = excluded.amount,
                updated_at = excluded.updated_at
            "#,
            params![category, budget.amount, budget.month, now, now],
        )?;

        let stored = tx.query_row(
            &format!(
                "SELECT {} FROM budgets WHERE category = ? AND month = ?",
                BUDGET_COLUMNS
            ),
            params![category, budget.month],
            Self::row_to_budget,
        )?;
        tx.commit()?;

        debug!(
            id = stored.id,
            category = %stored.category,
            month = %stored.month,
            amount = stored.amount,
            "Budget saved"
        );
        Ok(stored)
    }

    /// Get a single budget by ID
    pub fn get_budget(&self, id: i64) -> Result<Option<Budget>> {
        let conn = self.conn()?;
        let budget = conn
            .query_row(
                &format!("SELECT {} FROM budgets WHERE id = ?", BUDGET_COLUMNS),
                params![id],
                Self::row_to_budget,
            )
            .optional()?;

        Ok(budget)
    }

    /// List budgets, newest month first, optionally restricted to one month.
    ///
    /// The filter is an exact match and is not validated, so a malformed
    /// month simply matches nothing.
    pub fn list_budgets(&self, month: Option<&str>) -> Result<Vec<Budget>> {
        let conn = self.conn()?;

        let budgets = match month {
            Some(month) => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM budgets WHERE month = ? ORDER BY category ASC",
                    BUDGET_COLUMNS
                ))?;
                let rows = stmt
                    .query_map(params![month], Self::row_to_budget)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {} FROM budgets ORDER BY month DESC, category ASC",
                    BUDGET_COLUMNS
                ))?;
                let rows = stmt
                    .query_map([], Self::row_to_budget)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
        };

        Ok(budgets)
    }

    /// Replace a budget's category, month and amount.
    ///
    /// Fails with `NotFound` when no budget has `id`. Moving a budget onto a
    /// `(category, month)` pair that already has one is `InvalidInput`.
    pub fn update_budget(&self, id: i64, budget: &NewBudget) -> Result<Budget> {
        budget.validate()?;

        let conn = self.conn()?;
        let result = conn.execute(
            r#"
            UPDATE budgets
            SET category = ?, amount = ?, month = ?, updated_at = ?
            WHERE id = ?
            "#,
            params![
                budget.category.trim(),
                budget.amount,
                budget.month,
                format_datetime(Utc::now()),
                id,
            ],
        );

        let changed = match result {
            Ok(changed) => changed,
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                return Err(Error::invalid_input(format!(
                    "A budget for {} in {} already exists",
                    budget.category.trim(),
                    budget.month
                )));
            }
            Err(e) => return Err(e.into()),
        };

        if changed == 0 {
            return Err(Error::not_found("Budget not found"));
        }

        debug!(id, "Budget updated");
        drop(conn);
        self.get_budget(id)?
            .ok_or_else(|| Error::not_found("Budget not found"))
    }

    /// Delete a budget. Returns false when it did not exist.
    pub fn delete_budget(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM budgets WHERE id = ?", params![id])?;
        if deleted > 0 {
            debug!(id, "Budget deleted");
        }
        Ok(deleted > 0)
    }

    /// Budget-vs-actual report for `month` (`YYYY-MM`) over the stored records
    pub fn compute_budget_comparison(&self, month: &str) -> Result<BudgetReport> {
        validate_month(month)?;

        let budgets = self.list_budgets(Some(month))?;
        let transactions = self.list_transactions()?;

        compare_budgets(month, &budgets, &transactions)
    }

    pub(crate) fn row_to_budget(row: &rusqlite::Row) -> rusqlite::Result<Budget> {
        let created_at_str: String = row.get(4)?;
        let updated_at_str: String = row.get(5)?;

        Ok(Budget {
            id: row.get(0)?,
            category: row.get(1)?,
            amount: row.get(2)?,
            month: row.get(3)?,
            created_at: parse_datetime(&created_at_str),
            updated_at: parse_datetime(&updated_at_str),
        })
    }
}
