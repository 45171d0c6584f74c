//! Transaction operations

use chrono::{NaiveDate, Utc};
use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::{format_datetime, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionType};

const TRANSACTION_COLUMNS: &str =
    "id, amount, date, description, category, type, created_at, updated_at";

/// Newest first; same-day records by creation time, then by id
const TRANSACTION_ORDER: &str = "ORDER BY date DESC, created_at DESC, id DESC";

impl Database {
    /// Validate and insert a transaction, returning the stored record
    pub fn create_transaction(&self, tx: &NewTransaction) -> Result<Transaction> {
        tx.validate()?;

        let conn = self.conn()?;
        let now = format_datetime(Utc::now());
        conn.execute(
            r#"
            INSERT INTO transactions (amount, date, description, category, type, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                tx.amount,
                tx.date.to_string(),
                tx.description.trim(),
                tx.category.trim(),
                tx.kind.as_str(),
                now,
                now,
            ],
        )?;
        let id = conn.last_insert_rowid();

        debug!(id, amount = tx.amount, category = %tx.category, kind = %tx.kind, "Transaction created");

        let row = conn.query_row(
            &format!("SELECT {} FROM transactions WHERE id = ?", TRANSACTION_COLUMNS),
            params![id],
            Self::row_to_transaction,
        )?;
        Ok(row)
    }

    /// Get a single transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let transaction = conn
            .query_row(
                &format!("SELECT {} FROM transactions WHERE id = ?", TRANSACTION_COLUMNS),
                params![id],
                Self::row_to_transaction,
            )
            .optional()?;

        Ok(transaction)
    }

    /// Every transaction, newest first
    pub fn list_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions {}",
            TRANSACTION_COLUMNS, TRANSACTION_ORDER
        ))?;

        let transactions = stmt
            .query_map([], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// One page of transactions in the same order as [`Self::list_transactions`]
    pub fn list_transactions_page(&self, limit: i64, offset: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions {} LIMIT ? OFFSET ?",
            TRANSACTION_COLUMNS, TRANSACTION_ORDER
        ))?;

        let transactions = stmt
            .query_map(params![limit, offset], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    /// Count total transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Replace every user-supplied field of a transaction.
    ///
    /// Fails with `NotFound` when no transaction has `id`.
    pub fn update_transaction(&self, id: i64, tx: &NewTransaction) -> Result<Transaction> {
        tx.validate()?;

        let conn = self.conn()?;
        let changed = conn.execute(
            r#"
            UPDATE transactions
            SET amount = ?, date = ?, description = ?, category = ?, type = ?, updated_at = ?
            WHERE id = ?
            "#,
            params![
                tx.amount,
                tx.date.to_string(),
                tx.description.trim(),
                tx.category.trim(),
                tx.kind.as_str(),
                format_datetime(Utc::now()),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(Error::not_found("Transaction not found"));
        }

        debug!(id, "Transaction updated");
        drop(conn);
        self.get_transaction(id)?
            .ok_or_else(|| Error::not_found("Transaction not found"))
    }

    /// Delete a transaction. Returns false when it did not exist.
    pub fn delete_transaction(&self, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        if deleted > 0 {
            debug!(id, "Transaction deleted");
        }
        Ok(deleted > 0)
    }

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let date_str: String = row.get(2)?;
        let kind_str: String = row.get(5)?;
        let created_at_str: String = row.get(6)?;
        let updated_at_str: String = row.get(7)?;

        Ok(Transaction {
            id: row.get(0)?,
            amount: row.get(1)?,
            date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
            description: row.get(3)?,
            category: row.get(4)?,
            kind: kind_str.parse().unwrap_or(TransactionType::Expense),
            created_at: parse_datetime(&created_at_str),
            updated_at: parse_datetime(&updated_at_str),
        })
    }
}
