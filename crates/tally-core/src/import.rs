//! Legacy JSON data import
//!
//! Earlier versions of the tracker kept everything in two flat files,
//! `transactions.json` and `budgets.json`, each a JSON array of camelCase
//! records with string `_id`s. Those files were edited by hand often enough
//! that individual records can be malformed, so every field is read leniently
//! here and validated per record on conversion. A bad record is skipped; a
//! file that is not a JSON array fails the whole import.

use std::io::Read;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{NewBudget, NewTransaction, TransactionType};

/// A transaction as stored in `transactions.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyTransaction {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    /// Number, or a numeric string when the record came from a form post
    pub amount: Value,
    /// `YYYY-MM-DD`, or a full ISO-8601 timestamp
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// A budget as stored in `budgets.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegacyBudget {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub category: Option<String>,
    pub amount: Value,
    pub month: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Original record timestamps, when the legacy file had them
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LegacyTimestamps {
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Parse the contents of a legacy `transactions.json`
pub fn load_legacy_transactions<R: Read>(reader: R) -> Result<Vec<LegacyTransaction>> {
    let records: Vec<LegacyTransaction> = serde_json::from_reader(reader)?;
    debug!(count = records.len(), "Loaded legacy transactions");
    Ok(records)
}

/// Parse the contents of a legacy `budgets.json`
pub fn load_legacy_budgets<R: Read>(reader: R) -> Result<Vec<LegacyBudget>> {
    let records: Vec<LegacyBudget> = serde_json::from_reader(reader)?;
    debug!(count = records.len(), "Loaded legacy budgets");
    Ok(records)
}

impl LegacyTransaction {
    /// Convert to a validated [`NewTransaction`]
    pub fn to_new_transaction(&self) -> Result<NewTransaction> {
        let date = self
            .date
            .as_deref()
            .and_then(parse_legacy_date)
            .ok_or_else(|| Error::invalid_input(format!("Invalid date: {:?}", self.date)))?;

        let kind: TransactionType = self
            .kind
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(Error::InvalidInput)?;

        let tx = NewTransaction {
            amount: parse_amount(&self.amount)?,
            date,
            description: self.description.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            kind,
        };
        tx.validate()?;
        Ok(tx)
    }

    pub fn timestamps(&self) -> LegacyTimestamps {
        LegacyTimestamps {
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
            updated_at: self.updated_at.as_deref().and_then(parse_timestamp),
        }
    }
}

impl LegacyBudget {
    /// Convert to a validated [`NewBudget`]
    pub fn to_new_budget(&self) -> Result<NewBudget> {
        let budget = NewBudget {
            category: self.category.clone().unwrap_or_default(),
            amount: parse_amount(&self.amount)?,
            month: self.month.clone().unwrap_or_default(),
        };
        budget.validate()?;
        Ok(budget)
    }

    pub fn timestamps(&self) -> LegacyTimestamps {
        LegacyTimestamps {
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
            updated_at: self.updated_at.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Amount as a number or numeric string
fn parse_amount(value: &Value) -> Result<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount.ok_or_else(|| Error::invalid_input(format!("Invalid amount: {}", value)))
}

/// Date from `YYYY-MM-DD` or the date part of an ISO-8601 timestamp
fn parse_legacy_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| s.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
