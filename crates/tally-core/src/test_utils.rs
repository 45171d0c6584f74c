//! Record builders shared by unit tests

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Budget, Transaction, TransactionType};

fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(0, 0).unwrap()
}

/// A stored transaction with fixed timestamps
pub fn tx(
    id: i64,
    amount: f64,
    date: NaiveDate,
    category: &str,
    kind: TransactionType,
) -> Transaction {
    Transaction {
        id,
        amount,
        date,
        description: format!("{} #{}", category, id),
        category: category.to_string(),
        kind,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

/// A stored budget with fixed timestamps
pub fn budget(id: i64, category: &str, amount: f64, month: &str) -> Budget {
    Budget {
        id,
        category: category.to_string(),
        amount,
        month: month.to_string(),
        created_at: epoch(),
        updated_at: epoch(),
    }
}
