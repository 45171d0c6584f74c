//! Calendar month helpers
//!
//! Budgets and the comparison endpoint address months as `YYYY-MM` keys.
//! Validation is purely syntactic: anything matching `^\d{4}-\d{2}$` is
//! accepted, and a key naming a month that never occurs simply matches no
//! records.

use std::sync::LazyLock;

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;

use crate::error::{Error, Result};

static MONTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}$").expect("valid regex"));

/// Whether `month` has the `YYYY-MM` shape
pub fn is_valid_month(month: &str) -> bool {
    MONTH_PATTERN.is_match(month)
}

/// Fail with `InvalidInput` unless `month` has the `YYYY-MM` shape
pub fn validate_month(month: &str) -> Result<()> {
    if month.is_empty() {
        return Err(Error::invalid_input(
            "Month parameter is required (format: YYYY-MM)",
        ));
    }
    if !is_valid_month(month) {
        return Err(Error::invalid_input("Invalid month format. Use YYYY-MM"));
    }
    Ok(())
}

/// A calendar month (month is always in 1..=12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Move by a signed number of months
    pub fn offset(&self, months: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + months;
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn pred(&self) -> Self {
        self.offset(-1)
    }

    pub fn succ(&self) -> Self {
        self.offset(1)
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Number of days in the month (28..=31)
    pub fn days(&self) -> u32 {
        let next = self.succ().first_day();
        next.signed_duration_since(self.first_day()).num_days() as u32
    }

    /// `YYYY-MM`
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Short display label, e.g. "Mar 2024"
    pub fn label(&self) -> String {
        self.first_day().format("%b %Y").to_string()
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for YearMonth {
    type Err = Error;

    /// Parse a `YYYY-MM` key naming a real month
    fn from_str(s: &str) -> Result<Self> {
        validate_month(s)?;
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| Error::invalid_input("Invalid month format. Use YYYY-MM"))?;
        let year: i32 = year
            .parse()
            .map_err(|_| Error::invalid_input("Invalid year"))?;
        let month: u32 = month
            .parse()
            .map_err(|_| Error::invalid_input("Invalid month"))?;
        Self::new(year, month)
            .ok_or_else(|| Error::invalid_input(format!("Month out of range: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_pattern() {
        assert!(is_valid_month("2024-03"));
        assert!(is_valid_month("2024-13")); // shape only
        assert!(!is_valid_month("2024-3"));
        assert!(!is_valid_month("24-03"));
        assert!(!is_valid_month("2024-03-01"));
        assert!(!is_valid_month(" 2024-03"));
        assert!(!is_valid_month(""));
    }

    #[test]
    fn test_validate_month_errors() {
        assert!(matches!(validate_month(""), Err(Error::InvalidInput(_))));
        assert!(matches!(
            validate_month("March"),
            Err(Error::InvalidInput(_))
        ));
        assert!(validate_month("1999-12").is_ok());
    }

    #[test]
    fn test_offset_crosses_years() {
        let jan = YearMonth::new(2024, 1).unwrap();
        assert_eq!(jan.pred(), YearMonth::new(2023, 12).unwrap());
        assert_eq!(jan.offset(-13), YearMonth::new(2022, 12).unwrap());
        assert_eq!(jan.offset(23), YearMonth::new(2025, 12).unwrap());
        assert_eq!(YearMonth::new(2024, 12).unwrap().succ().key(), "2025-01");
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(YearMonth::new(2024, 2).unwrap().days(), 29);
        assert_eq!(YearMonth::new(2023, 2).unwrap().days(), 28);
        assert_eq!(YearMonth::new(2024, 4).unwrap().days(), 30);
        assert_eq!(YearMonth::new(2024, 12).unwrap().days(), 31);
    }

    #[test]
    fn test_key_and_label() {
        let m = YearMonth::new(2024, 3).unwrap();
        assert_eq!(m.key(), "2024-03");
        assert_eq!(m.to_string(), "2024-03");
        assert_eq!(m.label(), "Mar 2024");
    }

    #[test]
    fn test_parse() {
        let m: YearMonth = "2024-11".parse().unwrap();
        assert_eq!((m.year(), m.month()), (2024, 11));
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("2024-1".parse::<YearMonth>().is_err());
    }
}
