//! Core types for spending insights

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How an insight should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// Something worth worrying about
    Warning,
    /// Neutral observation
    Info,
    /// Good news
    Success,
    /// Suggestion for a habit change
    Tip,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Warning => "warning",
            InsightKind::Info => "info",
            InsightKind::Success => "success",
            InsightKind::Tip => "tip",
        }
    }
}

impl fmt::Display for InsightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warning" => Ok(InsightKind::Warning),
            "info" => Ok(InsightKind::Info),
            "success" => Ok(InsightKind::Success),
            "tip" => Ok(InsightKind::Tip),
            _ => Err(format!("Unknown insight kind: {}", s)),
        }
    }
}

/// A human-readable observation about spending. Recomputed on every request,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    /// Short title (e.g., "Spending Increased")
    pub title: String,
    /// One-sentence explanation
    pub description: String,
    /// Headline figure shown as a badge (e.g., "+12.5%", "$1,240")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Insight {
    pub fn new(kind: InsightKind, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            value: None,
        }
    }

    /// Attach the badge value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// Whole-dollar en-US currency, e.g. `$1,235` or `-$12`
pub fn format_currency(amount: f64) -> String {
    let whole = amount.abs().round() as u64;
    let digits = whole.to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0.0 && whole > 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip_names() {
        assert_eq!(InsightKind::Tip.as_str(), "tip");
        assert_eq!(InsightKind::from_str("success").unwrap(), InsightKind::Success);
        assert!(InsightKind::from_str("alert").is_err());
    }

    #[test]
    fn test_insight_serialization() {
        let insight = Insight::new(InsightKind::Warning, "Title", "Body").with_value("+12.0%");
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["type"], "warning");
        assert_eq!(json["value"], "+12.0%");

        let bare = serde_json::to_value(Insight::new(InsightKind::Tip, "T", "B")).unwrap();
        assert!(bare.get("value").is_none());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(99.4), "$99");
        assert_eq!(format_currency(99.5), "$100");
        assert_eq!(format_currency(1234.56), "$1,235");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000");
        assert_eq!(format_currency(-12.0), "-$12");
        assert_eq!(format_currency(-0.2), "$0");
    }
}
