//! Predefined category catalog
//!
//! A fixed table of categories with display color and icon. Transactions may
//! use categories outside this table; lookups for those simply return `None`.

use serde::Serialize;

use crate::models::TransactionType;

/// Chart color for categories missing from the catalog
pub const FALLBACK_COLOR: &str = "#8884d8";

/// A catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub color: &'static str,
    pub icon: &'static str,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

const fn expense(name: &'static str, color: &'static str, icon: &'static str) -> Category {
    Category {
        name,
        color,
        icon,
        kind: TransactionType::Expense,
    }
}

const fn income(name: &'static str, color: &'static str, icon: &'static str) -> Category {
    Category {
        name,
        color,
        icon,
        kind: TransactionType::Income,
    }
}

static CATEGORIES: &[Category] = &[
    expense("Food & Dining", "#FF6B6B", "🍽️"),
    expense("Transportation", "#4ECDC4", "🚗"),
    expense("Shopping", "#45B7D1", "🛍️"),
    expense("Entertainment", "#96CEB4", "🎬"),
    expense("Bills & Utilities", "#FFEAA7", "⚡"),
    expense("Healthcare", "#DDA0DD", "🏥"),
    expense("Education", "#98D8C8", "📚"),
    expense("Travel", "#F7DC6F", "✈️"),
    expense("Home & Garden", "#BB8FCE", "🏠"),
    expense("Personal Care", "#85C1E9", "💄"),
    expense("Insurance", "#F8C471", "🛡️"),
    expense("Taxes", "#EC7063", "📋"),
    expense("Gifts & Donations", "#A9DFBF", "🎁"),
    expense("Other Expenses", "#D5DBDB", "📦"),
    income("Salary", "#58D68D", "💼"),
    income("Freelance", "#5DADE2", "💻"),
    income("Business", "#F4D03F", "🏢"),
    income("Investments", "#AF7AC5", "📈"),
    income("Rental Income", "#76D7C4", "🏘️"),
    income("Other Income", "#85C1E9", "💰"),
];

/// Every catalog entry, expenses first
pub fn all_categories() -> &'static [Category] {
    CATEGORIES
}

/// Exact (case-sensitive) name lookup
pub fn category_by_name(name: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.name == name)
}

pub fn categories_of(kind: TransactionType) -> impl Iterator<Item = &'static Category> {
    CATEGORIES.iter().filter(move |c| c.kind == kind)
}

pub fn expense_categories() -> Vec<&'static Category> {
    categories_of(TransactionType::Expense).collect()
}

pub fn income_categories() -> Vec<&'static Category> {
    categories_of(TransactionType::Income).collect()
}

/// Display color for a category, falling back for unknown names
pub fn color_for(name: &str) -> &'static str {
    category_by_name(name)
        .map(|c| c.color)
        .unwrap_or(FALLBACK_COLOR)
}
