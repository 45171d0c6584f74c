//! Report handlers
//!
//! Every report is recomputed from the full transaction list on each request.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Local;
use serde::Deserialize;

use crate::{AppError, AppState};
use tally_core::aggregate::{self, DEFAULT_MONTHS_BACK, MAX_MONTHS_BACK};
use tally_core::models::{CategoryFilter, CategoryTotal, DashboardStats, MonthlyTotal};

/// Query parameters for the monthly report
#[derive(Debug, Deserialize)]
pub struct MonthlyQuery {
    pub months: Option<u32>,
}

/// Query parameters for the category report
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /api/reports/monthly - Income and expenses per month, oldest first
pub async fn report_monthly(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthlyQuery>,
) -> Result<Json<Vec<MonthlyTotal>>, AppError> {
    let months = params.months.unwrap_or(DEFAULT_MONTHS_BACK);
    if !(1..=MAX_MONTHS_BACK).contains(&months) {
        return Err(AppError::bad_request(&format!(
            "months must be between 1 and {}",
            MAX_MONTHS_BACK
        )));
    }

    let transactions = state.db.list_transactions()?;
    let totals = aggregate::monthly_totals(&transactions, Local::now().date_naive(), months);

    Ok(Json(totals))
}

/// GET /api/reports/categories?type=expense - Totals per category, largest first
pub async fn report_categories(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryQuery>,
) -> Result<Json<Vec<CategoryTotal>>, AppError> {
    let filter: CategoryFilter = match params.kind.as_deref() {
        None | Some("") => CategoryFilter::default(),
        Some(s) => s.parse().map_err(|e: String| AppError::bad_request(&e))?,
    };

    let transactions = state.db.list_transactions()?;
    Ok(Json(aggregate::category_totals(&transactions, filter)))
}

/// GET /api/dashboard - Headline statistics
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DashboardStats>, AppError> {
    let transactions = state.db.list_transactions()?;
    Ok(Json(aggregate::dashboard_stats(&transactions)))
}
