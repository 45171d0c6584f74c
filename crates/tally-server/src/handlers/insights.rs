//! Insight handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{AppError, AppState};
use tally_core::insights::{generate_insights, Insight};

/// GET /api/insights - Spending observations for the current month
pub async fn list_insights(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Insight>>, AppError> {
    let transactions = state.db.list_transactions()?;
    Ok(Json(generate_insights(&transactions)))
}
