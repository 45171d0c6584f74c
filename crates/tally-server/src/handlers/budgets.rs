//! Budget handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::{parse_json_body, AppError, AppState};
use tally_core::models::{Budget, BudgetReport, NewBudget};

/// Query parameters carrying an optional `YYYY-MM` month
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub month: Option<String>,
}

/// GET /api/budgets - List budgets, optionally for one month
pub async fn list_budgets(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<Vec<Budget>>, AppError> {
    let month = params.month.as_deref().filter(|m| !m.is_empty());
    let budgets = state.db.list_budgets(month)?;
    Ok(Json(budgets))
}

/// POST /api/budgets - Create or overwrite the budget for a category and month
pub async fn upsert_budget(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<(StatusCode, Json<Budget>), AppError> {
    let req: NewBudget = parse_json_body(request).await?;

    let budget = state.db.upsert_budget(&req)?;
    info!(id = budget.id, category = %budget.category, month = %budget.month, "Budget saved via API");

    Ok((StatusCode::CREATED, Json(budget)))
}

/// GET /api/budgets/:id - Get a single budget
pub async fn get_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Budget>, AppError> {
    let budget = state
        .db
        .get_budget(id)?
        .ok_or_else(|| AppError::not_found("Budget not found"))?;

    Ok(Json(budget))
}

/// PUT /api/budgets/:id - Replace a budget's category, month and amount
pub async fn update_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    request: Request,
) -> Result<Json<Budget>, AppError> {
    let req: NewBudget = parse_json_body(request).await?;

    Ok(Json(state.db.update_budget(id, &req)?))
}

/// DELETE /api/budgets/:id - Delete a budget
pub async fn delete_budget(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !state.db.delete_budget(id)? {
        return Err(AppError::not_found("Budget not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/budgets/comparison?month=YYYY-MM - Budget vs actual for a month
pub async fn budget_comparison(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<BudgetReport>, AppError> {
    // A missing month is validated the same way as an empty one
    let month = params.month.unwrap_or_default();
    let report = state.db.compute_budget_comparison(&month)?;
    Ok(Json(report))
}
