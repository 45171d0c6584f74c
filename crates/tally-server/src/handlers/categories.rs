//! Category catalog handlers

use axum::{extract::Query, Json};
use serde::Deserialize;

use crate::AppError;
use tally_core::catalog::{self, Category};
use tally_core::models::TransactionType;

/// Query parameters for the catalog
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// GET /api/categories?type=income - Predefined categories
pub async fn list_categories(
    Query(params): Query<CatalogQuery>,
) -> Result<Json<Vec<Category>>, AppError> {
    let categories: Vec<Category> = match params.kind.as_deref() {
        None | Some("") | Some("all") => catalog::all_categories().to_vec(),
        Some(s) => {
            let kind: TransactionType = s.parse().map_err(|e: String| AppError::bad_request(&e))?;
            catalog::categories_of(kind).copied().collect()
        }
    };

    Ok(Json(categories))
}
