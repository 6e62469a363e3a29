//! Category route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use stride_core::Category;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// GET /api/categories
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.store().categories()?))
}

/// GET /api/categories/{slug}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Category>> {
    state
        .store()
        .category_by_slug(&slug)?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
}
