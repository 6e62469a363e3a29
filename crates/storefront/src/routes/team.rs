//! Team member route handlers.

use axum::{Json, extract::State};
use stride_core::TeamMember;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// GET /api/team-members
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<TeamMember>>> {
    Ok(Json(state.store().team_members()?))
}
