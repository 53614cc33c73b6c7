//! Read-only journey hierarchy lookups.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use journey_db::repositories::TierRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /journey/tiers -- all tiers with their modules nested.
pub async fn tiers(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tiers = TierRepo::list_with_modules(&state.pool).await?;
    Ok(Json(tiers))
}
