//! Read-only curriculum topic lookups.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;

use journey_core::error::CoreError;
use journey_db::repositories::TopicRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /topics -- list all topics (without content), in curriculum order.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let topics = TopicRepo::list(&state.pool).await?;
    Ok(Json(topics))
}

/// GET /topics/{id} -- one topic with content and its module/tier titles.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let topic = TopicRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Topic",
            id,
        }))?;
    Ok(Json(topic))
}
