//! Handlers for timeline templates: listing, creation, and application,
//! with a single POST endpoint dispatched on an `action` discriminator.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use journey_core::timeline::validate_name;
use journey_db::models::timeline_template::CreateTimelineTemplate;
use journey_db::repositories::TemplateRepo;

use crate::error::{AppError, AppResult};
use crate::response::{ApplyResponse, IdMessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub public: Option<bool>,
    pub user_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTemplateRequest {
    user_id: Option<String>,
    name: Option<String>,
    description: Option<String>,
    structure: Option<serde_json::Value>,
    is_public: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplyTemplateRequest {
    template_id: Option<String>,
    user_id: Option<String>,
    parent_id: Option<String>,
}

// ---------------------------------------------------------------------------
// GET /timeline/templates
// ---------------------------------------------------------------------------

/// List templates: public ones, or public plus the given user's own.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let templates = TemplateRepo::list(
        &state.pool,
        params.public.unwrap_or(false),
        params.user_id.as_deref(),
    )
    .await?;
    tracing::debug!(count = templates.len(), "Listed timeline templates");
    Ok(Json(templates))
}

// ---------------------------------------------------------------------------
// POST /timeline/templates  (action: "create" | "apply")
// ---------------------------------------------------------------------------

/// Dispatch on the `action` field of the request body. The body is taken as
/// raw JSON so an invalid action yields this API's 400, not a rejection.
pub async fn dispatch(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> AppResult<Response> {
    match body.get("action").and_then(|a| a.as_str()) {
        Some("create") => create(&state, body).await,
        Some("apply") => apply(&state, body).await,
        _ => Err(AppError::BadRequest("Invalid action".into())),
    }
}

async fn create(state: &AppState, body: serde_json::Value) -> AppResult<Response> {
    let input: CreateTemplateRequest = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;
    let (Some(name), Some(structure)) = (input.name, input.structure) else {
        return Err(AppError::BadRequest("Missing required fields".into()));
    };
    validate_name("name", &name)?;

    let created = TemplateRepo::create(
        &state.pool,
        &CreateTimelineTemplate {
            user_id: input.user_id,
            name,
            description: input.description,
            structure,
            is_public: input.is_public,
        },
    )
    .await?;
    tracing::info!(id = %created.id, name = %created.name, "Template created");
    Ok(Json(IdMessageResponse {
        id: created.id,
        message: "Template created successfully",
    })
    .into_response())
}

async fn apply(state: &AppState, body: serde_json::Value) -> AppResult<Response> {
    let input: ApplyTemplateRequest = serde_json::from_value(body)
        .map_err(|e| AppError::BadRequest(format!("Invalid request body: {e}")))?;
    let (Some(template_id), Some(user_id)) = (input.template_id, input.user_id) else {
        return Err(AppError::BadRequest("Missing required fields".into()));
    };

    let blocks =
        TemplateRepo::apply(&state.pool, &template_id, &user_id, input.parent_id.as_deref())
            .await?;
    tracing::info!(%template_id, blocks = blocks.len(), "Template applied");
    Ok(Json(ApplyResponse {
        message: "Template applied successfully",
        blocks,
    })
    .into_response())
}
