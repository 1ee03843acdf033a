//! services/api/src/web/practice.rs
//!
//! Handlers for the practice arena: starter exercises, the sandboxed preview
//! and the "get help" action.

use crate::web::protocol::{ActivityBody, CodeBody, GenerationOutcomeBody};
use crate::web::rest::{find_session, HandlerError};
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Json},
};
use codesnack_core::practice::{sandbox_preview, PracticeActivity};
use std::sync::Arc;
use uuid::Uuid;

/// Scripts may run in the preview frame, but it gets a unique origin and no
/// access to the application.
pub const PREVIEW_CSP: &str = "sandbox allow-scripts";

/// List the canned exercises and their starter code.
#[utoipa::path(
    get,
    path = "/practice/activities",
    responses(
        (status = 200, description = "All practice activities", body = [ActivityBody])
    )
)]
pub async fn list_activities_handler() -> Json<Vec<ActivityBody>> {
    Json(PracticeActivity::ALL.into_iter().map(ActivityBody::from).collect())
}

/// Render the learner's code inside the preview card.
#[utoipa::path(
    post,
    path = "/practice/preview",
    request_body = CodeBody,
    responses(
        (status = 200, description = "An HTML document for a sandboxed frame", content_type = "text/html")
    )
)]
pub async fn preview_handler(Json(body): Json<CodeBody>) -> impl IntoResponse {
    (
        [(header::CONTENT_SECURITY_POLICY, PREVIEW_CSP)],
        Html(sandbox_preview(&body.code)),
    )
}

/// Ask the generation service to explain and improve the learner's code.
#[utoipa::path(
    post,
    path = "/sessions/{session_id}/practice/help",
    request_body = CodeBody,
    responses(
        (status = 200, description = "An explanation, a rejection, or a failure", body = GenerationOutcomeBody),
        (status = 404, description = "Unknown session")
    ),
    params(("session_id" = Uuid, Path, description = "The session ID."))
)]
pub async fn practice_help_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<CodeBody>,
) -> Result<Json<GenerationOutcomeBody>, HandlerError> {
    let session = find_session(&app_state, session_id).await?;
    let result = session.lock().await.request_practice_help(&body.code).await;
    Ok(Json(result.into()))
}
