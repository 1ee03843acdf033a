//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the session endpoints and the master
//! definition for the OpenAPI specification.

use crate::export::{self, Download, ExportError};
use crate::web::protocol::{
    ActivityBody, CodeBody, ContentKindDto, CreateSessionResponse, CustomPromptBody,
    GenerateRequest, GenerationOutcomeBody, LearnerLevelDto, PerformanceBody, TemplateResponse,
    TokenCountBody, TokenUsageBody, VideoBody,
};
use crate::web::state::{AppState, SharedSession};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use codesnack_core::session::SessionError;
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::OpenApi;
use uuid::Uuid;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        create_session_handler,
        generate_handler,
        performance_handler,
        get_custom_prompt_handler,
        set_custom_prompt_handler,
        clear_custom_prompt_handler,
        generate_custom_handler,
        export_pdf_handler,
        export_text_handler,
        crate::web::practice::list_activities_handler,
        crate::web::practice::preview_handler,
        crate::web::practice::practice_help_handler,
    ),
    components(
        schemas(
            CreateSessionResponse, GenerateRequest, ContentKindDto, LearnerLevelDto,
            TemplateResponse, GenerationOutcomeBody, TokenUsageBody, TokenCountBody, VideoBody,
            PerformanceBody, CustomPromptBody, CodeBody, ActivityBody
        )
    ),
    tags(
        (name = "CodeSnack API", description = "Generate, review and export software development learning material.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Helpers
//=========================================================================================

pub(crate) type HandlerError = (StatusCode, String);

/// Looks up a session or answers 404.
pub(crate) async fn find_session(
    app_state: &AppState,
    session_id: Uuid,
) -> Result<SharedSession, HandlerError> {
    app_state.sessions.get(session_id).await.ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            format!("Session {} not found", session_id),
        )
    })
}

fn download_response(download: Download) -> Response {
    let disposition = download.content_disposition();
    (
        [
            (header::CONTENT_TYPE, download.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        download.bytes,
    )
        .into_response()
}

fn export_error(e: ExportError) -> HandlerError {
    match e {
        ExportError::Session(e) => (StatusCode::CONFLICT, e.to_string()),
        ExportError::Pdf(_) => {
            error!("Failed to build PDF: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to build the PDF document".to_string(),
            )
        }
    }
}

//=========================================================================================
// Session Handlers
//=========================================================================================

/// Start a new learner session.
#[utoipa::path(
    post,
    path = "/sessions",
    responses(
        (status = 201, description = "Session created successfully", body = CreateSessionResponse)
    )
)]
pub async fn create_session_handler(
    State(app_state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let session = app_state.open_session().await;
    let session = session.lock().await;
    info!("Created session {}", session.id());
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id: session.id(),
            created_at: session.created_at(),
        }),
    )
}

/// Generate learning content (or look up a tutorial video) from the sidebar selections.
#[utoipa::path(
    post,
    path = "/sessions/{session_id}/generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Generated content, a rejection, a failure, or a video", body = TemplateResponse),
        (status = 404, description = "Unknown session"),
        (status = 502, description = "The video search failed")
    ),
    params(("session_id" = Uuid, Path, description = "The session ID."))
)]
pub async fn generate_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<TemplateResponse>, HandlerError> {
    let session = find_session(&app_state, session_id).await?;
    let mut session = session.lock().await;

    match session.generate_from_template(req.into()).await {
        Ok(outcome) => Ok(Json(outcome.into())),
        Err(e) => {
            warn!("Template action failed for session {}: {}", session_id, e);
            Err((StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}

/// Report the response time and output length of the last template generation.
#[utoipa::path(
    get,
    path = "/sessions/{session_id}/performance",
    responses(
        (status = 200, description = "Performance of the last generation", body = PerformanceBody),
        (status = 404, description = "Unknown session, or nothing generated yet")
    ),
    params(("session_id" = Uuid, Path, description = "The session ID."))
)]
pub async fn performance_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<PerformanceBody>, HandlerError> {
    let session = find_session(&app_state, session_id).await?;
    let report = session.lock().await.performance_report();
    report.map(|r| Json(r.into())).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            "No performance data yet. Generate content first.".to_string(),
        )
    })
}

//=========================================================================================
// Custom Prompt Handlers
//=========================================================================================

/// Read the session's custom prompt.
#[utoipa::path(
    get,
    path = "/sessions/{session_id}/custom-prompt",
    responses(
        (status = 200, description = "The stored prompt", body = CustomPromptBody),
        (status = 404, description = "Unknown session")
    ),
    params(("session_id" = Uuid, Path, description = "The session ID."))
)]
pub async fn get_custom_prompt_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<CustomPromptBody>, HandlerError> {
    let session = find_session(&app_state, session_id).await?;
    let prompt = session.lock().await.custom_prompt().to_string();
    Ok(Json(CustomPromptBody { prompt }))
}

/// Replace the session's custom prompt.
#[utoipa::path(
    put,
    path = "/sessions/{session_id}/custom-prompt",
    request_body = CustomPromptBody,
    responses(
        (status = 204, description = "Prompt stored"),
        (status = 404, description = "Unknown session")
    ),
    params(("session_id" = Uuid, Path, description = "The session ID."))
)]
pub async fn set_custom_prompt_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
    Json(body): Json<CustomPromptBody>,
) -> Result<StatusCode, HandlerError> {
    let session = find_session(&app_state, session_id).await?;
    session.lock().await.set_custom_prompt(body.prompt);
    Ok(StatusCode::NO_CONTENT)
}

/// Clear the session's custom prompt.
#[utoipa::path(
    delete,
    path = "/sessions/{session_id}/custom-prompt",
    responses(
        (status = 204, description = "Prompt cleared"),
        (status = 404, description = "Unknown session")
    ),
    params(("session_id" = Uuid, Path, description = "The session ID."))
)]
pub async fn clear_custom_prompt_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, HandlerError> {
    let session = find_session(&app_state, session_id).await?;
    session.lock().await.clear_custom_prompt();
    Ok(StatusCode::NO_CONTENT)
}

/// Generate content from the stored custom prompt.
#[utoipa::path(
    post,
    path = "/sessions/{session_id}/custom-prompt/generate",
    responses(
        (status = 200, description = "Generated content, a rejection, or a failure", body = GenerationOutcomeBody),
        (status = 400, description = "The custom prompt is blank"),
        (status = 404, description = "Unknown session")
    ),
    params(("session_id" = Uuid, Path, description = "The session ID."))
)]
pub async fn generate_custom_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<GenerationOutcomeBody>, HandlerError> {
    let session = find_session(&app_state, session_id).await?;
    let mut session = session.lock().await;

    match session.generate_from_custom_prompt().await {
        Ok(result) => Ok(Json(result.into())),
        Err(e @ SessionError::BlankPrompt) => Err((StatusCode::BAD_REQUEST, e.to_string())),
        Err(e) => {
            error!("Custom prompt generation failed: {:?}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

//=========================================================================================
// Export Handlers
//=========================================================================================

/// Download the current result as a paginated PDF.
#[utoipa::path(
    get,
    path = "/sessions/{session_id}/export/pdf",
    responses(
        (status = 200, description = "The PDF document", content_type = "application/pdf"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "No successful result to export")
    ),
    params(("session_id" = Uuid, Path, description = "The session ID."))
)]
pub async fn export_pdf_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, HandlerError> {
    let session = find_session(&app_state, session_id).await?;
    let session = session.lock().await;
    let current = session
        .current()
        .ok_or_else(|| export_error(SessionError::NothingToExport.into()))?;

    let download = export::pdf_download(current, &app_state.layout).map_err(export_error)?;
    Ok(download_response(download))
}

/// Download the current result as plain text.
#[utoipa::path(
    get,
    path = "/sessions/{session_id}/export/text",
    responses(
        (status = 200, description = "The text file", content_type = "text/plain"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "No successful result to export")
    ),
    params(("session_id" = Uuid, Path, description = "The session ID."))
)]
pub async fn export_text_handler(
    State(app_state): State<Arc<AppState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, HandlerError> {
    let session = find_session(&app_state, session_id).await?;
    let session = session.lock().await;
    let current = session
        .current()
        .ok_or_else(|| export_error(SessionError::NothingToExport.into()))?;

    let download = export::text_download(current).map_err(export_error)?;
    Ok(download_response(download))
}
