pub mod practice;
pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

// Re-export the handlers so the binary and tests can reach them directly.
pub use practice::{list_activities_handler, practice_help_handler, preview_handler};
pub use rest::{
    clear_custom_prompt_handler, create_session_handler, export_pdf_handler, export_text_handler,
    generate_custom_handler, generate_handler, get_custom_prompt_handler, performance_handler,
    set_custom_prompt_handler,
};
use state::AppState;

/// Builds the API router. CORS and the Swagger UI are layered on by the binary.
pub fn router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/sessions", post(create_session_handler))
        .route("/sessions/{session_id}/generate", post(generate_handler))
        .route("/sessions/{session_id}/performance", get(performance_handler))
        .route(
            "/sessions/{session_id}/custom-prompt",
            get(get_custom_prompt_handler)
                .put(set_custom_prompt_handler)
                .delete(clear_custom_prompt_handler),
        )
        .route(
            "/sessions/{session_id}/custom-prompt/generate",
            post(generate_custom_handler),
        )
        .route("/sessions/{session_id}/export/pdf", get(export_pdf_handler))
        .route("/sessions/{session_id}/export/text", get(export_text_handler))
        .route(
            "/sessions/{session_id}/practice/help",
            post(practice_help_handler),
        )
        .route("/practice/activities", get(list_activities_handler))
        .route("/practice/preview", post(preview_handler))
        .with_state(app_state)
}
