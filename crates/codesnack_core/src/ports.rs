//! crates/codesnack_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the concrete text-generation and video-search providers.

use async_trait::async_trait;

use crate::domain::VideoResult;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g. network, auth).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Request to external service failed: {0}")]
    Request(String),
    #[error("External service returned a malformed response: {0}")]
    MalformedResponse(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait TextGenerationService: Send + Sync {
    /// Sends a single prompt and returns the generated text.
    ///
    /// `temperature` is left to the provider default when `None`.
    async fn complete(&self, prompt: &str, temperature: Option<f32>) -> PortResult<String>;
}

#[async_trait]
pub trait VideoSearchService: Send + Sync {
    /// Returns the first video matching `query`, or `None` when nothing matches.
    async fn search_first_video(&self, query: &str) -> PortResult<Option<VideoResult>>;
}
