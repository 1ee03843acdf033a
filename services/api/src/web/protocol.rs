//! services/api/src/web/protocol.rs
//!
//! Defines the JSON bodies exchanged between the browser client and the API
//! server, and their conversions to and from the core domain types.

use chrono::{DateTime, Utc};
use codesnack_core::{
    domain::{
        ContentKind, GenerationRequest, LearnerLevel, PerformanceReport, TokenCount, TokenUsage,
        VideoResult,
    },
    generation::{GenerationError, GenerationResult},
    practice::PracticeActivity,
    session::TemplateOutcome,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

//=========================================================================================
// Messages Sent FROM the Client (Browser) TO the Server
//=========================================================================================

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ContentKindDto {
    LessonPlan,
    StudyGuide,
    Tutorial,
    QuizAnswerSheet,
    TopicSummary,
    TryItYourself,
}

impl From<ContentKindDto> for ContentKind {
    fn from(kind: ContentKindDto) -> Self {
        match kind {
            ContentKindDto::LessonPlan => ContentKind::LessonPlan,
            ContentKindDto::StudyGuide => ContentKind::StudyGuide,
            ContentKindDto::Tutorial => ContentKind::Tutorial,
            ContentKindDto::QuizAnswerSheet => ContentKind::QuizAnswerSheet,
            ContentKindDto::TopicSummary => ContentKind::TopicSummary,
            ContentKindDto::TryItYourself => ContentKind::TryItYourself,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LearnerLevelDto {
    Beginner,
    Intermediate,
    Advanced,
}

impl From<LearnerLevelDto> for LearnerLevel {
    fn from(level: LearnerLevelDto) -> Self {
        match level {
            LearnerLevelDto::Beginner => LearnerLevel::Beginner,
            LearnerLevelDto::Intermediate => LearnerLevel::Intermediate,
            LearnerLevelDto::Advanced => LearnerLevel::Advanced,
        }
    }
}

/// The sidebar selections for a content request.
#[derive(Deserialize, Debug, ToSchema)]
pub struct GenerateRequest {
    pub content_kind: ContentKindDto,
    pub topic: String,
    pub learner_level: LearnerLevelDto,
    #[serde(default)]
    pub context: Option<String>,
}

impl From<GenerateRequest> for GenerationRequest {
    fn from(req: GenerateRequest) -> Self {
        GenerationRequest {
            content_kind: req.content_kind.into(),
            topic: req.topic,
            learner_level: req.learner_level.into(),
            context: req.context,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct CustomPromptBody {
    pub prompt: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct CodeBody {
    pub code: String,
}

//=========================================================================================
// Messages Sent FROM the Server TO the Client (Browser)
//=========================================================================================

#[derive(Serialize, Debug, ToSchema)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A token count, or an explicit marker that the service does not report it.
#[derive(Serialize, Debug, PartialEq, Eq, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TokenCountBody {
    Unavailable,
    Known { value: u64 },
}

impl From<TokenCount> for TokenCountBody {
    fn from(count: TokenCount) -> Self {
        match count {
            TokenCount::Unavailable => TokenCountBody::Unavailable,
            TokenCount::Known(value) => TokenCountBody::Known { value },
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct TokenUsageBody {
    pub prompt_tokens: TokenCountBody,
    pub completion_tokens: TokenCountBody,
    pub total_tokens: TokenCountBody,
}

impl From<TokenUsage> for TokenUsageBody {
    fn from(usage: TokenUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens.into(),
            completion_tokens: usage.completion_tokens.into(),
            total_tokens: usage.total_tokens.into(),
        }
    }
}

/// The outcome of one generation attempt. Rejections and failures are normal
/// outcomes the client shows inline, not transport errors.
#[derive(Serialize, Debug, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationOutcomeBody {
    Ok {
        text: String,
        elapsed_seconds: f64,
        token_usage: TokenUsageBody,
    },
    Rejected {
        message: String,
        classifier_reply: String,
    },
    Failed {
        message: String,
    },
}

impl From<GenerationResult> for GenerationOutcomeBody {
    fn from(result: GenerationResult) -> Self {
        match result {
            Ok(content) => GenerationOutcomeBody::Ok {
                text: content.text,
                elapsed_seconds: content.elapsed_seconds,
                token_usage: content.token_usage.into(),
            },
            Err(err) => {
                let message = err.to_string();
                match err {
                    GenerationError::Rejected { classifier_reply } => {
                        GenerationOutcomeBody::Rejected {
                            message,
                            classifier_reply,
                        }
                    }
                    GenerationError::Failed(_) => GenerationOutcomeBody::Failed { message },
                }
            }
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct VideoBody {
    pub url: String,
    pub title: String,
    pub thumbnail_url: String,
}

impl From<VideoResult> for VideoBody {
    fn from(video: VideoResult) -> Self {
        Self {
            url: video.url,
            title: video.title,
            thumbnail_url: video.thumbnail_url,
        }
    }
}

pub const NO_VIDEO_NOTICE: &str = "No tutorial video found for this topic.";

#[derive(Serialize, Debug, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TemplateResponse {
    /// Tutorial lookups; `video` is absent when the search matched nothing.
    Video {
        video: Option<VideoBody>,
        notice: Option<String>,
    },
    Generated {
        prompt: String,
        outcome: GenerationOutcomeBody,
    },
}

impl From<TemplateOutcome> for TemplateResponse {
    fn from(outcome: TemplateOutcome) -> Self {
        match outcome {
            TemplateOutcome::Video(Some(video)) => TemplateResponse::Video {
                video: Some(video.into()),
                notice: None,
            },
            TemplateOutcome::Video(None) => TemplateResponse::Video {
                video: None,
                notice: Some(NO_VIDEO_NOTICE.to_string()),
            },
            TemplateOutcome::Generated { prompt, result } => TemplateResponse::Generated {
                prompt,
                outcome: result.into(),
            },
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct PerformanceBody {
    pub response_time_seconds: f64,
    pub content_length: usize,
}

impl From<PerformanceReport> for PerformanceBody {
    fn from(report: PerformanceReport) -> Self {
        Self {
            response_time_seconds: report.response_time_seconds,
            content_length: report.content_length,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ActivityBody {
    pub name: String,
    pub starter_code: String,
}

impl From<PracticeActivity> for ActivityBody {
    fn from(activity: PracticeActivity) -> Self {
        Self {
            name: activity.name().to_string(),
            starter_code: activity.starter_code().to_string(),
        }
    }
}
