//! crates/codesnack_core/src/session.rs
//!
//! The per-session controller. It owns everything a learner's session
//! remembers between actions and is the only way to change it.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::{ContentKind, GenerationRequest, PerformanceReport, VideoResult};
use crate::emphasis::strip_emphasis;
use crate::generation::{round_to_hundredths, ContentGenerator, GenerationResult};
use crate::ports::{PortError, VideoSearchService};
use crate::prompts::{build_content_prompt, practice_help_prompt};

const CUSTOM_OUTPUT_STEM: &str = "custom_prompt_output";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Please enter a valid prompt before generating.")]
    BlankPrompt,
    #[error("There is no generated content to export yet.")]
    NothingToExport,
    #[error("Video lookup failed: {0}")]
    VideoLookup(#[from] PortError),
}

/// Where the current result came from; decides the export file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultSource {
    Template { kind: ContentKind, topic: String },
    CustomPrompt,
}

/// The one generation result a session remembers.
#[derive(Debug, Clone)]
pub struct CurrentResult {
    pub source: ResultSource,
    pub result: GenerationResult,
}

impl CurrentResult {
    /// File name without extension for downloads of this result.
    pub fn file_stem(&self) -> String {
        match &self.source {
            ResultSource::Template { kind, topic } => format!("{}_{}", kind.label(), topic),
            ResultSource::CustomPrompt => CUSTOM_OUTPUT_STEM.to_string(),
        }
    }

    /// The emphasis-free text to export, if the generation succeeded.
    pub fn export_text(&self) -> Result<String, SessionError> {
        match &self.result {
            Ok(content) => Ok(strip_emphasis(&content.text)),
            Err(_) => Err(SessionError::NothingToExport),
        }
    }
}

/// What a template action produced.
#[derive(Debug, Clone)]
pub enum TemplateOutcome {
    /// Tutorial requests look up a video; `None` when nothing matched.
    Video(Option<VideoResult>),
    /// Text requests carry the prompt that was sent and the cleaned result.
    Generated {
        prompt: String,
        result: GenerationResult,
    },
}

#[derive(Debug, Default)]
struct SessionState {
    current: Option<CurrentResult>,
    performance: Option<PerformanceReport>,
    custom_prompt: String,
}

pub struct SessionController {
    id: Uuid,
    created_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
    generator: ContentGenerator,
    videos: Arc<dyn VideoSearchService>,
    temperature: f32,
    state: SessionState,
}

impl SessionController {
    pub fn new(
        generator: ContentGenerator,
        videos: Arc<dyn VideoSearchService>,
        temperature: f32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            last_active_at: now,
            generator,
            videos,
            temperature,
            state: SessionState::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_active_at(&self) -> DateTime<Utc> {
        self.last_active_at
    }

    pub fn current(&self) -> Option<&CurrentResult> {
        self.state.current.as_ref()
    }

    pub fn performance_report(&self) -> Option<PerformanceReport> {
        self.state.performance
    }

    pub fn custom_prompt(&self) -> &str {
        &self.state.custom_prompt
    }

    pub fn set_custom_prompt(&mut self, prompt: impl Into<String>) {
        self.touch();
        self.state.custom_prompt = prompt.into();
    }

    pub fn clear_custom_prompt(&mut self) {
        self.touch();
        self.state.custom_prompt.clear();
    }

    /// Handles the sidebar "generate" action.
    pub async fn generate_from_template(
        &mut self,
        request: GenerationRequest,
    ) -> Result<TemplateOutcome, SessionError> {
        self.touch();
        let Some(prompt) = build_content_prompt(
            request.content_kind,
            &request.topic,
            request.learner_level,
            request.context.as_deref(),
        ) else {
            info!(session_id = %self.id, topic = %request.topic, "Looking up tutorial video.");
            let video = self.videos.search_first_video(&request.topic).await?;
            return Ok(TemplateOutcome::Video(video));
        };

        info!(session_id = %self.id, kind = %request.content_kind, "Generating template content.");
        let start = Instant::now();
        let result = self.generator.generate(&prompt, self.temperature).await;
        let response_time_seconds = round_to_hundredths(start.elapsed().as_secs_f64());

        self.state.performance = Some(PerformanceReport {
            response_time_seconds,
            content_length: result
                .as_ref()
                .map(|content| content.text.chars().count())
                .unwrap_or(0),
        });
        self.state.current = Some(CurrentResult {
            source: ResultSource::Template {
                kind: request.content_kind,
                topic: request.topic,
            },
            result: result.clone(),
        });

        let cleaned = result.map(|mut content| {
            content.text = strip_emphasis(&content.text);
            content
        });
        Ok(TemplateOutcome::Generated {
            prompt,
            result: cleaned,
        })
    }

    /// Handles the "start generating" action for the stored custom prompt.
    pub async fn generate_from_custom_prompt(&mut self) -> Result<GenerationResult, SessionError> {
        self.touch();
        if self.state.custom_prompt.trim().is_empty() {
            return Err(SessionError::BlankPrompt);
        }

        info!(session_id = %self.id, "Generating custom prompt content.");
        let result = self
            .generator
            .generate(&self.state.custom_prompt, self.temperature)
            .await;
        self.state.current = Some(CurrentResult {
            source: ResultSource::CustomPrompt,
            result: result.clone(),
        });
        Ok(result)
    }

    /// Asks for an explanation of a practice snippet. Leaves the current result alone.
    pub async fn request_practice_help(&mut self, code: &str) -> GenerationResult {
        self.touch();
        debug!(session_id = %self.id, "Requesting practice help.");
        self.generator
            .generate(&practice_help_prompt(code), self.temperature)
            .await
    }

    fn touch(&mut self) {
        self.last_active_at = Utc::now();
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::VideoResult;
    use crate::ports::{PortResult, VideoSearchService};

    #[derive(Default)]
    pub struct FixedVideos {
        pub result: Option<VideoResult>,
        pub queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl VideoSearchService for FixedVideos {
        async fn search_first_video(&self, query: &str) -> PortResult<Option<VideoResult>> {
            self.queries.lock().unwrap().push(query.to_string());
            Ok(self.result.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::FixedVideos;
    use super::*;
    use crate::domain::LearnerLevel;
    use crate::generation::test_support::ScriptedLlm;
    use crate::generation::{GenerationError, DEFAULT_TEMPERATURE};

    fn controller(llm: Arc<ScriptedLlm>, videos: Arc<FixedVideos>) -> SessionController {
        SessionController::new(ContentGenerator::new(llm), videos, DEFAULT_TEMPERATURE)
    }

    fn request(kind: ContentKind, topic: &str) -> GenerationRequest {
        GenerationRequest {
            content_kind: kind,
            topic: topic.to_string(),
            learner_level: LearnerLevel::Beginner,
            context: None,
        }
    }

    #[tokio::test]
    async fn tutorial_requests_search_videos_only() {
        let llm = Arc::new(ScriptedLlm::default());
        let videos = Arc::new(FixedVideos {
            result: Some(VideoResult {
                url: "https://www.youtube.com/watch?v=abc".to_string(),
                title: "Closures in 10 minutes".to_string(),
                thumbnail_url: "https://i.ytimg.com/vi/abc/default.jpg".to_string(),
            }),
            ..Default::default()
        });
        let mut session = controller(llm.clone(), videos.clone());

        let outcome = session
            .generate_from_template(request(ContentKind::Tutorial, "rust closures"))
            .await
            .unwrap();

        match outcome {
            TemplateOutcome::Video(Some(video)) => assert_eq!(video.title, "Closures in 10 minutes"),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(llm.call_count(), 0);
        assert_eq!(*videos.queries.lock().unwrap(), vec!["rust closures".to_string()]);
        assert!(session.current().is_none());
        assert!(session.performance_report().is_none());
    }

    #[tokio::test]
    async fn template_generation_stores_cleaned_result_and_report() {
        let llm = Arc::new(ScriptedLlm::replying(&["yes", "**Goal**: learn *git*"]));
        let mut session = controller(llm.clone(), Arc::new(FixedVideos::default()));

        let outcome = session
            .generate_from_template(request(ContentKind::StudyGuide, "git"))
            .await
            .unwrap();

        let TemplateOutcome::Generated { prompt, result } = outcome else {
            panic!("expected generated content");
        };
        assert!(prompt.contains("'git'"));
        assert_eq!(result.unwrap().text, "Goal: learn git");

        let report = session.performance_report().unwrap();
        assert_eq!(report.content_length, "**Goal**: learn *git*".chars().count());
        assert!(report.response_time_seconds >= 0.0);

        let current = session.current().unwrap();
        assert_eq!(current.file_stem(), "Study Guide_git");
        assert_eq!(current.export_text().unwrap(), "Goal: learn git");
    }

    #[tokio::test]
    async fn rejected_generation_reports_zero_length() {
        let llm = Arc::new(ScriptedLlm::replying(&["no"]));
        let mut session = controller(llm, Arc::new(FixedVideos::default()));

        session
            .generate_from_template(request(ContentKind::TopicSummary, "baking"))
            .await
            .unwrap();

        assert_eq!(session.performance_report().unwrap().content_length, 0);
        let current = session.current().unwrap();
        assert!(matches!(current.result, Err(GenerationError::Rejected { .. })));
        assert!(matches!(
            current.export_text(),
            Err(SessionError::NothingToExport)
        ));
    }

    #[tokio::test]
    async fn blank_custom_prompt_never_calls_the_service() {
        let llm = Arc::new(ScriptedLlm::default());
        let mut session = controller(llm.clone(), Arc::new(FixedVideos::default()));

        session.set_custom_prompt("   \n\t");
        let result = session.generate_from_custom_prompt().await;

        assert!(matches!(result, Err(SessionError::BlankPrompt)));
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn new_generation_replaces_the_current_result() {
        let llm = Arc::new(ScriptedLlm::replying(&["yes", "first", "yes", "second"]));
        let mut session = controller(llm, Arc::new(FixedVideos::default()));

        session
            .generate_from_template(request(ContentKind::LessonPlan, "loops"))
            .await
            .unwrap();
        session.set_custom_prompt("explain iterators");
        let custom = session.generate_from_custom_prompt().await.unwrap();

        assert_eq!(custom.unwrap().text, "second");
        let current = session.current().unwrap();
        assert_eq!(current.source, ResultSource::CustomPrompt);
        assert_eq!(current.file_stem(), "custom_prompt_output");
        assert_eq!(session.custom_prompt(), "explain iterators");

        session.clear_custom_prompt();
        assert_eq!(session.custom_prompt(), "");
    }

    #[tokio::test]
    async fn practice_help_leaves_current_result_untouched() {
        let llm = Arc::new(ScriptedLlm::replying(&["yes", "Looks good"]));
        let mut session = controller(llm.clone(), Arc::new(FixedVideos::default()));

        let help = session.request_practice_help("<p>hi</p>").await.unwrap();

        assert_eq!(help.text, "Looks good");
        assert!(session.current().is_none());
        assert!(llm.prompts()[1].ends_with("<p>hi</p>"));
    }
}
