//! crates/codesnack_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format.

use std::fmt;

/// The kind of learning material a learner can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    LessonPlan,
    StudyGuide,
    /// Looks up a tutorial video instead of generating text.
    Tutorial,
    QuizAnswerSheet,
    TopicSummary,
    TryItYourself,
}

impl ContentKind {
    pub const ALL: [ContentKind; 6] = [
        ContentKind::LessonPlan,
        ContentKind::StudyGuide,
        ContentKind::Tutorial,
        ContentKind::QuizAnswerSheet,
        ContentKind::TopicSummary,
        ContentKind::TryItYourself,
    ];

    /// The human-facing label, also used to name exported files.
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::LessonPlan => "Lesson Plan",
            ContentKind::StudyGuide => "Study Guide",
            ContentKind::Tutorial => "Tutorials",
            ContentKind::QuizAnswerSheet => "Quiz Answer Sheet",
            ContentKind::TopicSummary => "Topic Summary",
            ContentKind::TryItYourself => "Try it yourself",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LearnerLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for LearnerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LearnerLevel::Beginner => "Beginner",
            LearnerLevel::Intermediate => "Intermediate",
            LearnerLevel::Advanced => "Advanced",
        })
    }
}

/// A learner's request for generated content. Built per action, never stored.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub content_kind: ContentKind,
    pub topic: String,
    pub learner_level: LearnerLevel,
    pub context: Option<String>,
}

/// A token count reported by the generation service, if it reports one at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenCount {
    #[default]
    Unavailable,
    Known(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenUsage {
    pub prompt_tokens: TokenCount,
    pub completion_tokens: TokenCount,
    pub total_tokens: TokenCount,
}

impl TokenUsage {
    /// Usage for a service that does not report token accounting.
    pub fn unavailable() -> Self {
        Self::default()
    }
}

/// Successfully generated text along with its timing.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedContent {
    pub text: String,
    /// Wall-clock seconds for classification plus generation, two decimals.
    pub elapsed_seconds: f64,
    pub token_usage: TokenUsage,
}

/// The first match of a tutorial video search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoResult {
    pub url: String,
    pub title: String,
    pub thumbnail_url: String,
}

/// Timing and size of the last template generation in a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceReport {
    pub response_time_seconds: f64,
    /// Length of the generated output in characters, 0 when generation failed.
    pub content_length: usize,
}
