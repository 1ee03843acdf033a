pub mod domain;
pub mod emphasis;
pub mod generation;
pub mod layout;
pub mod ports;
pub mod practice;
pub mod prompts;
pub mod session;

pub use domain::{
    ContentKind, GeneratedContent, GenerationRequest, LearnerLevel, PerformanceReport, TokenCount,
    TokenUsage, VideoResult,
};
pub use emphasis::strip_emphasis;
pub use generation::{ContentGenerator, GenerationError, GenerationResult, DEFAULT_TEMPERATURE};
pub use layout::{paginate, LayoutOptions, PageLayout};
pub use ports::{PortError, PortResult, TextGenerationService, VideoSearchService};
pub use practice::{sandbox_preview, PracticeActivity};
pub use session::{CurrentResult, ResultSource, SessionController, SessionError, TemplateOutcome};
