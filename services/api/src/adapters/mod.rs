pub mod gemini_llm;
pub mod youtube;

pub use gemini_llm::GeminiTextAdapter;
pub use youtube::YouTubeSearchAdapter;
