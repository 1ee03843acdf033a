//! crates/codesnack_core/src/generation.rs
//!
//! The two-step generation protocol: a yes/no classification of the topic,
//! then the actual content request.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::domain::{GeneratedContent, TokenUsage};
use crate::ports::TextGenerationService;
use crate::prompts::classifier_prompt;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Why a generation attempt produced no content.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// The classifier did not answer exactly "yes".
    #[error("This topic does not appear to be related to programming or software development. The classifier said: {classifier_reply}")]
    Rejected { classifier_reply: String },
    /// One of the external calls failed.
    #[error("{0}")]
    Failed(String),
}

pub type GenerationResult = Result<GeneratedContent, GenerationError>;

/// Wraps a [`TextGenerationService`] with the classification gate.
#[derive(Clone)]
pub struct ContentGenerator {
    llm: Arc<dyn TextGenerationService>,
}

impl ContentGenerator {
    pub fn new(llm: Arc<dyn TextGenerationService>) -> Self {
        Self { llm }
    }

    /// Generates content for `prompt`, or explains why not.
    ///
    /// The classification reply is trimmed and lowercased before it is compared
    /// with `"yes"`; any other reply rejects the prompt without a second call.
    pub async fn generate(&self, prompt: &str, temperature: f32) -> GenerationResult {
        let start = Instant::now();

        let reply = self
            .llm
            .complete(&classifier_prompt(prompt), None)
            .await
            .map_err(|e| GenerationError::Failed(e.to_string()))?;
        let verdict = reply.trim().to_lowercase();
        if verdict != "yes" {
            info!(classifier_reply = %verdict, "Prompt rejected by topic classifier.");
            return Err(GenerationError::Rejected {
                classifier_reply: verdict,
            });
        }

        let text = self
            .llm
            .complete(prompt, Some(temperature))
            .await
            .map_err(|e| GenerationError::Failed(e.to_string()))?;

        let elapsed_seconds = round_to_hundredths(start.elapsed().as_secs_f64());
        debug!(elapsed_seconds, chars = text.chars().count(), "Content generated.");

        Ok(GeneratedContent {
            text,
            elapsed_seconds,
            token_usage: TokenUsage::unavailable(),
        })
    }
}

pub(crate) fn round_to_hundredths(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}


#[cfg(test)]
mod tests {
    use super::test_support::ScriptedLlm;
    use super::*;
    use crate::domain::TokenCount;
    use crate::ports::PortError;

    #[tokio::test]
    async fn off_topic_prompt_is_rejected_without_generation() {
        let llm = Arc::new(ScriptedLlm::replying(&["No"]));
        let generator = ContentGenerator::new(llm.clone());

        let result = generator
            .generate("how to bake a cake", DEFAULT_TEMPERATURE)
            .await;

        assert_eq!(
            result,
            Err(GenerationError::Rejected {
                classifier_reply: "no".to_string()
            })
        );
        assert_eq!(llm.call_count(), 1);
        assert!(llm.prompts()[0].ends_with("Topic: how to bake a cake"));
    }

    #[tokio::test]
    async fn on_topic_prompt_returns_generated_text() {
        let llm = Arc::new(ScriptedLlm::replying(&["  Yes\n", "Recursion is..."]));
        let generator = ContentGenerator::new(llm.clone());

        let content = generator
            .generate("explain recursion", 0.3)
            .await
            .expect("classifier said yes");

        assert_eq!(content.text, "Recursion is...");
        assert!(content.elapsed_seconds >= 0.0);
        assert_eq!(content.token_usage.total_tokens, TokenCount::Unavailable);

        let calls = llm.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1, None);
        assert_eq!(calls[1], ("explain recursion".to_string(), Some(0.3)));
    }

    #[tokio::test]
    async fn hedged_classifier_reply_counts_as_rejection() {
        let llm = Arc::new(ScriptedLlm::replying(&["Yes, it is."]));
        let generator = ContentGenerator::new(llm.clone());

        let result = generator.generate("explain traits", 0.7).await;

        assert!(matches!(result, Err(GenerationError::Rejected { .. })));
        assert_eq!(llm.call_count(), 1);
    }

    #[tokio::test]
    async fn port_errors_become_failures() {
        let llm = Arc::new(ScriptedLlm::default());
        llm.push(Err(PortError::Request("connection refused".to_string())));
        let generator = ContentGenerator::new(llm.clone());

        match generator.generate("explain recursion", 0.7).await {
            Err(GenerationError::Failed(message)) => {
                assert!(message.contains("connection refused"))
            }
            other => panic!("expected failure, got {other:?}"),
        }

        let llm = Arc::new(ScriptedLlm::replying(&["yes"]));
        llm.push(Err(PortError::MalformedResponse("no choices".to_string())));
        let generator = ContentGenerator::new(llm.clone());
        let result = generator.generate("explain recursion", 0.7).await;
        assert!(matches!(result, Err(GenerationError::Failed(_))));
        assert_eq!(llm.call_count(), 2);
    }

    #[test]
    fn rounding_keeps_two_decimals() {
        assert_eq!(round_to_hundredths(1.23456), 1.23);
        assert_eq!(round_to_hundredths(0.005), 0.01);
        assert_eq!(round_to_hundredths(0.0), 0.0);
    }
}
