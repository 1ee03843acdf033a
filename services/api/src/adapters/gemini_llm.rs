//! services/api/src/adapters/gemini_llm.rs
//!
//! This module contains the adapter for the text-generation LLM. Gemini is
//! reached through its OpenAI-compatible endpoint, so the regular OpenAI client
//! is pointed at a different base URL.
//! It implements the `TextGenerationService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use codesnack_core::ports::{PortError, PortResult, TextGenerationService};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TextGenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct GeminiTextAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl GeminiTextAdapter {
    /// Creates a new `GeminiTextAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// Builds the OpenAI-compatible client for the given endpoint and key.
    pub fn client_for(api_base: &str, api_key: &str) -> Client<OpenAIConfig> {
        let config = OpenAIConfig::new()
            .with_api_base(api_base)
            .with_api_key(api_key);
        Client::with_config(config)
    }
}

//=========================================================================================
// `TextGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TextGenerationService for GeminiTextAdapter {
    /// Sends the prompt as a single user message and returns the first choice.
    async fn complete(&self, prompt: &str, temperature: Option<f32>) -> PortResult<String> {
        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        let messages: Vec<ChatCompletionRequestMessage> = vec![user_message.into()];

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model).messages(messages).n(1);
        if let Some(temperature) = temperature {
            args.temperature(temperature);
        }
        let request = args
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        debug!(model = %self.model, ?temperature, "Sending completion request.");
        // Map the error manually, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Request(e.to_string()))?;

        // Extract the text content from the first choice in the response.
        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(content)
            } else {
                Err(PortError::MalformedResponse(
                    "LLM response contained no text content.".to_string(),
                ))
            }
        } else {
            Err(PortError::MalformedResponse(
                "LLM returned no choices in its response.".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "gemini-1.5-flash",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    fn adapter(server: &MockServer) -> GeminiTextAdapter {
        GeminiTextAdapter::new(
            GeminiTextAdapter::client_for(&server.uri(), "test-key"),
            "gemini-1.5-flash".to_string(),
        )
    }

    #[tokio::test]
    async fn returns_first_choice_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({ "model": "gemini-1.5-flash", "temperature": 0.5 })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("Ownership means...")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let text = adapter(&server)
            .complete("explain ownership", Some(0.5))
            .await
            .unwrap();

        assert_eq!(text, "Ownership means...");
    }

    #[tokio::test]
    async fn rejected_requests_become_port_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "error": {
                    "message": "API key not valid",
                    "type": "invalid_request_error",
                    "param": null,
                    "code": null
                }
            })))
            .mount(&server)
            .await;

        let result = adapter(&server).complete("explain ownership", None).await;

        assert!(matches!(result, Err(PortError::Request(_))));
    }

    #[tokio::test]
    async fn empty_choice_list_is_malformed() {
        let server = MockServer::start().await;
        let mut body = completion("unused");
        body["choices"] = json!([]);
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let result = adapter(&server).complete("explain ownership", None).await;

        assert!(matches!(result, Err(PortError::MalformedResponse(_))));
    }
}
