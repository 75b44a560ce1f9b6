//! Chat-completions client for the future-Earth narrative service.
//!
//! Talks to any OpenAI-compatible server (vLLM, llama.cpp, a hosted API
//! behind a proxy). The caller supplies a projected calendar year and a
//! style; the service returns one descriptive paragraph.

use crate::domain::model::NarrativeStyle;
use crate::domain::ports::{Narrator, NarrativeConfig};
use crate::utils::error::{Result, VoyageError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str =
    "You are a creative storyteller with knowledge of science and culture.";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Serialize, Debug)]
struct ChatCompletionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize, Debug)]
struct ChatMessageResponse {
    #[serde(default)]
    content: Option<String>,
    // Reasoning models leave `content` empty and answer here instead.
    #[serde(default)]
    reasoning_content: Option<String>,
}

impl ChatMessageResponse {
    fn into_content(self) -> Option<String> {
        self.content
            .filter(|s| !s.trim().is_empty())
            .or(self.reasoning_content)
            .filter(|s| !s.trim().is_empty())
    }
}

pub struct ChatNarrator {
    client: Client,
    endpoint: String,
    model: Option<String>,
    max_tokens: u32,
    temperature: f32,
}

impl ChatNarrator {
    pub fn from_config<C: NarrativeConfig>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs()))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.narrative_endpoint().trim_end_matches('/').to_string(),
            model: config.narrative_model().map(str::to_string),
            max_tokens: config.max_tokens(),
            temperature: config.temperature(),
        })
    }

    fn build_messages(year: i64, style: NarrativeStyle) -> Vec<ChatMessage> {
        let user_prompt = format!(
            "{} for what the world might be like in the year {}. Keep it to one paragraph.",
            style.instruction(),
            year
        );
        vec![
            ChatMessage {
                role: "system".to_string(),
                content: SYSTEM_PROMPT.to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: user_prompt,
            },
        ]
    }

    async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let url = format!("{}/v1/chat/completions", self.endpoint);
        tracing::debug!("Posting chat completion to {}", url);

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VoyageError::ServiceError {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.into_content())
            .map(|text| text.trim().to_string())
            .ok_or(VoyageError::EmptyNarrative)
    }

    /// True when the server answers its models listing.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/v1/models", self.endpoint);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl Narrator for ChatNarrator {
    async fn describe_future(&self, year: i64, style: NarrativeStyle) -> Result<String> {
        self.chat_completion(Self::build_messages(year, style)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct TestConfig {
        endpoint: String,
    }

    impl NarrativeConfig for TestConfig {
        fn narrative_endpoint(&self) -> &str {
            &self.endpoint
        }

        fn narrative_model(&self) -> Option<&str> {
            Some("test-model")
        }

        fn request_timeout_secs(&self) -> u64 {
            5
        }

        fn max_tokens(&self) -> u32 {
            256
        }

        fn temperature(&self) -> f32 {
            0.8
        }
    }

    fn narrator_for(server: &MockServer) -> ChatNarrator {
        ChatNarrator::from_config(&TestConfig {
            endpoint: server.base_url(),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_describe_future_parses_first_choice() {
        let server = MockServer::start();
        let chat_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .json_body_partial(r#"{"model": "test-model"}"#);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "choices": [
                        {"message": {"role": "assistant", "content": "  Earth thrives.  "}}
                    ]
                }));
        });

        let narrator = narrator_for(&server);
        let text = narrator
            .describe_future(2524, NarrativeStyle::Realistic)
            .await
            .unwrap();

        chat_mock.assert();
        assert_eq!(text, "Earth thrives.");
    }

    #[tokio::test]
    async fn test_describe_future_sends_year_and_style() {
        let server = MockServer::start();
        let chat_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .body_contains("the year 3024")
                .body_contains("science fiction");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "choices": [{"message": {"content": "Starships everywhere."}}]
                }));
        });

        let narrator = narrator_for(&server);
        narrator
            .describe_future(3024, NarrativeStyle::Scifi)
            .await
            .unwrap();

        chat_mock.assert();
    }

    #[tokio::test]
    async fn test_describe_future_surfaces_service_errors() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(500).body("model exploded");
        });

        let narrator = narrator_for(&server);
        let err = narrator
            .describe_future(2100, NarrativeStyle::Neutral)
            .await
            .unwrap_err();

        match err {
            VoyageError::ServiceError { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("model exploded"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_describe_future_empty_choices_is_typed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"choices": []}));
        });

        let narrator = narrator_for(&server);
        let err = narrator
            .describe_future(2100, NarrativeStyle::Neutral)
            .await
            .unwrap_err();

        assert!(matches!(err, VoyageError::EmptyNarrative));
    }

    #[tokio::test]
    async fn test_reasoning_content_fallback() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "choices": [
                        {"message": {"content": "", "reasoning_content": "From the reasoning field."}}
                    ]
                }));
        });

        let narrator = narrator_for(&server);
        let text = narrator
            .describe_future(2100, NarrativeStyle::Neutral)
            .await
            .unwrap();

        assert_eq!(text, "From the reasoning field.");
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start();
        let models_mock = server.mock(|when, then| {
            when.method(GET).path("/v1/models");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"data": []}));
        });

        let narrator = narrator_for(&server);
        assert!(narrator.health_check().await);
        models_mock.assert();
    }
}
