use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};
use crate::types::ConversationEntry;

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Model used for every chat turn.
pub const MODEL: &str = "openai/gpt-3.5-turbo";

// Roughly 1 token ≈ 4 characters, so 500 tokens fits in one Discord message
// most of the time; longer replies are chunked before sending.
pub const MAX_TOKENS: u32 = 500;

pub const TEMPERATURE: f64 = 0.9;

#[derive(Debug, Serialize)]
struct OpenRouterRequest<'a> {
    model: &'a str,
    messages: &'a [ConversationEntry],
    max_tokens: u32,
    temperature: f64,
    /// End-user correlation tag.
    user: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenRouterResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// A stateless chat completion backend.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Send the full message list and return the first choice's text.
    async fn chat(&self, messages: &[ConversationEntry], user_tag: &str) -> Result<String>;
}

pub struct OpenRouterClient {
    api_key: String,
    client: reqwest::Client,
}

impl OpenRouterClient {
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl CompletionService for OpenRouterClient {
    async fn chat(&self, messages: &[ConversationEntry], user_tag: &str) -> Result<String> {
        debug!(
            "Sending request to OpenRouter API with {} messages",
            messages.len()
        );

        let request = OpenRouterRequest {
            model: MODEL,
            messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            user: user_tag,
        };

        let response = self
            .client
            .post(OPENROUTER_API_URL)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response: {e}"));
            return Err(BotError::OpenRouterApi { status, message });
        }

        let api_response: OpenRouterResponse = response.json().await?;

        let reply = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BotError::OpenRouterResponse("No choices in response".to_string()))?
            .message
            .content
            .unwrap_or_default();

        debug!("Received response from OpenRouter API");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_fixed_sampling_settings() {
        let messages = vec![
            ConversationEntry::system("be nice"),
            ConversationEntry::user("Sam: hi"),
        ];
        let request = OpenRouterRequest {
            model: MODEL,
            messages: &messages,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            user: "1234",
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], MODEL);
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["user"], "1234");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Sam: hi");
    }

    #[test]
    fn response_takes_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":" hey "}},{"message":{"content":"no"}}]}"#;
        let parsed: OpenRouterResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some(" hey ")
        );
    }
}
