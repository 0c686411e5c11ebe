//! Completion gateway: one chat turn in, displayable text out.

use std::sync::Arc;

use log::{error, warn};

use crate::content::ContentProvider;
use crate::error::BotError;
use crate::openrouter::CompletionService;
use crate::types::ConversationEntry;

/// Wraps a [`CompletionService`] so callers always get text to show.
pub struct CompletionGateway {
    service: Arc<dyn CompletionService>,
    content: Arc<dyn ContentProvider>,
}

impl CompletionGateway {
    pub fn new(service: Arc<dyn CompletionService>, content: Arc<dyn ContentProvider>) -> Self {
        Self { service, content }
    }

    /// Run one completion with the system prompt prepended to `history`.
    ///
    /// Failures are logged and turned into an apology for the user.
    pub async fn complete(
        &self,
        system_prompt: &str,
        history: &[ConversationEntry],
        user_tag: &str,
    ) -> String {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ConversationEntry::system(system_prompt));
        messages.extend_from_slice(history);

        match self.service.chat(&messages, user_tag).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!("Completion for user {user_tag} came back empty");
                self.content.apology()
            }
            Err(e @ BotError::OpenRouterApi { .. }) => {
                warn!("Completion for user {user_tag} rejected: {e}");
                upstream_apology(&e)
            }
            Err(e) => {
                error!("Completion failed for user {user_tag}: {e}");
                self.content.apology()
            }
        }
    }
}

/// Friendly explanation for the status plus the upstream detail, cut to 300 chars.
fn upstream_apology(error: &BotError) -> String {
    let detail = match error {
        BotError::OpenRouterApi { status, message } => {
            let message: String = message.trim().chars().take(300).collect();
            format!("{status}: {message}")
        }
        other => other.to_string(),
    };
    format!("🤖💥 {}\n> {detail}", error.user_message())
}


#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::fake::{FakeService, FixedContent, Reply};
    use super::*;

    fn gateway(service: Arc<FakeService>) -> CompletionGateway {
        CompletionGateway::new(service, Arc::new(FixedContent))
    }

    #[tokio::test]
    async fn prepends_system_prompt_and_trims() {
        let service = FakeService::new(Reply::Text("  hello there \n"));
        let history = vec![ConversationEntry::user("Sam: hi")];

        let text = gateway(service.clone())
            .complete("persona", &history, "99")
            .await;

        assert_eq!(text, "hello there");
        let seen = service.seen.lock().unwrap();
        let (messages, tag) = &seen[0];
        assert_eq!(tag, "99");
        assert_eq!(messages[0], ConversationEntry::system("persona"));
        assert_eq!(messages[1], ConversationEntry::user("Sam: hi"));
    }

    #[tokio::test]
    async fn upstream_error_explains_status_and_detail() {
        let text = gateway(FakeService::new(Reply::Upstream(StatusCode::TOO_MANY_REQUESTS)))
            .complete("persona", &[], "1")
            .await;

        assert!(text.contains("rate limit"), "{text}");
        assert!(text.contains("429"), "{text}");
        assert!(text.contains("quota exceeded"), "{text}");
    }

    #[tokio::test]
    async fn upstream_auth_failure_points_at_administrator() {
        let text = gateway(FakeService::new(Reply::Upstream(StatusCode::UNAUTHORIZED)))
            .complete("persona", &[], "1")
            .await;

        assert!(text.contains("authentication issues"), "{text}");
        assert!(text.contains("401"), "{text}");
    }

    #[tokio::test]
    async fn blank_completion_uses_apology() {
        let text = gateway(FakeService::new(Reply::Text("   ")))
            .complete("persona", &[], "1")
            .await;

        assert_eq!(text, "sorry!");
    }

    #[tokio::test]
    async fn unknown_error_uses_apology() {
        let text = gateway(FakeService::new(Reply::Broken))
            .complete("persona", &[], "1")
            .await;

        assert_eq!(text, "sorry!");
    }
}
