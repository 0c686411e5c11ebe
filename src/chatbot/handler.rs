//! One chat turn against the channel's conversation context.

use log::debug;
use poise::serenity_prelude::{ChannelId, UserId};

use crate::bot::{Context, Data};
use crate::types::ConversationEntry;

/// Server nickname if the author is a member, otherwise their global name.
pub async fn author_display_name(ctx: Context<'_>) -> String {
    match ctx.author_member().await {
        Some(member) => member.display_name().to_string(),
        None => ctx.author().display_name().to_string(),
    }
}

/// Run a chat turn for the invoking author in the invoking channel.
pub async fn chat_turn(ctx: Context<'_>, message: &str) -> String {
    let channel_id = ctx.channel_id();
    let platform_name = author_display_name(ctx).await;

    if let Err(e) = channel_id.broadcast_typing(ctx.http()).await {
        debug!("Failed to broadcast typing indicator: {e}");
    }

    converse(ctx.data(), channel_id, ctx.author().id, &platform_name, message).await
}

/// Record the author's message, ask the model, record and return its reply.
///
/// The persona is resolved fresh for every turn. Locks are released before
/// the completion request is awaited.
pub async fn converse(
    data: &Data,
    channel_id: ChannelId,
    author_id: UserId,
    platform_name: &str,
    message: &str,
) -> String {
    let (display_name, system_prompt) = {
        let personas = data.personas().read().await;
        (
            personas.display_name(author_id, platform_name),
            personas.resolve(channel_id, author_id, platform_name),
        )
    };

    let history = {
        let mut conversations = data.conversations().write().await;
        conversations.append(
            channel_id,
            ConversationEntry::user(format!("{display_name}: {message}")),
        );
        conversations.get(channel_id)
    };
    debug!(
        "Conversation history for channel {channel_id} has {} messages",
        history.len()
    );

    let reply = data
        .gateway()
        .complete(&system_prompt, &history, &author_id.to_string())
        .await;

    data.conversations()
        .write()
        .await
        .append(channel_id, ConversationEntry::assistant(reply.clone()));

    reply
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex, OnceLock, Weak};

    use async_trait::async_trait;

    use super::*;
    use crate::chatbot::gateway::fake::{FakeService, FixedContent, Reply};
    use crate::chatbot::{CompletionGateway, MAX_CONTEXT_ENTRIES};
    use crate::error::Result;
    use crate::openrouter::CompletionService;
    use crate::persona::system_prompt;
    use crate::relay::NotificationRelay;
    use crate::types::MessageRole;

    const CHANNEL: ChannelId = ChannelId::new(10);
    const SAM: UserId = UserId::new(20);

    fn data(service: Arc<dyn CompletionService>) -> Data {
        let content = Arc::new(FixedContent);
        Data::new(
            CompletionGateway::new(service, content.clone()),
            NotificationRelay::new(None),
            content,
        )
    }

    #[tokio::test]
    async fn records_both_sides_of_the_turn() {
        let service = FakeService::new(Reply::Text(" 42, obviously "));
        let data = data(service.clone());

        let reply = converse(&data, CHANNEL, SAM, "sam", "what is the answer?").await;

        assert_eq!(reply, "42, obviously");
        let history = data.conversations().read().await.get(CHANNEL);
        assert_eq!(
            history,
            vec![
                ConversationEntry::user("sam: what is the answer?"),
                ConversationEntry::assistant("42, obviously"),
            ]
        );
        assert_eq!(service.seen.lock().unwrap()[0].1, "20");
    }

    #[tokio::test]
    async fn persona_changes_apply_to_the_next_turn() {
        let service = FakeService::new(Reply::Text("ok"));
        let data = data(service.clone());

        converse(&data, CHANNEL, SAM, "sam", "first").await;
        {
            let mut personas = data.personas().write().await;
            personas.toggle_roast_mode(CHANNEL);
            personas.set_nickname(SAM, "Captain").unwrap();
        }
        converse(&data, CHANNEL, SAM, "sam", "second").await;

        assert_eq!(
            service.system_prompts(),
            vec![system_prompt(false, "sam"), system_prompt(true, "Captain")]
        );
        let history = data.conversations().read().await.get(CHANNEL);
        assert_eq!(history[2], ConversationEntry::user("Captain: second"));
    }

    #[tokio::test]
    async fn history_stays_capped_across_turns() {
        let service = FakeService::new(Reply::Text("sure"));
        let data = data(service.clone());

        for turn in 0..8 {
            converse(&data, CHANNEL, SAM, "sam", &format!("question {turn}")).await;
        }

        let history = data.conversations().read().await.get(CHANNEL);
        assert_eq!(history.len(), MAX_CONTEXT_ENTRIES);
        assert_eq!(history[0], ConversationEntry::user("sam: question 3"));
        assert_eq!(history[9].role, MessageRole::Assistant);

        // system prompt plus at most the capped history
        let seen = service.seen.lock().unwrap();
        assert!(seen.iter().all(|(messages, _)| messages.len() <= MAX_CONTEXT_ENTRIES + 1));
    }

    #[tokio::test]
    async fn failed_completion_is_still_recorded() {
        let data = data(FakeService::new(Reply::Broken));

        let reply = converse(&data, CHANNEL, SAM, "sam", "hello?").await;

        assert_eq!(reply, "sorry!");
        let history = data.conversations().read().await.get(CHANNEL);
        assert_eq!(history[1], ConversationEntry::assistant("sorry!"));
    }

    /// Records whether the shared state was free while a completion ran.
    #[derive(Default)]
    struct LockWatcher {
        data: OnceLock<Weak<Data>>,
        unlocked: Mutex<Vec<bool>>,
    }

    #[async_trait]
    impl CompletionService for LockWatcher {
        async fn chat(&self, _messages: &[ConversationEntry], _user_tag: &str) -> Result<String> {
            let unlocked = match self.data.get().and_then(Weak::upgrade) {
                Some(data) => {
                    let conversations_free = data.conversations().try_write().is_ok();
                    let personas_free = data.personas().try_write().is_ok();
                    conversations_free && personas_free
                }
                None => false,
            };
            self.unlocked.lock().unwrap().push(unlocked);
            Ok("done".to_string())
        }
    }

    #[tokio::test]
    async fn no_lock_is_held_during_completion() {
        let watcher = Arc::new(LockWatcher::default());
        let data = Arc::new(data(watcher.clone()));
        assert!(watcher.data.set(Arc::downgrade(&data)).is_ok());

        converse(&data, CHANNEL, SAM, "sam", "hi").await;
        converse(&data, CHANNEL, SAM, "sam", "again").await;

        assert_eq!(*watcher.unlocked.lock().unwrap(), vec![true, true]);
    }
}
