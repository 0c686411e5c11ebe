//! Discord bot core logic and event handling.

use std::sync::Arc;

use log::{debug, error, info, warn};
use poise::{
    Framework, FrameworkError, FrameworkOptions, PrefixFrameworkOptions,
    serenity_prelude::{
        ActivityData, ClientBuilder, Context as SerenityContext, FullEvent, GatewayIntents,
        GuildId, UserId,
    },
};
use tokio::sync::RwLock;

use crate::auto_response::{KeywordRule, handle_keyword_reaction, hardcoded_keyword_rules};
use crate::chatbot::{CompletionGateway, ContextStore};
use crate::commands::all_commands;
use crate::config::Config;
use crate::content::{ContentProvider, StaticContent};
use crate::error::{BotError, Result};
use crate::openrouter::OpenRouterClient;
use crate::persona::PersonaBook;
use crate::platform::{Platform, SerenityPlatform};
use crate::relay::{NotificationRelay, route_reply};

pub const COMMAND_PREFIX: &str = "!";

const PRESENCE: &str = "!jyle <message> | !jylehelp";

/// Context type for Jyle commands.
pub type Context<'a> = poise::Context<'a, Data, BotError>;

/// Shared state for all handlers. Lives for the whole process.
pub struct Data {
    conversations: RwLock<ContextStore>,
    personas: RwLock<PersonaBook>,
    relay: NotificationRelay,
    gateway: CompletionGateway,
    content: Arc<dyn ContentProvider>,
    keyword_rules: Vec<KeywordRule>,
}

impl Data {
    #[must_use]
    pub fn new(
        gateway: CompletionGateway,
        relay: NotificationRelay,
        content: Arc<dyn ContentProvider>,
    ) -> Self {
        Self {
            conversations: RwLock::new(ContextStore::new()),
            personas: RwLock::new(PersonaBook::new()),
            relay,
            gateway,
            content,
            keyword_rules: hardcoded_keyword_rules(),
        }
    }

    pub fn conversations(&self) -> &RwLock<ContextStore> {
        &self.conversations
    }

    pub fn personas(&self) -> &RwLock<PersonaBook> {
        &self.personas
    }

    pub fn relay(&self) -> &NotificationRelay {
        &self.relay
    }

    pub fn gateway(&self) -> &CompletionGateway {
        &self.gateway
    }

    pub fn content(&self) -> &dyn ContentProvider {
        self.content.as_ref()
    }
}

/// Run the Discord bot.
///
/// # Errors
///
/// Returns an error if configuration is missing or the Discord client fails.
pub async fn run() -> Result<()> {
    info!("Initializing bot");
    let config = Config::from_env()?;

    debug!("Initializing OpenRouter client");
    let content: Arc<dyn ContentProvider> = Arc::new(StaticContent);
    let gateway = CompletionGateway::new(
        Arc::new(OpenRouterClient::new(config.openrouter_api_key.clone())),
        Arc::clone(&content),
    );
    let data = Data::new(gateway, NotificationRelay::new(config.teacher_id), content);

    debug!("Setting up gateway intents");
    let intents = GatewayIntents::non_privileged()
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MEMBERS;

    debug!("Building framework");
    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: all_commands(),
            prefix_options: PrefixFrameworkOptions {
                prefix: Some(COMMAND_PREFIX.to_string()),
                case_insensitive_commands: true,
                ..Default::default()
            },
            command_check: Some(|ctx| Box::pin(command_check(ctx))),
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, _framework, data| Box::pin(event_handler(ctx, event, data)),
            ..Default::default()
        })
        .setup(move |ctx, ready, _framework| {
            Box::pin(async move {
                info!("{} has connected to Discord!", ready.user.name);
                info!("Bot is in {} guilds", ready.guilds.len());
                verify_teacher(ctx, data.relay()).await;
                ctx.set_activity(Some(ActivityData::listening(PRESENCE)));
                Ok(data)
            })
        })
        .build();

    debug!("Creating Discord client");
    let mut client = ClientBuilder::new(config.discord_token, intents)
        .framework(framework)
        .await?;

    info!("Starting Discord client");

    tokio::select! {
        result = client.start() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, shutting down...");
        }
    }

    Ok(())
}

async fn verify_teacher(ctx: &SerenityContext, relay: &NotificationRelay) {
    let Some(teacher_id) = relay.recipient().await else {
        return;
    };
    match SerenityPlatform::new(ctx).user(teacher_id).await {
        Ok(teacher) => info!("Teacher DM configured for: {}", teacher.name),
        Err(e) => warn!("Could not verify teacher Discord ID {teacher_id}: {e}"),
    }
}

/// Whether a message is a direct message from the alert recipient.
fn is_teacher_dm(guild_id: Option<GuildId>, author: UserId, recipient: Option<UserId>) -> bool {
    guild_id.is_none() && recipient == Some(author)
}

/// How the event handler treats an incoming message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageRoute {
    /// Sent by Jyle itself.
    Own,
    TeacherDm,
    Keywords,
}

fn classify_message(
    guild_id: Option<GuildId>,
    author: UserId,
    bot_user_id: UserId,
    recipient: Option<UserId>,
) -> MessageRoute {
    if author == bot_user_id {
        MessageRoute::Own
    } else if is_teacher_dm(guild_id, author, recipient) {
        MessageRoute::TeacherDm
    } else {
        MessageRoute::Keywords
    }
}

/// Teacher DMs never reach command dispatch.
async fn command_check(ctx: Context<'_>) -> Result<bool> {
    let recipient = ctx.data().relay().recipient().await;
    Ok(!is_teacher_dm(ctx.guild_id(), ctx.author().id, recipient))
}

async fn on_error(error: FrameworkError<'_, Data, BotError>) {
    match error {
        FrameworkError::Command { error, ctx, .. } => {
            error!(
                "Error in command `{}` from {}: {error}",
                ctx.command().name,
                ctx.author().tag()
            );
            if let Err(e) = ctx.say(error.user_message()).await {
                warn!("Failed to report command error: {e}");
            }
        }
        FrameworkError::CommandCheckFailed { error: None, ctx, .. } => {
            debug!("Skipped command `{}` from teacher DM", ctx.command().name);
        }
        FrameworkError::UnknownCommand { .. } => {}
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

async fn event_handler(ctx: &SerenityContext, event: &FullEvent, data: &Data) -> Result<()> {
    let FullEvent::Message { new_message } = event else {
        return Ok(());
    };

    let bot_user_id = ctx.cache.current_user().id;
    let recipient = data.relay().recipient().await;
    match classify_message(
        new_message.guild_id,
        new_message.author.id,
        bot_user_id,
        recipient,
    ) {
        MessageRoute::Own => {}
        MessageRoute::TeacherDm => {
            info!("Received DM from teacher: {}", new_message.content);
            let outcome = route_reply(
                &SerenityPlatform::new(ctx),
                new_message.author.id,
                new_message.author.display_name(),
                &new_message.content,
            )
            .await;
            debug!("Teacher DM handled: {outcome:?}");
        }
        MessageRoute::Keywords => {
            handle_keyword_reaction(ctx, new_message, &data.keyword_rules, data.content())
                .await?;
        }
    }
    Ok(())
}
