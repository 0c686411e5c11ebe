//! Thin seam over the Discord API used by the teacher relay.
//!
//! [`Platform`] covers the lookups and sends the relay and reply router need.
//! [`SerenityPlatform`] implements it with serenity's cache-then-HTTP pattern.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use poise::serenity_prelude::{
    Channel, ChannelId, ChannelType, Context, CreateEmbed, CreateEmbedFooter, CreateMessage,
    GuildId, Timestamp, UserId,
};

use crate::error::{BotError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Transport-agnostic rich message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedCard {
    pub title: String,
    pub description: Option<String>,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    pub footer: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl EmbedCard {
    pub fn new(title: impl Into<String>, color: u32) -> Self {
        Self {
            title: title.into(),
            description: None,
            color,
            fields: Vec::new(),
            footer: None,
            timestamp: None,
        }
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline,
        });
        self
    }

    #[must_use]
    pub fn footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    #[must_use]
    pub fn timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.timestamp = Some(at);
        self
    }

    #[must_use]
    pub fn into_create_embed(self) -> CreateEmbed {
        let mut embed = CreateEmbed::new().title(self.title).color(self.color);
        if let Some(description) = self.description {
            embed = embed.description(description);
        }
        for field in self.fields {
            embed = embed.field(field.name, field.value, field.inline);
        }
        if let Some(footer) = self.footer {
            embed = embed.footer(CreateEmbedFooter::new(footer));
        }
        if let Some(at) = self.timestamp
            && let Ok(ts) = Timestamp::from_unix_timestamp(at.timestamp())
        {
            embed = embed.timestamp(ts);
        }
        embed
    }
}

/// A message to deliver: plain text or a single embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text(String),
    Embed(EmbedCard),
}

impl Outbound {
    #[must_use]
    pub fn into_create_message(self) -> CreateMessage {
        match self {
            Outbound::Text(text) => CreateMessage::new().content(text),
            Outbound::Embed(card) => CreateMessage::new().embed(card.into_create_embed()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSummary {
    pub id: GuildId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSummary {
    pub id: ChannelId,
    pub guild_id: Option<GuildId>,
    pub name: String,
    /// Whether the bot can post a regular message here.
    pub postable: bool,
}

/// Lookups and sends against the chat platform.
#[async_trait]
pub trait Platform: Send + Sync {
    async fn user(&self, id: UserId) -> Result<UserSummary>;
    async fn guild(&self, id: GuildId) -> Result<GuildSummary>;
    async fn channel(&self, id: ChannelId) -> Result<ChannelSummary>;
    async fn send_direct(&self, user: UserId, message: Outbound) -> Result<()>;
    async fn send_to_channel(&self, channel: ChannelId, message: Outbound) -> Result<()>;
}

/// [`Platform`] backed by a live serenity context.
pub struct SerenityPlatform<'a> {
    ctx: &'a Context,
}

impl<'a> SerenityPlatform<'a> {
    #[must_use]
    pub fn new(ctx: &'a Context) -> Self {
        Self { ctx }
    }
}

#[async_trait]
impl Platform for SerenityPlatform<'_> {
    async fn user(&self, id: UserId) -> Result<UserSummary> {
        let user = id.to_user(self.ctx).await?;
        Ok(UserSummary {
            id,
            display_name: user.global_name.clone().unwrap_or_else(|| user.name.clone()),
            name: user.name,
        })
    }

    async fn guild(&self, id: GuildId) -> Result<GuildSummary> {
        // Extract before any .await so the CacheRef is dropped
        let cached = self.ctx.cache.guild(id).map(|guild| guild.name.clone());
        let name = if let Some(name) = cached {
            name
        } else {
            debug!("Guild {id} not cached, fetching");
            self.ctx.http.get_guild(id).await?.name
        };
        Ok(GuildSummary { id, name })
    }

    async fn channel(&self, id: ChannelId) -> Result<ChannelSummary> {
        match id.to_channel(self.ctx).await? {
            Channel::Guild(channel) => Ok(ChannelSummary {
                id,
                guild_id: Some(channel.guild_id),
                postable: matches!(channel.kind, ChannelType::Text | ChannelType::News),
                name: channel.name,
            }),
            Channel::Private(channel) => Ok(ChannelSummary {
                id,
                guild_id: None,
                name: channel.name(),
                postable: false,
            }),
            other => Err(BotError::Lookup(format!(
                "unsupported channel kind for {}",
                other.id()
            ))),
        }
    }

    async fn send_direct(&self, user: UserId, message: Outbound) -> Result<()> {
        user.direct_message(self.ctx, message.into_create_message())
            .await?;
        Ok(())
    }

    async fn send_to_channel(&self, channel: ChannelId, message: Outbound) -> Result<()> {
        channel
            .send_message(&self.ctx.http, message.into_create_message())
            .await?;
        Ok(())
    }
}
