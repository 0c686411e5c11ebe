//! Routes `!reply <guild_id> <channel_id> <message>` DMs from the teacher
//! back into the channel the question came from.

use chrono::Utc;
use log::{info, warn};
use poise::serenity_prelude::{ChannelId, GuildId, UserId};
use thiserror::Error;

use crate::platform::{EmbedCard, Outbound, Platform};

pub const REPLY_COMMAND: &str = "!reply";

const REPLY_USAGE: &str = "`!reply <guild_id> <channel_id> <your message>`";
const RESPONSE_COLOR: u32 = 0x00ff_a500;

/// Why a teacher reply could not be routed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    #[error("reply command has fewer than three arguments")]
    Format,

    #[error("guild or channel id is not a valid id")]
    InvalidId,

    #[error("guild {0} not found")]
    ServerNotFound(GuildId),

    #[error("channel {channel} not found or not a text channel in guild {guild}")]
    ChannelNotFound { guild: GuildId, channel: ChannelId },

    #[error("failed to deliver reply: {0}")]
    Delivery(String),
}

impl ReplyError {
    /// Diagnostic sent back to the teacher.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ReplyError::Format => {
                format!("❌ Invalid `!reply` command format. Please use {REPLY_USAGE}.")
            }
            ReplyError::InvalidId => {
                format!("❌ Invalid Guild ID or Channel ID format. Please use {REPLY_USAGE}.")
            }
            ReplyError::ServerNotFound(_) => {
                "❌ Could not find the specified server. Make sure the Guild ID is correct."
                    .to_string()
            }
            ReplyError::ChannelNotFound { .. } => {
                "❌ Could not find the specified channel. Make sure the Channel ID is correct and I have access to it.".to_string()
            }
            ReplyError::Delivery(detail) => {
                format!("❌ An unexpected error occurred while sending your response: {detail}")
            }
        }
    }
}

/// A parsed reply command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyCommand {
    pub guild_id: GuildId,
    pub channel_id: ChannelId,
    pub text: String,
}

/// What happened to a teacher DM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Not a reply command; nothing was sent.
    Ignored,
    Delivered {
        guild: String,
        channel: String,
    },
    Failed(ReplyError),
}

/// Parse a non-zero Discord id.
fn parse_snowflake(raw: &str) -> Option<u64> {
    raw.parse::<u64>().ok().filter(|id| *id != 0)
}

/// Split off the first whitespace-delimited token.
fn next_token(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    let end = input.find(char::is_whitespace).unwrap_or(input.len());
    Some((&input[..end], &input[end..]))
}

/// Parse a reply command. Returns `None` when `content` is not one.
///
/// The message text is everything after the channel id, with its inner
/// whitespace preserved.
#[must_use]
pub fn parse_reply(content: &str) -> Option<Result<ReplyCommand, ReplyError>> {
    let (command, rest) = next_token(content)?;
    if !command.eq_ignore_ascii_case(REPLY_COMMAND) {
        return None;
    }

    let Some((guild, rest)) = next_token(rest) else {
        return Some(Err(ReplyError::Format));
    };
    let Some((channel, rest)) = next_token(rest) else {
        return Some(Err(ReplyError::Format));
    };
    let text = rest.trim();
    if text.is_empty() {
        return Some(Err(ReplyError::Format));
    }

    let (Some(guild_id), Some(channel_id)) = (parse_snowflake(guild), parse_snowflake(channel))
    else {
        return Some(Err(ReplyError::InvalidId));
    };

    Some(Ok(ReplyCommand {
        guild_id: GuildId::new(guild_id),
        channel_id: ChannelId::new(channel_id),
        text: text.to_string(),
    }))
}

async fn deliver(
    platform: &dyn Platform,
    command: ReplyCommand,
    sender_name: &str,
) -> Result<(String, String), ReplyError> {
    let guild = platform.guild(command.guild_id).await.map_err(|e| {
        warn!("Teacher DM reply: guild {} not found: {e}", command.guild_id);
        ReplyError::ServerNotFound(command.guild_id)
    })?;

    let not_found = ReplyError::ChannelNotFound {
        guild: command.guild_id,
        channel: command.channel_id,
    };
    let channel = match platform.channel(command.channel_id).await {
        Ok(channel) if channel.guild_id == Some(guild.id) && channel.postable => channel,
        Ok(_) => {
            warn!(
                "Teacher DM reply: channel {} is not a text channel in guild {}",
                command.channel_id, command.guild_id
            );
            return Err(not_found);
        }
        Err(e) => {
            warn!(
                "Teacher DM reply: channel {} not found: {e}",
                command.channel_id
            );
            return Err(not_found);
        }
    };

    let response = EmbedCard::new("👨‍🏫 Teacher's Response", RESPONSE_COLOR)
        .description(command.text)
        .footer(format!("Sent by {sender_name}"))
        .timestamp(Utc::now());

    platform
        .send_to_channel(channel.id, Outbound::Embed(response))
        .await
        .map_err(|e| ReplyError::Delivery(e.to_string()))?;

    Ok((guild.name, channel.name))
}

/// Handle a DM already known to come from the teacher.
///
/// Sends exactly one message back to the teacher when the DM is a reply
/// command. Any other DM is ignored and nothing is sent.
pub async fn route_reply(
    platform: &dyn Platform,
    sender: UserId,
    sender_name: &str,
    content: &str,
) -> ReplyOutcome {
    let Some(parsed) = parse_reply(content) else {
        return ReplyOutcome::Ignored;
    };

    let result = match parsed {
        Ok(command) => deliver(platform, command, sender_name).await,
        Err(e) => Err(e),
    };

    let (outcome, feedback) = match result {
        Ok((guild, channel)) => {
            info!("Teacher's response sent to #{channel} in {guild}");
            let feedback = format!("✅ Your response has been sent to #{channel} in {guild}.");
            (ReplyOutcome::Delivered { guild, channel }, feedback)
        }
        Err(e) => {
            warn!("Teacher reply failed: {e}");
            let feedback = e.user_message();
            (ReplyOutcome::Failed(e), feedback)
        }
    };

    if let Err(e) = platform.send_direct(sender, Outbound::Text(feedback)).await {
        warn!("Failed to send reply feedback to teacher: {e}");
    }

    outcome
}
