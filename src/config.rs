use std::env;

use log::{debug, error, info, warn};
use poise::serenity_prelude::UserId;

use crate::error::{BotError, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub openrouter_api_key: String,
    /// Teacher account that receives alerts and may route replies.
    pub teacher_id: Option<UserId>,
}

impl Config {
    /// Load configuration from the environment (and `.env` if present).
    ///
    /// # Errors
    ///
    /// Returns an error if a credential is missing or `TEACHER_DISCORD_ID`
    /// is set but is not a valid Discord user id.
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        dotenvy::dotenv().ok();

        let discord_token = env::var("DISCORD_TOKEN").map_err(|e| {
            error!("Failed to load DISCORD_TOKEN from environment: {e}");
            e
        })?;

        let openrouter_api_key = env::var("OPENROUTER_API_KEY").map_err(|e| {
            error!("Failed to load OPENROUTER_API_KEY from environment: {e}");
            e
        })?;

        let teacher_id = match env::var("TEACHER_DISCORD_ID") {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_user_id(&raw).ok_or_else(|| {
                error!("TEACHER_DISCORD_ID is not a valid Discord user id: {raw}");
                BotError::Config(format!("invalid TEACHER_DISCORD_ID: {raw}"))
            })?),
            _ => {
                warn!("TEACHER_DISCORD_ID not set, teacher notifications are disabled");
                None
            }
        };

        info!("Configuration loaded successfully");
        debug!("Discord token length: {} characters", discord_token.len());
        debug!(
            "OpenRouter API key length: {} characters",
            openrouter_api_key.len()
        );
        debug!("Teacher id: {teacher_id:?}");

        Ok(Self {
            discord_token,
            openrouter_api_key,
            teacher_id,
        })
    }
}

/// Parse a Discord snowflake. Zero is rejected since it is never a valid id.
#[must_use]
pub fn parse_user_id(raw: &str) -> Option<UserId> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|id| *id != 0)
        .map(UserId::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snowflake_with_whitespace() {
        assert_eq!(
            parse_user_id(" 398543560330444813\n"),
            Some(UserId::new(398_543_560_330_444_813))
        );
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert_eq!(parse_user_id("0"), None);
        assert_eq!(parse_user_id("teacher"), None);
        assert_eq!(parse_user_id("-12"), None);
    }
}
