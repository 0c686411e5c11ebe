//! Persona resolution: roast mode flags, nickname overrides and system prompts.

use std::collections::HashMap;

use poise::serenity_prelude::{ChannelId, UserId};

use crate::error::{BotError, Result};

/// Longest nickname override accepted, in characters.
pub const MAX_NICKNAME_CHARS: usize = 50;

/// Build the system prompt for a completion request.
///
/// Pure function of its inputs so it can be rebuilt on every request.
#[must_use]
pub fn system_prompt(roast_mode: bool, display_name: &str) -> String {
    if roast_mode {
        format!(
            "You are Jyle, a sharp-tongued but good-hearted AI living in a classroom Discord server. \
             Roast mode is ON: you are talking with {display_name}, so tease them with playful, \
             creative roasts while still answering their question correctly. Never be cruel, \
             never target appearance, identity or anything hurtful, and keep replies under 1500 characters."
        )
    } else {
        format!(
            "You are Jyle, a witty and friendly AI living in a classroom Discord server. \
             You are talking with {display_name}. Be helpful first, sprinkle in light banter and \
             the occasional emoji, and explain things clearly enough for a student to learn from. \
             Keep replies under 1500 characters."
        )
    }
}

/// System entry stored by `!persona`.
#[must_use]
pub fn custom_persona_prompt(description: &str) -> String {
    format!(
        "You are Jyle, an AI assistant with this personality: {}. Respond accordingly while being helpful and engaging.",
        description.trim()
    )
}

/// Per-channel roast flags and per-user nickname overrides.
#[derive(Debug, Default)]
pub struct PersonaBook {
    roast_mode: HashMap<ChannelId, bool>,
    nicknames: HashMap<UserId, String>,
}

impl PersonaBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn roast_mode(&self, channel_id: ChannelId) -> bool {
        self.roast_mode.get(&channel_id).copied().unwrap_or(false)
    }

    /// Flip roast mode for a channel and return the new state.
    pub fn toggle_roast_mode(&mut self, channel_id: ChannelId) -> bool {
        let flag = self.roast_mode.entry(channel_id).or_insert(false);
        *flag = !*flag;
        *flag
    }

    /// Store a nickname override.
    ///
    /// # Errors
    ///
    /// Returns `NicknameTooLong` and leaves the overrides untouched when the
    /// nickname exceeds [`MAX_NICKNAME_CHARS`].
    pub fn set_nickname(&mut self, user_id: UserId, nickname: &str) -> Result<()> {
        let nickname = nickname.trim();
        let len = nickname.chars().count();
        if len > MAX_NICKNAME_CHARS {
            return Err(BotError::NicknameTooLong(len));
        }
        self.nicknames.insert(user_id, nickname.to_string());
        Ok(())
    }

    /// Remove a nickname override. Returns whether one existed.
    pub fn clear_nickname(&mut self, user_id: UserId) -> bool {
        self.nicknames.remove(&user_id).is_some()
    }

    /// Nickname override if set, otherwise the platform display name.
    #[must_use]
    pub fn display_name(&self, user_id: UserId, platform_name: &str) -> String {
        self.nicknames
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| platform_name.to_string())
    }

    /// System prompt for a user in a channel, using the current flags.
    #[must_use]
    pub fn resolve(&self, channel_id: ChannelId, user_id: UserId, platform_name: &str) -> String {
        system_prompt(
            self.roast_mode(channel_id),
            &self.display_name(user_id, platform_name),
        )
    }
}
