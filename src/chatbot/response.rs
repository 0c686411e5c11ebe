//! Response sending utilities for Discord.

use log::info;

use crate::bot::Context;
use crate::error::Result;

/// Discord's message limit for standard users.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// Split text into chunks of at most `limit` characters, on char boundaries.
#[must_use]
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    if text.is_empty() || limit == 0 {
        return Vec::new();
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(limit)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Send a chatbot reply, chunked to fit Discord's message limit.
pub async fn send_chunked(ctx: Context<'_>, text: &str) -> Result<()> {
    let chunks = split_message(text, DISCORD_MESSAGE_LIMIT);
    for chunk in &chunks {
        ctx.say(chunk).await?;
    }
    info!(
        "Replied to {} in channel {} ({} chunk(s))",
        ctx.author().tag(),
        ctx.channel_id(),
        chunks.len()
    );
    Ok(())
}
