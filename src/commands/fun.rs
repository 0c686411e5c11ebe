//! Canned-content commands and the help card.

use poise::{CreateReply, serenity_prelude::User};

use crate::bot::Context;
use crate::error::Result;
use crate::persona::MAX_NICKNAME_CHARS;
use crate::platform::EmbedCard;

const HELP_COLOR: u32 = 0x0000_ff00;

/// Resolve the name Jyle uses for a user, honouring nickname overrides.
async fn target_name(ctx: Context<'_>, target: Option<User>) -> String {
    let user = target.unwrap_or_else(|| ctx.author().clone());
    ctx.data()
        .personas()
        .read()
        .await
        .display_name(user.id, user.display_name())
}

/// Roast someone (or yourself)
#[poise::command(prefix_command, category = "Fun")]
pub async fn roast(ctx: Context<'_>, target: Option<User>) -> Result<()> {
    let name = target_name(ctx, target).await;
    ctx.say(ctx.data().content().roast(&name)).await?;
    Ok(())
}

/// Compliment someone (or yourself)
#[poise::command(prefix_command, category = "Fun")]
pub async fn compliment(ctx: Context<'_>, target: Option<User>) -> Result<()> {
    let name = target_name(ctx, target).await;
    ctx.say(ctx.data().content().compliment(&name)).await?;
    Ok(())
}

fn help_card() -> EmbedCard {
    EmbedCard::new("🤖 Jyle Bot Commands", HELP_COLOR)
        .description("Here are the available Jyle commands:")
        .field("!jyle <message>", "Chat with Jyle (teacher will be notified)", false)
        .field("!question <question>", "Ask a question (teacher will be notified)", false)
        .field("!help_request <message>", "Request help (teacher will be notified)", false)
        .field("!clear", "Clear conversation history for this channel", false)
        .field("!persona <description>", "Set a custom personality for Jyle", false)
        .field("!roastmode", "Toggle roast mode for this channel", false)
        .field(
            "!nickname <name> / !clearnickname",
            format!("Set or forget the name Jyle calls you (max {MAX_NICKNAME_CHARS} characters)"),
            false,
        )
        .field("!roast @user / !compliment @user", "Get a roast or a compliment", false)
        .field(
            "!toggle_teacher_dm / !set_teacher <id>",
            "Teacher notification settings (Admin only)",
            false,
        )
}

/// Show Jyle bot commands
#[poise::command(prefix_command, category = "Fun")]
pub async fn jylehelp(ctx: Context<'_>) -> Result<()> {
    ctx.send(CreateReply::default().embed(help_card().into_create_embed()))
        .await?;
    Ok(())
}
