//! Chat commands and teacher notifications.

use log::info;
use poise::CreateReply;

use crate::bot::Context;
use crate::chatbot::{author_display_name, chat_turn, send_chunked};
use crate::error::Result;
use crate::platform::{EmbedCard, SerenityPlatform};
use crate::relay::{AlertCommand, AlertOrigin, Student};

const QUICK_RESPONSE_COLOR: u32 = 0x0000_ff00;

/// Collect who asked and where, then alert the teacher.
async fn notify_teacher(ctx: Context<'_>, question: &str, command: AlertCommand) {
    let student = Student {
        id: ctx.author().id,
        display_name: author_display_name(ctx).await,
        username: ctx.author().name.clone(),
    };

    let guild = match ctx.guild_id() {
        Some(guild_id) => {
            let name = ctx
                .partial_guild()
                .await
                .map_or_else(|| guild_id.to_string(), |guild| guild.name);
            Some((guild_id, name))
        }
        None => None,
    };
    let channel_name = ctx
        .channel_id()
        .name(ctx)
        .await
        .unwrap_or_else(|_| ctx.channel_id().to_string());
    let origin = AlertOrigin {
        guild,
        channel_id: ctx.channel_id(),
        channel_name,
    };

    ctx.data()
        .relay()
        .notify(
            &SerenityPlatform::new(ctx.serenity_context()),
            student,
            origin,
            question,
            command,
        )
        .await;
}

/// Chat with Jyle - Teacher will be notified
#[poise::command(prefix_command, category = "Chat")]
pub async fn jyle(ctx: Context<'_>, #[rest] message: String) -> Result<()> {
    notify_teacher(ctx, &message, AlertCommand::Jyle).await;
    let reply = chat_turn(ctx, &message).await;
    send_chunked(ctx, &reply).await
}

/// Ask a question - Teacher will be notified
#[poise::command(prefix_command, category = "Chat")]
pub async fn question(ctx: Context<'_>, #[rest] question: String) -> Result<()> {
    notify_teacher(ctx, &question, AlertCommand::Question).await;

    ctx.say(format!(
        "📚 **Question received!** Your teacher has been notified.\n\n**Your question:** {question}\n\n*I'll also try to help while you wait for your teacher's response:*"
    ))
    .await?;

    let reply = chat_turn(ctx, &question).await;
    let card = EmbedCard::new("🤖 Jyle's Quick Response", QUICK_RESPONSE_COLOR)
        .description(reply)
        .footer("Your teacher will provide the official answer soon!");
    ctx.send(CreateReply::default().embed(card.into_create_embed()))
        .await?;

    info!(
        "Answered question from {} in channel {}",
        ctx.author().tag(),
        ctx.channel_id()
    );
    Ok(())
}

/// Request help - Teacher will be notified
#[poise::command(prefix_command, category = "Chat")]
pub async fn help_request(ctx: Context<'_>, #[rest] help_message: String) -> Result<()> {
    notify_teacher(
        ctx,
        &format!("HELP REQUEST: {help_message}"),
        AlertCommand::HelpRequest,
    )
    .await;

    ctx.say(format!(
        "🆘 **Help request sent!** Your teacher has been notified.\n\n**Your request:** {help_message}"
    ))
    .await?;
    Ok(())
}

/// Clear conversation history
#[poise::command(prefix_command, category = "Chat")]
pub async fn clear(ctx: Context<'_>) -> Result<()> {
    let cleared = ctx
        .data()
        .conversations()
        .write()
        .await
        .clear(ctx.channel_id());

    if cleared {
        ctx.say("🗑️ Conversation history cleared!").await?;
    } else {
        ctx.say("No conversation history to clear.").await?;
    }
    Ok(())
}
