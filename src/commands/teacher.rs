//! Administrator commands for the teacher relay.

use log::{info, warn};

use crate::bot::Context;
use crate::config::parse_user_id;
use crate::error::{BotError, Result};
use crate::platform::{Platform, SerenityPlatform};

/// Toggle teacher DM notifications (Admin only)
#[poise::command(
    prefix_command,
    guild_only,
    required_permissions = "ADMINISTRATOR",
    category = "Teacher"
)]
pub async fn toggle_teacher_dm(ctx: Context<'_>) -> Result<()> {
    let enabled = ctx.data().relay().toggle();
    let status = if enabled { "enabled" } else { "disabled" };
    info!("{} {status} teacher notifications", ctx.author().tag());
    ctx.say(format!("📨 Teacher DM notifications are now **{status}**"))
        .await?;
    Ok(())
}

/// Set teacher Discord ID (Admin only)
#[poise::command(
    prefix_command,
    guild_only,
    required_permissions = "ADMINISTRATOR",
    category = "Teacher"
)]
pub async fn set_teacher(ctx: Context<'_>, user_id: String) -> Result<()> {
    let id = parse_user_id(&user_id).ok_or_else(|| BotError::InvalidUserId(user_id.clone()))?;

    let teacher = SerenityPlatform::new(ctx.serenity_context())
        .user(id)
        .await
        .map_err(|e| {
            warn!("Could not resolve teacher {id}: {e}");
            BotError::InvalidUserId(user_id.clone())
        })?;

    ctx.data().relay().set_recipient(teacher.id).await;
    ctx.say(format!("✅ Teacher set to: {}", teacher.name))
        .await?;
    Ok(())
}
