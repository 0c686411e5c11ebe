//! Persona commands: custom personas, roast mode and nicknames.

use crate::bot::Context;
use crate::error::Result;
use crate::persona::custom_persona_prompt;

/// Set AI personality
#[poise::command(prefix_command, category = "Persona")]
pub async fn persona(ctx: Context<'_>, #[rest] persona: String) -> Result<()> {
    ctx.data()
        .conversations()
        .write()
        .await
        .reset_with_system(ctx.channel_id(), custom_persona_prompt(&persona));

    ctx.say(format!("🎭 Jyle's persona set to: {persona}"))
        .await?;
    Ok(())
}

/// Toggle roast mode for this channel
#[poise::command(prefix_command, category = "Persona")]
pub async fn roastmode(ctx: Context<'_>) -> Result<()> {
    let enabled = ctx
        .data()
        .personas()
        .write()
        .await
        .toggle_roast_mode(ctx.channel_id());

    if enabled {
        ctx.say("🔥 Roast mode is now **ON** for this channel. Nobody is safe.")
            .await?;
    } else {
        ctx.say("😇 Roast mode is now **OFF**. Back to being nice... mostly.")
            .await?;
    }
    Ok(())
}

/// Set the name Jyle calls you
#[poise::command(prefix_command, category = "Persona")]
pub async fn nickname(ctx: Context<'_>, #[rest] nickname: String) -> Result<()> {
    ctx.data()
        .personas()
        .write()
        .await
        .set_nickname(ctx.author().id, &nickname)?;

    ctx.say(format!("📛 Got it! I'll call you **{}** from now on.", nickname.trim()))
        .await?;
    Ok(())
}

/// Forget your nickname
#[poise::command(prefix_command, category = "Persona")]
pub async fn clearnickname(ctx: Context<'_>) -> Result<()> {
    let cleared = ctx
        .data()
        .personas()
        .write()
        .await
        .clear_nickname(ctx.author().id);

    if cleared {
        ctx.say("📛 Nickname cleared.").await?;
    } else {
        ctx.say("You don't have a nickname set.").await?;
    }
    Ok(())
}
