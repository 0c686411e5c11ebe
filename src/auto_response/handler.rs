//! Keyword reaction handler.

use log::{debug, info};
use poise::serenity_prelude::{Context, Message as SerenityMessage, ReactionType};

use crate::content::ContentProvider;
use crate::error::Result;

use super::{
    matching::select_keyword_rule,
    rules::{Comeback, KeywordRule},
};

/// React to keyword messages such as "good bot".
///
/// Returns `true` if a rule matched, `false` otherwise.
pub async fn handle_keyword_reaction(
    ctx: &Context,
    new_message: &SerenityMessage,
    rules: &[KeywordRule],
    content: &dyn ContentProvider,
) -> Result<bool> {
    let Some(rule) = select_keyword_rule(rules, &new_message.content) else {
        return Ok(false);
    };

    debug!(
        "Keyword rule '{}' matched message from {} in channel {}",
        rule.name,
        new_message.author.tag(),
        new_message.channel_id
    );

    new_message
        .react(ctx, ReactionType::Unicode(rule.reaction.to_string()))
        .await?;

    if rand::random_bool(rule.reply_chance) {
        let line = match rule.comeback {
            Comeback::GoodBot => content.good_bot(),
            Comeback::BadBot => content.bad_bot(),
        };
        new_message.channel_id.say(&ctx.http, line).await?;
        info!(
            "Sent '{}' comeback to {} in channel {}",
            rule.name,
            new_message.author.tag(),
            new_message.channel_id
        );
    }

    Ok(true)
}
