//! Prefix commands (`!jyle`, `!question`, ...).

mod chat;
mod fun;
mod persona;
mod teacher;

use crate::bot::Data;
use crate::error::BotError;

/// Get all registered prefix commands.
#[must_use]
pub fn all_commands() -> Vec<poise::Command<Data, BotError>> {
    vec![
        chat::jyle(),
        chat::question(),
        chat::help_request(),
        chat::clear(),
        teacher::toggle_teacher_dm(),
        teacher::set_teacher(),
        persona::persona(),
        persona::roastmode(),
        persona::nickname(),
        persona::clearnickname(),
        fun::roast(),
        fun::compliment(),
        fun::jylehelp(),
    ]
}
