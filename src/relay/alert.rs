//! Teacher alert formatting and the addressing footer.
//!
//! The footer carries guild, channel and student ids in a fixed
//! `Key:value` layout, matching the `!reply` hint the teacher copies.

use std::fmt;

use chrono::{DateTime, Utc};
use poise::serenity_prelude::{ChannelId, GuildId, UserId};
use strum::Display;

use crate::platform::EmbedCard;

/// Longest question excerpt included in an alert, in characters.
pub const MAX_QUESTION_CHARS: usize = 1000;

const ALERT_COLOR: u32 = 0x0034_98db;
const FOOTER_PREFIX: &str = "Teacher Alert System";
const DM_SENTINEL: &str = "DM";

/// Commands that raise a teacher alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum AlertCommand {
    Jyle,
    Question,
    HelpRequest,
}

/// Who asked.
#[derive(Debug, Clone)]
pub struct Student {
    pub id: UserId,
    pub display_name: String,
    pub username: String,
}

/// Where the question was asked. `guild` is `None` for direct messages.
#[derive(Debug, Clone)]
pub struct AlertOrigin {
    pub guild: Option<(GuildId, String)>,
    pub channel_id: ChannelId,
    pub channel_name: String,
}

/// Routing data written into an alert footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertAddress {
    pub guild_id: Option<GuildId>,
    pub channel_id: ChannelId,
    pub student_id: UserId,
}

impl fmt::Display for AlertAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guild = self
            .guild_id
            .map_or_else(|| DM_SENTINEL.to_string(), |id| id.to_string());
        write!(
            f,
            "{FOOTER_PREFIX} | GuildID:{guild} | ChannelID:{} | StudentID:{}",
            self.channel_id, self.student_id
        )
    }
}

/// Cut a question to [`MAX_QUESTION_CHARS`], marking the cut with `...`.
#[must_use]
pub fn truncate_question(question: &str) -> String {
    if question.chars().count() > MAX_QUESTION_CHARS {
        let mut excerpt: String = question.chars().take(MAX_QUESTION_CHARS).collect();
        excerpt.push_str("...");
        excerpt
    } else {
        question.to_string()
    }
}

/// One student question, ready to be rendered for the teacher.
#[derive(Debug, Clone)]
pub struct TeacherAlert {
    pub command: AlertCommand,
    pub student: Student,
    pub origin: AlertOrigin,
    pub question: String,
    pub asked_at: DateTime<Utc>,
}

impl TeacherAlert {
    #[must_use]
    pub fn address(&self) -> AlertAddress {
        AlertAddress {
            guild_id: self.origin.guild.as_ref().map(|(id, _)| *id),
            channel_id: self.origin.channel_id,
            student_id: self.student.id,
        }
    }

    #[must_use]
    pub fn to_embed(&self) -> EmbedCard {
        let server = self
            .origin
            .guild
            .as_ref()
            .map_or("Direct Message", |(_, name)| name.as_str());
        let channel = if self.origin.guild.is_some() {
            format!("#{}", self.origin.channel_name)
        } else {
            "Direct Message".to_string()
        };

        let mut card = EmbedCard::new("📚 Student Question Alert", ALERT_COLOR)
            .description(format!(
                "A student has asked a question using the `!{}` command",
                self.command
            ))
            .field(
                "👤 Student",
                format!("{} ({})", self.student.display_name, self.student.username),
                false,
            )
            .field("📍 Channel", channel, true)
            .field("🏫 Server", server, true)
            .field("❓ Question", truncate_question(&self.question), false);

        if let Some((guild_id, _)) = &self.origin.guild {
            card = card.field(
                "↩️ Reply",
                format!(
                    "`!reply {guild_id} {} <your message>`",
                    self.origin.channel_id
                ),
                false,
            );
        }

        card.footer(self.address().to_string())
            .timestamp(self.asked_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(guild: Option<(GuildId, String)>, question: &str) -> TeacherAlert {
        TeacherAlert {
            command: AlertCommand::HelpRequest,
            student: Student {
                id: UserId::new(3),
                display_name: "Sam".to_string(),
                username: "sam_01".to_string(),
            },
            origin: AlertOrigin {
                guild,
                channel_id: ChannelId::new(2),
                channel_name: "homework".to_string(),
            },
            question: question.to_string(),
            asked_at: Utc::now(),
        }
    }

    #[test]
    fn command_names_match_prefix_commands() {
        assert_eq!(AlertCommand::HelpRequest.to_string(), "help_request");
        assert_eq!(AlertCommand::Jyle.to_string(), "jyle");
        assert_eq!(AlertCommand::Question.to_string(), "question");
    }

    #[test]
    fn footer_carries_guild_address() -> Result<(), &'static str> {
        let alert = alert(Some((GuildId::new(1), "School".to_string())), "why?");
        let card = alert.to_embed();
        let footer = card.footer.ok_or("missing footer")?;

        assert_eq!(
            footer,
            "Teacher Alert System | GuildID:1 | ChannelID:2 | StudentID:3"
        );
        assert_eq!(footer, alert.address().to_string());
        assert!(card.fields.iter().any(|f| f.value == "`!reply 1 2 <your message>`"));
        Ok(())
    }

    #[test]
    fn direct_message_alert_uses_sentinel() -> Result<(), &'static str> {
        let card = alert(None, "why?").to_embed();
        let footer = card.footer.ok_or("missing footer")?;

        assert_eq!(
            footer,
            "Teacher Alert System | GuildID:DM | ChannelID:2 | StudentID:3"
        );
        assert!(card.fields.iter().any(|f| f.value == "Direct Message"));
        assert!(!card.fields.iter().any(|f| f.name.contains("Reply")));
        Ok(())
    }

    #[test]
    fn long_questions_are_truncated_with_marker() {
        let long = "q".repeat(MAX_QUESTION_CHARS + 5);
        let excerpt = truncate_question(&long);
        assert_eq!(excerpt.chars().count(), MAX_QUESTION_CHARS + 3);
        assert!(excerpt.ends_with("..."));

        let exact = "q".repeat(MAX_QUESTION_CHARS);
        assert_eq!(truncate_question(&exact), exact);
    }
}
