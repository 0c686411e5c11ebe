//! Teacher notification relay.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use log::{debug, error, info, warn};
use poise::serenity_prelude::UserId;
use tokio::sync::RwLock;

use crate::platform::{Outbound, Platform};

use super::alert::{AlertCommand, AlertOrigin, Student, TeacherAlert};

/// Sends student question alerts to the configured teacher.
#[derive(Debug)]
pub struct NotificationRelay {
    recipient: RwLock<Option<UserId>>,
    enabled: AtomicBool,
}

impl NotificationRelay {
    #[must_use]
    pub fn new(recipient: Option<UserId>) -> Self {
        Self {
            recipient: RwLock::new(recipient),
            enabled: AtomicBool::new(true),
        }
    }

    pub async fn recipient(&self) -> Option<UserId> {
        *self.recipient.read().await
    }

    pub async fn set_recipient(&self, recipient: UserId) {
        *self.recipient.write().await = Some(recipient);
        info!("Teacher recipient set to {recipient}");
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Flip the notification switch and return the new state.
    pub fn toggle(&self) -> bool {
        !self.enabled.fetch_xor(true, Ordering::SeqCst)
    }

    /// DM the teacher about a student's question.
    ///
    /// Never fails: an unset recipient or disabled switch is a no-op, and
    /// delivery problems are only logged.
    pub async fn notify(
        &self,
        platform: &dyn Platform,
        student: Student,
        origin: AlertOrigin,
        question: &str,
        command: AlertCommand,
    ) {
        let Some(recipient) = self.recipient().await else {
            debug!("No teacher configured, skipping {command} alert");
            return;
        };
        if !self.is_enabled() {
            debug!("Teacher notifications disabled, skipping {command} alert");
            return;
        }

        let teacher = match platform.user(recipient).await {
            Ok(teacher) => teacher,
            Err(e) => {
                warn!("Teacher user with ID {recipient} not found: {e}");
                return;
            }
        };

        let alert = TeacherAlert {
            command,
            student,
            origin,
            question: question.to_string(),
            asked_at: Utc::now(),
        };
        let address = alert.address();

        match platform
            .send_direct(teacher.id, Outbound::Embed(alert.to_embed()))
            .await
        {
            Ok(()) => info!(
                "Teacher DM sent to {} for question from {} ({address})",
                teacher.name, alert.student.username
            ),
            Err(e) => error!("Failed to send teacher DM: {e}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude::{ChannelId, GuildId};

    use super::*;
    use crate::platform::fake::{FakePlatform, Target, rendered};

    const TEACHER: u64 = 500;

    fn student() -> Student {
        Student {
            id: UserId::new(3),
            display_name: "Sam".to_string(),
            username: "sam_01".to_string(),
        }
    }

    fn origin() -> AlertOrigin {
        AlertOrigin {
            guild: Some((GuildId::new(1), "School".to_string())),
            channel_id: ChannelId::new(2),
            channel_name: "homework".to_string(),
        }
    }

    async fn notify(relay: &NotificationRelay, platform: &FakePlatform, question: &str) {
        relay
            .notify(platform, student(), origin(), question, AlertCommand::Question)
            .await;
    }

    #[tokio::test]
    async fn sends_one_alert_to_teacher() {
        let platform = FakePlatform::default().with_user(TEACHER, "ms_frizzle");
        let relay = NotificationRelay::new(Some(UserId::new(TEACHER)));

        notify(&relay, &platform, "what is a monad?").await;

        let sent = platform.sent();
        assert_eq!(sent.len(), 1);
        let (target, message) = &sent[0];
        assert_eq!(*target, Target::Direct(UserId::new(TEACHER)));
        let text = rendered(message);
        assert!(text.contains("what is a monad?"));
        assert!(text.contains("Sam (sam_01)"));
        assert!(text.contains("#homework"));
        assert!(text.contains("`!question`"));
        assert!(text.contains("GuildID:1 | ChannelID:2 | StudentID:3"));
    }

    #[tokio::test]
    async fn unset_recipient_is_a_no_op() {
        let platform = FakePlatform::default().with_user(TEACHER, "ms_frizzle");
        let relay = NotificationRelay::new(None);

        notify(&relay, &platform, "anything").await;

        assert!(platform.sent().is_empty());
    }

    #[tokio::test]
    async fn disabled_relay_is_a_no_op() {
        let platform = FakePlatform::default().with_user(TEACHER, "ms_frizzle");
        let relay = NotificationRelay::new(Some(UserId::new(TEACHER)));

        assert!(!relay.toggle());
        notify(&relay, &platform, "anything").await;
        assert!(platform.sent().is_empty());

        assert!(relay.toggle());
        notify(&relay, &platform, "anything").await;
        assert_eq!(platform.sent().len(), 1);
    }

    #[tokio::test]
    async fn unresolvable_teacher_is_swallowed() {
        let platform = FakePlatform::default();
        let relay = NotificationRelay::new(Some(UserId::new(TEACHER)));

        notify(&relay, &platform, "anything").await;

        assert!(platform.sent().is_empty());
    }

    #[tokio::test]
    async fn rejected_send_is_swallowed() {
        let platform = FakePlatform {
            reject_sends: true,
            ..FakePlatform::default().with_user(TEACHER, "ms_frizzle")
        };
        let relay = NotificationRelay::new(Some(UserId::new(TEACHER)));

        notify(&relay, &platform, "anything").await;

        assert!(platform.sent().is_empty());
    }

    #[tokio::test]
    async fn recipient_can_be_replaced_at_runtime() {
        let relay = NotificationRelay::new(None);
        assert_eq!(relay.recipient().await, None);

        relay.set_recipient(UserId::new(TEACHER)).await;
        assert_eq!(relay.recipient().await, Some(UserId::new(TEACHER)));

        relay.set_recipient(UserId::new(TEACHER + 1)).await;
        assert_eq!(relay.recipient().await, Some(UserId::new(TEACHER + 1)));
    }
}
