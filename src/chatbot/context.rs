//! Per-channel bounded conversation history.

use std::collections::{HashMap, VecDeque};

use poise::serenity_prelude::ChannelId;

use crate::types::ConversationEntry;

/// Most recent entries kept per channel.
pub const MAX_CONTEXT_ENTRIES: usize = 10;

/// In-memory conversation history keyed by channel.
///
/// Entries are evicted oldest-first once a channel holds more than
/// [`MAX_CONTEXT_ENTRIES`]. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct ContextStore {
    channels: HashMap<ChannelId, VecDeque<ConversationEntry>>,
}

impl ContextStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to the tail of a channel's history, trimming the head.
    pub fn append(&mut self, channel_id: ChannelId, entry: ConversationEntry) {
        let history = self.channels.entry(channel_id).or_default();
        history.push_back(entry);
        while history.len() > MAX_CONTEXT_ENTRIES {
            history.pop_front();
        }
    }

    /// Snapshot of the channel's history, empty if none exists.
    #[must_use]
    pub fn get(&self, channel_id: ChannelId) -> Vec<ConversationEntry> {
        self.channels
            .get(&channel_id)
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Remove the channel's history. Returns whether anything was stored.
    pub fn clear(&mut self, channel_id: ChannelId) -> bool {
        self.channels.remove(&channel_id).is_some()
    }

    /// Replace the channel's history with a single system entry.
    pub fn reset_with_system(&mut self, channel_id: ChannelId, text: impl Into<String>) {
        self.channels
            .insert(channel_id, VecDeque::from([ConversationEntry::system(text)]));
    }
}
