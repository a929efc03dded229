//! In-memory [`GuildClient`] used by tests. Serves a scripted hierarchy and
//! can fail individual calls with a chosen error.

use std::collections::HashMap;

use chrono::{TimeZone, Utc};

use super::{
    ChannelKind, ClientError, GuildClient, RemoteChannel, RemoteGuild, RemoteMessage,
    RemoteReaction, RemoteThread,
};

#[derive(Default)]
pub struct FakeGuild {
    pub guild_id: u64,
    pub guild_name: String,
    pub channels: Vec<RemoteChannel>,
    /// Histories for both channels and threads, keyed by id.
    pub histories: HashMap<u64, Vec<RemoteMessage>>,
    pub pins: HashMap<u64, Vec<RemoteMessage>>,
    pub active_threads: HashMap<u64, Vec<RemoteThread>>,
    pub archived_threads: HashMap<u64, Vec<RemoteThread>>,
    /// Scripted failures, per channel/thread id and call kind.
    pub history_errors: HashMap<u64, ClientError>,
    pub pin_errors: HashMap<u64, ClientError>,
    pub thread_errors: HashMap<u64, ClientError>,
}

impl FakeGuild {
    pub fn new(guild_id: u64, guild_name: &str) -> Self {
        Self {
            guild_id,
            guild_name: guild_name.to_string(),
            ..Self::default()
        }
    }

    pub fn category(&mut self, id: u64, name: &str) {
        self.channels.push(RemoteChannel {
            id,
            name: name.to_string(),
            kind: ChannelKind::Category,
            category: None,
            topic: None,
        });
    }

    pub fn text_channel(&mut self, id: u64, name: &str, category: Option<(u64, &str)>) {
        self.channels.push(RemoteChannel {
            id,
            name: name.to_string(),
            kind: ChannelKind::Text,
            category: category.map(|(cid, cname)| (cid, cname.to_string())),
            topic: None,
        });
        self.histories.entry(id).or_default();
    }

    pub fn message(&mut self, channel_id: u64, id: u64, author: u64, content: &str) {
        let message = plain_message(id, author, content);
        self.histories.entry(channel_id).or_default().push(message);
    }

    pub fn reacted_message(
        &mut self,
        channel_id: u64,
        id: u64,
        author: u64,
        content: &str,
        emoji: &str,
    ) {
        let mut message = plain_message(id, author, content);
        message.reactions.push(RemoteReaction {
            emoji: emoji.to_string(),
            count: 1,
        });
        self.histories.entry(channel_id).or_default().push(message);
    }

    /// Register a thread under `channel_id` with an empty history and a
    /// platform-reported message count of `reported`. Callers script the
    /// actual history with `message`, so the report can diverge from it.
    pub fn thread(&mut self, channel_id: u64, thread_id: u64, name: &str, reported: u64) {
        self.active_threads
            .entry(channel_id)
            .or_default()
            .push(RemoteThread {
                id: thread_id,
                name: name.to_string(),
                message_count: reported,
            });
        self.histories.entry(thread_id).or_default();
    }
}

pub fn plain_message(id: u64, author: u64, content: &str) -> RemoteMessage {
    RemoteMessage {
        id,
        author_id: author,
        author_name: format!("user-{author}"),
        content: content.to_string(),
        clean_content: content.to_string(),
        timestamp: Utc.timestamp_opt(1_700_000_000 + id as i64, 0).unwrap(),
        attachments: Vec::new(),
        reactions: Vec::new(),
        reply_to: None,
    }
}

impl GuildClient for FakeGuild {
    async fn ready(&self) {}

    async fn fetch_guild(&self, guild_id: u64) -> Result<RemoteGuild, ClientError> {
        if guild_id != self.guild_id {
            return Err(ClientError::Other(format!("unknown guild {guild_id}")));
        }
        Ok(RemoteGuild {
            id: self.guild_id,
            name: self.guild_name.clone(),
        })
    }

    async fn fetch_channels(&self, _guild_id: u64) -> Result<Vec<RemoteChannel>, ClientError> {
        Ok(self.channels.clone())
    }

    async fn channel_history(&self, channel_id: u64) -> Result<Vec<RemoteMessage>, ClientError> {
        if let Some(err) = self.history_errors.get(&channel_id) {
            return Err(err.clone());
        }
        Ok(self.histories.get(&channel_id).cloned().unwrap_or_default())
    }

    async fn pinned_messages(&self, channel_id: u64) -> Result<Vec<RemoteMessage>, ClientError> {
        if let Some(err) = self.pin_errors.get(&channel_id) {
            return Err(err.clone());
        }
        Ok(self.pins.get(&channel_id).cloned().unwrap_or_default())
    }

    async fn active_threads(&self, channel_id: u64) -> Result<Vec<RemoteThread>, ClientError> {
        if let Some(err) = self.thread_errors.get(&channel_id) {
            return Err(err.clone());
        }
        Ok(self
            .active_threads
            .get(&channel_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn archived_threads(&self, channel_id: u64) -> Result<Vec<RemoteThread>, ClientError> {
        Ok(self
            .archived_threads
            .get(&channel_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn thread_history(&self, thread_id: u64) -> Result<Vec<RemoteMessage>, ClientError> {
        if let Some(err) = self.history_errors.get(&thread_id) {
            return Err(err.clone());
        }
        Ok(self.histories.get(&thread_id).cloned().unwrap_or_default())
    }
}
