//! Capability contract for the remote chat platform.
//!
//! The archiver never talks to the wire itself; it consumes hierarchy
//! enumeration and paginated history through [`GuildClient`]. A live
//! implementation wraps the platform connection; tests supply an in-memory
//! fake.

#[cfg(test)]
pub(crate) mod fake;

use std::future::Future;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors surfaced by a [`GuildClient`] implementation.
///
/// Permission denial is its own variant because the crawler recovers from it
/// (skips the sub-tree) while every other failure aborts the crawl.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The connected account lacks access to the requested entity.
    #[error("missing access")]
    Forbidden,
    /// Any other platform-side failure.
    #[error("{0}")]
    Other(String),
}

/// The top-level community container as reported by the platform.
#[derive(Debug, Clone)]
pub struct RemoteGuild {
    pub id: u64,
    pub name: String,
}

/// What kind of channel a [`RemoteChannel`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// A named grouping of text channels.
    Category,
    /// A persistent conversation stream.
    Text,
}

/// A channel (or category) as reported by the platform's enumeration.
#[derive(Debug, Clone)]
pub struct RemoteChannel {
    pub id: u64,
    pub name: String,
    pub kind: ChannelKind,
    /// Owning category, when this is a text channel filed under one.
    pub category: Option<(u64, String)>,
    pub topic: Option<String>,
}

/// A thread attached to a channel. `message_count` is the platform's own
/// tally, consulted before any history fetch.
#[derive(Debug, Clone)]
pub struct RemoteThread {
    pub id: u64,
    pub name: String,
    pub message_count: u64,
}

/// A reaction as reported on a remote message.
#[derive(Debug, Clone)]
pub struct RemoteReaction {
    pub emoji: String,
    pub count: u64,
}

/// A message as delivered by the platform's history pagination.
#[derive(Debug, Clone)]
pub struct RemoteMessage {
    pub id: u64,
    pub author_id: u64,
    pub author_name: String,
    pub content: String,
    pub clean_content: String,
    pub timestamp: DateTime<Utc>,
    pub attachments: Vec<String>,
    pub reactions: Vec<RemoteReaction>,
    pub reply_to: Option<u64>,
}

/// Read-only view of a remote guild hierarchy.
///
/// History methods yield complete, oldest-first message lists; pagination is
/// the implementation's concern. All methods are suspension points; none of
/// them are ever called concurrently by the crawler.
pub trait GuildClient {
    /// Resolves once the underlying connection is established and the
    /// hierarchy can be enumerated.
    fn ready(&self) -> impl Future<Output = ()> + Send;

    fn fetch_guild(&self, guild_id: u64)
    -> impl Future<Output = Result<RemoteGuild, ClientError>> + Send;

    /// Every channel in the guild, categories included, in the platform's
    /// enumeration order.
    fn fetch_channels(
        &self,
        guild_id: u64,
    ) -> impl Future<Output = Result<Vec<RemoteChannel>, ClientError>> + Send;

    /// Full message history of a channel, oldest first.
    fn channel_history(
        &self,
        channel_id: u64,
    ) -> impl Future<Output = Result<Vec<RemoteMessage>, ClientError>> + Send;

    /// Currently pinned messages of a channel.
    fn pinned_messages(
        &self,
        channel_id: u64,
    ) -> impl Future<Output = Result<Vec<RemoteMessage>, ClientError>> + Send;

    /// Threads currently active under a channel.
    fn active_threads(
        &self,
        channel_id: u64,
    ) -> impl Future<Output = Result<Vec<RemoteThread>, ClientError>> + Send;

    /// Threads archived under a channel.
    fn archived_threads(
        &self,
        channel_id: u64,
    ) -> impl Future<Output = Result<Vec<RemoteThread>, ClientError>> + Send;

    /// Full message history of a thread, oldest first.
    fn thread_history(
        &self,
        thread_id: u64,
    ) -> impl Future<Output = Result<Vec<RemoteMessage>, ClientError>> + Send;
}
