use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::message::{ArchivedMessage, MessageAuthor};
use crate::client::{RemoteChannel, RemoteGuild, RemoteThread};

/// A bounded conversation spun off a channel.
///
/// Only threads whose platform-reported message count met the crawl threshold
/// exist in the tree at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatThread {
    pub name: String,
    pub id: u64,
    pub server_name: String,
    pub server_id: u64,
    pub category_name: Option<String>,
    pub category_id: Option<u64>,
    pub channel_name: String,
    pub channel_id: u64,
    /// Chronological, oldest first.
    pub messages: Vec<ArchivedMessage>,
}

impl ChatThread {
    pub fn from_remote(thread: &RemoteThread, parent: &ChannelData) -> Self {
        Self {
            name: thread.name.clone(),
            id: thread.id,
            server_name: parent.server_name.clone(),
            server_id: parent.server_id,
            category_name: parent.category_name.clone(),
            category_id: parent.category_id,
            channel_name: parent.name.clone(),
            channel_id: parent.id,
            messages: Vec::new(),
        }
    }
}

/// A persistent conversation stream and everything captured under it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelData {
    pub name: String,
    pub id: u64,
    pub server_name: String,
    pub server_id: u64,
    pub category_name: Option<String>,
    pub category_id: Option<u64>,
    /// The channel topic, when set upstream.
    pub description_prompt: Option<String>,
    /// Full history, chronological. Capture is exhaustive: empty messages
    /// are kept.
    pub messages: Vec<ArchivedMessage>,
    /// Pinned messages, fetched separately. May duplicate entries of
    /// `messages`; no deduplication is performed.
    pub pinned_messages: Vec<ArchivedMessage>,
    /// Threads keyed by `name:<name>,id:<id>`.
    pub chat_threads: BTreeMap<String, ChatThread>,
    /// Reaction-tagged prompt messages found in this channel, when its name
    /// qualified it for prompt extraction.
    pub bot_prompt_messages: Vec<ArchivedMessage>,
}

impl ChannelData {
    pub fn from_remote(channel: &RemoteChannel, guild: &RemoteGuild) -> Self {
        Self {
            name: channel.name.clone(),
            id: channel.id,
            server_name: guild.name.clone(),
            server_id: guild.id,
            category_name: channel.category.as_ref().map(|(_, name)| name.clone()),
            category_id: channel.category.as_ref().map(|(id, _)| *id),
            description_prompt: channel.topic.clone(),
            messages: Vec::new(),
            pinned_messages: Vec::new(),
            chat_threads: BTreeMap::new(),
            bot_prompt_messages: Vec::new(),
        }
    }
}

/// A named grouping of channels within a server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryData {
    pub name: String,
    pub id: u64,
    pub server_name: String,
    pub server_id: u64,
    /// Channels keyed by `name:<name>,id:<id>`.
    pub channels: BTreeMap<String, ChannelData>,
    /// Prompt messages aggregated from this category's qualifying channels.
    pub bot_prompt_messages: Vec<ArchivedMessage>,
}

impl CategoryData {
    pub fn from_remote(category: &RemoteChannel, guild: &RemoteGuild) -> Self {
        Self {
            name: category.name.clone(),
            id: category.id,
            server_name: guild.name.clone(),
            server_id: guild.id,
            channels: BTreeMap::new(),
            bot_prompt_messages: Vec::new(),
        }
    }
}

/// The root of an archived guild tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerData {
    pub name: String,
    pub id: u64,
    /// Categories keyed by `name:<name>,id:<id>`.
    pub categories: BTreeMap<String, CategoryData>,
    /// Prompt messages from qualifying channels that sit directly under the
    /// server, outside any category.
    pub bot_prompt_messages: Vec<ArchivedMessage>,
}

impl ServerData {
    pub fn from_remote(guild: &RemoteGuild) -> Self {
        Self {
            name: guild.name.clone(),
            id: guild.id,
            categories: BTreeMap::new(),
            bot_prompt_messages: Vec::new(),
        }
    }

    /// Distinct authors across every captured message in the tree.
    ///
    /// Recomputed on every call rather than cached, so the view can never go
    /// stale if the tree is touched after the crawl.
    pub fn member_identities(&self) -> BTreeSet<MessageAuthor> {
        let mut members = BTreeSet::new();
        let mut collect = |messages: &[ArchivedMessage]| {
            for message in messages {
                members.insert(message.author.clone());
            }
        };

        collect(&self.bot_prompt_messages);
        for category in self.categories.values() {
            collect(&category.bot_prompt_messages);
            for channel in category.channels.values() {
                collect(&channel.messages);
                collect(&channel.pinned_messages);
                collect(&channel.bot_prompt_messages);
                for thread in channel.chat_threads.values() {
                    collect(&thread.messages);
                }
            }
        }
        members
    }
}
