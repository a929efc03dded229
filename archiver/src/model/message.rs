use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::RemoteMessage;

/// The author of a captured message.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MessageAuthor {
    pub id: u64,
    pub name: String,
}

/// A reaction on a message. Only the emoji symbol is consumed downstream;
/// the count is kept for fidelity of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    pub emoji: String,
    pub count: u64,
}

/// A single captured message. Immutable once built from its remote record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchivedMessage {
    pub id: u64,
    pub author: MessageAuthor,
    /// Raw message content as delivered by the platform.
    pub content: String,
    /// Content with platform markup (mentions, channel links) resolved to text.
    pub clean_content: String,
    pub timestamp: DateTime<Utc>,
    /// Attachment URLs, in the order the platform reported them.
    pub attachments: Vec<String>,
    pub reactions: Vec<Reaction>,
    /// Message this one replies to, if any.
    pub reply_to: Option<u64>,
}

impl ArchivedMessage {
    /// Build an archived message by copying the remote record's fields.
    pub fn from_remote(remote: &RemoteMessage) -> Self {
        Self {
            id: remote.id,
            author: MessageAuthor {
                id: remote.author_id,
                name: remote.author_name.clone(),
            },
            content: remote.content.clone(),
            clean_content: remote.clean_content.clone(),
            timestamp: remote.timestamp,
            attachments: remote.attachments.clone(),
            reactions: remote
                .reactions
                .iter()
                .map(|r| Reaction {
                    emoji: r.emoji.clone(),
                    count: r.count,
                })
                .collect(),
            reply_to: remote.reply_to,
        }
    }

    /// True when any reaction on this message carries the given emoji.
    pub fn has_reaction(&self, emoji: &str) -> bool {
        self.reactions.iter().any(|r| r.emoji == emoji)
    }
}
