//! The traversal engine: walks a live guild hierarchy top-down and produces
//! one fully populated [`ServerData`] tree.

use std::time::Duration;

use tracing::{error, info, warn};

use crate::client::{ChannelKind, ClientError, GuildClient, RemoteChannel, RemoteGuild, RemoteThread};
use crate::error::ArchiveError;
use crate::model::composite_key;
use crate::model::message::ArchivedMessage;
use crate::model::server::{CategoryData, ChannelData, ChatThread, ServerData};

/// Minimum number of messages a thread must report to be archived at all.
pub const MINIMUM_THREAD_MESSAGE_COUNT: u64 = 4;

/// Thread messages starting with this prefix are dropped during capture.
pub const THREAD_IGNORE_PREFIX: &str = "~";

/// Reaction marking a message as a bot prompt.
pub const BOT_PROMPT_EMOJI: &str = "🤖";

/// Pause between thread fetches. Rate-limit compliance towards the platform,
/// and a cooperative yield; must stay a suspension point, never a busy-wait.
const THREAD_FETCH_PAUSE: Duration = Duration::from_secs(1);

/// True for channels whose history is scanned for bot-prompt messages.
fn is_prompt_channel(name: &str) -> bool {
    name.contains("bot") || name.contains("prompt")
}

/// Walks the remote hierarchy through a [`GuildClient`] handle.
///
/// The handle is passed in at construction; the crawler holds no global
/// session state. One crawl produces one independent tree.
pub struct Crawler<C> {
    client: C,
}

impl<C: GuildClient> Crawler<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    // ── Server level ────────────────────────────────────────────────

    /// Crawl the whole guild into a [`ServerData`] tree.
    ///
    /// Permission denials on a single category or channel are logged and that
    /// sub-tree is skipped; any other failure aborts the crawl.
    pub async fn scrape_server(&self, guild_id: u64) -> Result<ServerData, ArchiveError> {
        let guild = self.client.fetch_guild(guild_id).await?;
        info!(guild = %guild.name, id = guild.id, "connected to guild");

        let mut server = ServerData::from_remote(&guild);
        let channels = self.client.fetch_channels(guild_id).await?;

        // Channels with no category are not part of any category record, but
        // qualifying ones still feed server-level prompts.
        for channel in &channels {
            if channel.kind == ChannelKind::Text
                && channel.category.is_none()
                && is_prompt_channel(&channel.name)
            {
                info!(channel = %channel.name, "extracting server-level prompts");
                match self.reaction_tagged_messages(channel.id, BOT_PROMPT_EMOJI).await {
                    Ok(prompts) => server.bot_prompt_messages.extend(prompts),
                    Err(ClientError::Forbidden) => {
                        warn!(channel = %channel.name, "missing access to prompt channel, skipping");
                    }
                    Err(err) => return Err(ArchiveError::Client(err)),
                }
            }
        }

        for category in channels.iter().filter(|c| c.kind == ChannelKind::Category) {
            let members: Vec<&RemoteChannel> = channels
                .iter()
                .filter(|c| {
                    c.kind == ChannelKind::Text
                        && c.category.as_ref().map(|(id, _)| *id) == Some(category.id)
                })
                .collect();

            match self.scrape_category(&guild, category, &members).await {
                Ok(data) => {
                    server
                        .categories
                        .insert(composite_key(&data.name, data.id), data);
                }
                Err(ClientError::Forbidden) => {
                    warn!(category = %category.name, "skipping category due to missing permissions");
                }
                Err(err) => {
                    error!(category = %category.name, %err, "error processing category");
                    return Err(ArchiveError::Crawl {
                        category: category.name.clone(),
                        source: err,
                    });
                }
            }
        }

        info!(
            members = server.member_identities().len(),
            categories = server.categories.len(),
            guild = %server.name,
            "finished processing guild"
        );
        Ok(server)
    }

    // ── Category level ──────────────────────────────────────────────

    async fn scrape_category(
        &self,
        guild: &RemoteGuild,
        category: &RemoteChannel,
        text_channels: &[&RemoteChannel],
    ) -> Result<CategoryData, ClientError> {
        info!(category = %category.name, "processing category");
        let mut data = CategoryData::from_remote(category, guild);

        for channel in text_channels {
            let channel_data = self.scrape_channel(guild, channel).await?;
            data.bot_prompt_messages
                .extend(channel_data.bot_prompt_messages.iter().cloned());
            data.channels
                .insert(composite_key(&channel_data.name, channel_data.id), channel_data);
        }

        info!(
            channels = data.channels.len(),
            category = %data.name,
            "processed channels in category"
        );
        Ok(data)
    }

    // ── Channel level ───────────────────────────────────────────────

    async fn scrape_channel(
        &self,
        guild: &RemoteGuild,
        channel: &RemoteChannel,
    ) -> Result<ChannelData, ClientError> {
        let mut data = ChannelData::from_remote(channel, guild);

        // Channel capture is exhaustive: empty messages are kept. A history
        // permission denial loses only the history, not the whole channel.
        match self.client.channel_history(channel.id).await {
            Ok(history) => {
                data.messages = history.iter().map(ArchivedMessage::from_remote).collect();
            }
            Err(ClientError::Forbidden) => {
                warn!(channel = %channel.name, "permission error extracting messages, skipping history");
            }
            Err(err) => return Err(err),
        }

        if is_prompt_channel(&channel.name) {
            data.bot_prompt_messages = data
                .messages
                .iter()
                .filter(|m| m.has_reaction(BOT_PROMPT_EMOJI))
                .cloned()
                .collect();
            info!(
                count = data.bot_prompt_messages.len(),
                channel = %channel.name,
                "found bot prompt messages"
            );
        }

        // Pins come from a separate call and are not cross-checked against
        // the history sequence.
        data.pinned_messages = self
            .client
            .pinned_messages(channel.id)
            .await?
            .iter()
            .map(ArchivedMessage::from_remote)
            .collect();

        let mut threads = self.client.active_threads(channel.id).await?;
        threads.extend(self.client.archived_threads(channel.id).await?);

        for thread in &threads {
            if thread.message_count < MINIMUM_THREAD_MESSAGE_COUNT {
                info!(
                    thread = %thread.name,
                    count = thread.message_count,
                    "dropping short thread"
                );
                continue;
            }
            let chat_thread = self.scrape_thread(thread, &data).await?;
            data.chat_threads
                .insert(composite_key(&chat_thread.name, chat_thread.id), chat_thread);
            tokio::time::sleep(THREAD_FETCH_PAUSE).await;
        }

        if data.chat_threads.is_empty() {
            warn!(channel = %channel.name, "no chat threads found in channel");
        } else {
            info!(
                threads = data.chat_threads.len(),
                channel = %channel.name,
                "processed threads in channel"
            );
        }
        Ok(data)
    }

    // ── Thread level ────────────────────────────────────────────────

    /// Thread capture is curated, unlike channel capture: empty messages and
    /// ignore-prefixed messages are dropped.
    async fn scrape_thread(
        &self,
        thread: &RemoteThread,
        parent: &ChannelData,
    ) -> Result<ChatThread, ClientError> {
        let mut data = ChatThread::from_remote(thread, parent);

        for message in self.client.thread_history(thread.id).await? {
            if message.content.is_empty() && message.attachments.is_empty() {
                continue;
            }
            if message.content.starts_with(THREAD_IGNORE_PREFIX) {
                continue;
            }
            data.messages.push(ArchivedMessage::from_remote(&message));
        }

        if data.messages.is_empty() {
            warn!(thread = %thread.name, "no messages found in thread");
        } else {
            info!(count = data.messages.len(), thread = %thread.name, "captured thread");
        }
        Ok(data)
    }

    /// Scan a channel's full history for messages carrying `emoji`.
    async fn reaction_tagged_messages(
        &self,
        channel_id: u64,
        emoji: &str,
    ) -> Result<Vec<ArchivedMessage>, ClientError> {
        let tagged: Vec<ArchivedMessage> = self
            .client
            .channel_history(channel_id)
            .await?
            .iter()
            .map(ArchivedMessage::from_remote)
            .filter(|m| m.has_reaction(emoji))
            .collect();
        info!(count = tagged.len(), channel_id, "found reaction-tagged messages");
        Ok(tagged)
    }
}
