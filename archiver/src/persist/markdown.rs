//! Human-readable directory export: one directory per server and category,
//! one markdown document per channel and per thread.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use super::sanitize::sanitize_name;
use crate::model::message::ArchivedMessage;
use crate::model::server::{ChannelData, ChatThread, ServerData};

/// Write the server tree as a markdown directory under `output_directory`.
/// Returns the server's root directory.
pub fn save_as_markdown_directory(
    server: &ServerData,
    output_directory: &Path,
) -> io::Result<PathBuf> {
    let server_dir = output_directory.join(sanitize_name(&server.name));
    fs::create_dir_all(&server_dir)?;

    for category in server.categories.values() {
        let category_dir = server_dir.join(sanitize_name(&category.name));
        fs::create_dir_all(&category_dir)?;

        for channel in category.channels.values() {
            let channel_stem = sanitize_name(&channel.name);
            fs::write(
                category_dir.join(format!("{channel_stem}.md")),
                render_channel(channel),
            )?;

            if !channel.chat_threads.is_empty() {
                let threads_dir = category_dir.join(format!("{channel_stem}-threads"));
                fs::create_dir_all(&threads_dir)?;
                for thread in channel.chat_threads.values() {
                    fs::write(
                        threads_dir.join(format!("{}.md", sanitize_name(&thread.name))),
                        render_thread(thread),
                    )?;
                }
            }
        }
    }

    info!(path = %server_dir.display(), "saved markdown directory");
    Ok(server_dir)
}

fn render_message(doc: &mut String, message: &ArchivedMessage) {
    let _ = writeln!(
        doc,
        "**{}** ({}):",
        message.author.name,
        message.timestamp.to_rfc3339()
    );
    let _ = writeln!(doc, "{}\n", message.clean_content);
    for attachment in &message.attachments {
        let _ = writeln!(doc, "- attachment: {attachment}");
    }
    if !message.attachments.is_empty() {
        doc.push('\n');
    }
}

fn render_channel(channel: &ChannelData) -> String {
    let mut doc = String::new();
    let _ = writeln!(doc, "# Channel: {}\n", channel.name);
    if let Some(category) = &channel.category_name {
        let _ = writeln!(doc, "Category: {category}");
    }
    let _ = writeln!(doc, "Server: {}\n", channel.server_name);
    if let Some(topic) = &channel.description_prompt {
        let _ = writeln!(doc, "Topic: {topic}\n");
    }

    let _ = writeln!(doc, "## Messages\n");
    for message in &channel.messages {
        render_message(&mut doc, message);
    }

    if !channel.pinned_messages.is_empty() {
        let _ = writeln!(doc, "## Pinned messages\n");
        for message in &channel.pinned_messages {
            render_message(&mut doc, message);
        }
    }

    if !channel.bot_prompt_messages.is_empty() {
        let _ = writeln!(doc, "## Bot prompts\n");
        for message in &channel.bot_prompt_messages {
            render_message(&mut doc, message);
        }
    }
    doc
}

fn render_thread(thread: &ChatThread) -> String {
    let mut doc = String::new();
    let _ = writeln!(doc, "# Thread: {}\n", thread.name);
    let _ = writeln!(doc, "Channel: {}", thread.channel_name);
    if let Some(category) = &thread.category_name {
        let _ = writeln!(doc, "Category: {category}");
    }
    let _ = writeln!(doc, "Server: {}\n", thread.server_name);

    let _ = writeln!(doc, "## Messages\n");
    for message in &thread.messages {
        render_message(&mut doc, message);
    }
    doc
}
