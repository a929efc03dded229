//! Guildscribe: archives a chat community's full hierarchy (categories,
//! channels, threads, messages) into JSON, binary snapshot, and markdown
//! exports, and binds a class roster to the archived tree.

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod persist;


use std::path::{Path, PathBuf};

use crate::client::GuildClient;
use crate::engine::{Crawler, bind_roster};
use crate::error::ArchiveError;
use crate::model::roster::ClassRoster;
use crate::model::server::ServerData;
use crate::persist::SavedArtifacts;

/// Crawl `guild_id` through `client` and write all three tree artifacts under
/// `output_dir`.
///
/// Waits for the client's readiness signal before walking. Dropping the
/// returned future is the one cancellation point for the whole pipeline.
pub async fn run_crawl<C: GuildClient>(
    client: C,
    guild_id: u64,
    output_dir: &Path,
) -> Result<SavedArtifacts, ArchiveError> {
    client.ready().await;
    let crawler = Crawler::new(client);
    let server = crawler.scrape_server(guild_id).await?;
    persist::save_server_to_disk(output_dir, &server)
}

/// Bind `roster` against an archived tree and write the roster artifact.
pub fn bind_and_save_roster(
    server: &ServerData,
    roster: &mut ClassRoster,
    output_dir: &Path,
) -> Result<PathBuf, ArchiveError> {
    bind_roster(server, roster)?;
    persist::save_roster(output_dir, roster)
}
