//! Persistence layer: three independent exports of the server tree (JSON
//! interchange, binary snapshot, markdown directory) plus the bound-roster
//! document. Each export is idempotent; a failure is tagged with which
//! artifact it belongs to and already-written siblings are left in place.

pub mod markdown;
pub mod sanitize;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::error::{ArchiveError, Artifact};
use crate::model::roster::ClassRoster;
use crate::model::server::ServerData;
use self::sanitize::sanitize_name;

/// The artifact paths produced by one [`save_server_to_disk`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifacts {
    pub json: PathBuf,
    pub snapshot: PathBuf,
    pub markdown: PathBuf,
}

/// Serialize the server tree as a JSON interchange document.
///
/// When `output` is an existing file the document is written directly to it;
/// otherwise `output` is treated as a directory (created if absent) and the
/// file is named `<server>_<timestamp>.json`.
pub fn save_server_json(server: &ServerData, output: &Path) -> Result<PathBuf, ArchiveError> {
    let json_path = if output.is_file() {
        output.to_path_buf()
    } else {
        fs::create_dir_all(output)
            .map_err(|e| ArchiveError::artifact(Artifact::Interchange, output.to_path_buf(), e))?;
        let stem = sanitize_name(&format!("{}_{}", server.name, Local::now().to_rfc3339()));
        output.join(format!("{stem}.json"))
    };

    let json = serde_json::to_string(server)
        .map_err(|e| ArchiveError::artifact(Artifact::Interchange, json_path.clone(), e))?;
    fs::write(&json_path, json)
        .map_err(|e| ArchiveError::artifact(Artifact::Interchange, json_path.clone(), e))?;

    info!(path = %json_path.display(), "saved server data as json");
    Ok(json_path)
}

/// Read a previously saved interchange document back into a [`ServerData`].
pub fn load_server_json(path: &Path) -> Result<ServerData, ArchiveError> {
    let wrap = |e: anyhow::Error| ArchiveError::Load {
        path: path.to_path_buf(),
        source: e,
    };
    let json = fs::read_to_string(path).map_err(|e| wrap(e.into()))?;
    serde_json::from_str(&json).map_err(|e| wrap(e.into()))
}

/// Write the full-fidelity binary snapshot as a sibling of `json_path`
/// (same stem, `.bin` extension).
pub fn save_snapshot(server: &ServerData, json_path: &Path) -> Result<PathBuf, ArchiveError> {
    let snapshot_path = json_path.with_extension("bin");
    let bytes = bincode::serialize(server)
        .map_err(|e| ArchiveError::artifact(Artifact::Snapshot, snapshot_path.clone(), e))?;
    fs::write(&snapshot_path, bytes)
        .map_err(|e| ArchiveError::artifact(Artifact::Snapshot, snapshot_path.clone(), e))?;

    info!(path = %snapshot_path.display(), "saved server data snapshot");
    Ok(snapshot_path)
}

/// Reconstruct a server tree from a binary snapshot without re-crawling.
pub fn load_snapshot(path: &Path) -> Result<ServerData, ArchiveError> {
    let wrap = |e: anyhow::Error| ArchiveError::Load {
        path: path.to_path_buf(),
        source: e,
    };
    let bytes = fs::read(path).map_err(|e| wrap(e.into()))?;
    bincode::deserialize(&bytes).map_err(|e| wrap(e.into()))
}

/// Run all three tree exports against `output_dir`.
///
/// The first failing export aborts with its artifact tag; artifacts already
/// written stay on disk (no rollback across export kinds).
pub fn save_server_to_disk(
    output_dir: &Path,
    server: &ServerData,
) -> Result<SavedArtifacts, ArchiveError> {
    let json = save_server_json(server, output_dir)?;
    let snapshot = save_snapshot(server, &json)?;
    let markdown = markdown::save_as_markdown_directory(server, output_dir)
        .map_err(|e| ArchiveError::artifact(Artifact::Markdown, output_dir.to_path_buf(), e))?;

    Ok(SavedArtifacts {
        json,
        snapshot,
        markdown,
    })
}

/// Write the bound roster as `student_data_<timestamp>.json` under
/// `output_dir`, creating the directory if needed.
pub fn save_roster(output_dir: &Path, roster: &ClassRoster) -> Result<PathBuf, ArchiveError> {
    fs::create_dir_all(output_dir)
        .map_err(|e| ArchiveError::artifact(Artifact::Roster, output_dir.to_path_buf(), e))?;

    let stamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let roster_path = output_dir.join(format!("student_data_{stamp}.json"));
    let json = serde_json::to_string(roster)
        .map_err(|e| ArchiveError::artifact(Artifact::Roster, roster_path.clone(), e))?;
    fs::write(&roster_path, json)
        .map_err(|e| ArchiveError::artifact(Artifact::Roster, roster_path.clone(), e))?;

    info!(path = %roster_path.display(), "saved roster data");
    Ok(roster_path)
}
