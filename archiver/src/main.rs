use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use guildscribe_archiver::config::ArchiverConfig;
use guildscribe_archiver::model::roster::ClassRoster;
use guildscribe_archiver::persist;
use guildscribe_archiver::{bind_and_save_roster, persist::load_server_json};

/// Archive tooling over saved guild snapshots. The live platform crawl runs
/// through the library's `run_crawl` entry point with a connected
/// `GuildClient`; this binary works on interchange documents it produced.
#[derive(Parser)]
#[command(name = "guildscribe", version, about)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, default_value = "archiver.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load a saved interchange document and re-emit all three artifacts.
    Export {
        /// A previously saved server JSON document.
        #[arg(long)]
        input: PathBuf,
        /// Output directory; defaults to the configured one.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Bind a class roster against a saved snapshot and write the roster
    /// document.
    Roster {
        /// A previously saved server JSON document.
        #[arg(long)]
        snapshot: PathBuf,
        /// The roster JSON (students keyed by hex id).
        #[arg(long)]
        roster: PathBuf,
        /// Output directory; defaults to the configured roster directory.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ArchiverConfig::load(&cli.config);

    match cli.command {
        Command::Export { input, output } => {
            let output = output.unwrap_or_else(|| PathBuf::from(&config.output.directory));
            let server = load_server_json(&input)?;
            let artifacts = persist::save_server_to_disk(&output, &server)?;
            info!(
                json = %artifacts.json.display(),
                snapshot = %artifacts.snapshot.display(),
                markdown = %artifacts.markdown.display(),
                "export complete"
            );
        }
        Command::Roster {
            snapshot,
            roster,
            output,
        } => {
            let output = output.unwrap_or_else(|| PathBuf::from(&config.output.roster_directory));
            let server = load_server_json(&snapshot)?;
            let roster_json = std::fs::read_to_string(&roster)
                .with_context(|| format!("failed to read roster file {}", roster.display()))?;
            let mut class_roster: ClassRoster = serde_json::from_str(&roster_json)
                .with_context(|| format!("failed to parse roster file {}", roster.display()))?;

            let path = bind_and_save_roster(&server, &mut class_roster, &output)?;
            info!(path = %path.display(), "roster export complete");
        }
    }
    Ok(())
}
