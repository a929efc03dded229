use std::path::Path;

use serde::Deserialize;
use tracing::info;

/// Top-level archiver configuration, loaded from archiver.toml.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct ArchiverConfig {
    pub crawl: CrawlSection,
    pub output: OutputSection,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CrawlSection {
    /// The guild to archive. Zero means "not configured".
    pub guild_id: u64,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Where the tree artifacts (json, snapshot, markdown) go.
    pub directory: String,
    /// Where the roster document goes.
    pub roster_directory: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: "output".into(),
            roster_directory: "output".into(),
        }
    }
}

impl ArchiverConfig {
    /// Load config from a TOML file. Falls back to defaults if the file doesn't exist.
    /// Environment variables override TOML values.
    pub fn load(path: &str) -> Self {
        let mut config = if Path::new(path).exists() {
            let contents = std::fs::read_to_string(path)
                .unwrap_or_else(|e| panic!("failed to read config file {}: {}", path, e));
            toml::from_str(&contents)
                .unwrap_or_else(|e| panic!("failed to parse config file {}: {}", path, e))
        } else {
            info!("No config file found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides();
        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("TARGET_GUILD_ID")
            && let Ok(id) = v.parse()
        {
            self.crawl.guild_id = id;
        }
        if let Ok(v) = std::env::var("OUTPUT_DIRECTORY") {
            self.output.directory = v;
        }
        if let Ok(v) = std::env::var("ROSTER_DIRECTORY") {
            self.output.roster_directory = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_sections_are_missing() {
        let config: ArchiverConfig = toml::from_str("").unwrap();
        assert_eq!(config.crawl.guild_id, 0);
        assert_eq!(config.output.directory, "output");
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let config: ArchiverConfig = toml::from_str(
            r#"
            [crawl]
            guild_id = 1234
            "#,
        )
        .unwrap();
        assert_eq!(config.crawl.guild_id, 1234);
        assert_eq!(config.output.roster_directory, "output");
    }
}
