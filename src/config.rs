//! Configuration management with YAML support

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub links: LinkConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

/// Where conversation snapshots are read from during `sync`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub snapshot_path: Option<String>,
}

/// Permalink construction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Workspace URL, e.g. https://example.slack.com
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

// Default value functions
fn default_database_path() -> String {
    "~/.local/share/slackbox/slackbox.db".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_page_size() -> usize {
    10
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    /// Searches in order:
    /// 1. Provided path
    /// 2. ./slackbox.yaml (current directory)
    /// 3. ~/.config/slackbox/slackbox.yaml
    pub fn load(path: &str) -> Result<Self> {
        let mut search_paths = vec![
            PathBuf::from(shellexpand::tilde(path).to_string()),
            PathBuf::from("slackbox.yaml"),
        ];
        if let Some(config_dir) = dirs::config_dir() {
            search_paths.push(config_dir.join("slackbox").join("slackbox.yaml"));
        }

        for search_path in &search_paths {
            if search_path.exists() {
                let content = std::fs::read_to_string(search_path)
                    .with_context(|| format!("Failed to read {}", search_path.display()))?;
                let config: Config = serde_yaml::from_str(&content)
                    .with_context(|| format!("Invalid config {}", search_path.display()))?;
                return Ok(config);
            }
        }

        // No config file found, use defaults
        Ok(Config::default())
    }

    /// Get the database path, expanding ~ to home directory
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.database.path).to_string())
    }

    /// Get the snapshot path, if configured
    pub fn snapshot_path(&self) -> Option<PathBuf> {
        self.source
            .snapshot_path
            .as_ref()
            .map(|p| PathBuf::from(shellexpand::tilde(p).to_string()))
    }

    /// Build a permalink to message `ts` in conversation `id`.
    /// Returns None when no base URL is configured.
    pub fn link_for(&self, id: &str, ts: &str) -> Option<String> {
        let base = self.links.base_url.as_deref()?.trim_end_matches('/');
        Some(format!("{}/archives/{}/p{}", base, id, ts.replace('.', "")))
    }
}
