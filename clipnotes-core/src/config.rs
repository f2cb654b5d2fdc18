use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{DEFAULT_MAX_ITEMS, DEFAULT_POLL_INTERVAL_MS, DEFAULT_SUMMARY_LENGTH};

/// Configuration for ClipNotes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub watcher: WatcherConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of entries kept
    pub max_items: usize,
    /// Characters shown in list summaries before truncation
    pub summary_length: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Clipboard polling interval in milliseconds
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding saved history (None = ~/.local/share/clipnotes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            summary_length: DEFAULT_SUMMARY_LENGTH,
        }
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Load configuration from file, or create default if not exists
    pub fn load(path: Option<PathBuf>) -> anyhow::Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::default_path()?,
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            let config: Config = toml::from_str(&contents)
                .with_context(|| format!("Invalid config file {}", config_path.display()))?;
            config.validate()?;
            Ok(config)
        } else {
            // Create default config
            let config = Config::default();
            config.save(Some(config_path))?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: Option<PathBuf>) -> anyhow::Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::default_path()?,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.history.max_items == 0 {
            anyhow::bail!("history.max_items must be at least 1");
        }
        if self.watcher.poll_interval_ms == 0 {
            anyhow::bail!("watcher.poll_interval_ms must be at least 1");
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.watcher.poll_interval_ms)
    }

    /// Directory the history is saved in
    pub fn data_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.storage.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|p| p.join("clipnotes"))
                .context("No home directory for saved history"),
        }
    }

    fn default_path() -> anyhow::Result<PathBuf> {
        let mut p = dirs::config_dir().context("No config directory")?;
        p.push("clipnotes");
        p.push("config.toml");
        Ok(p)
    }
}

mod dirs {
    use std::path::PathBuf;

    /// `$HOME` joined with `parts`
    fn under_home(parts: &[&str]) -> Option<PathBuf> {
        let home = std::env::var_os("HOME")?;
        Some(parts.iter().fold(PathBuf::from(home), |path, part| path.join(part)))
    }

    pub fn config_dir() -> Option<PathBuf> {
        under_home(&[".config"])
    }

    pub fn data_dir() -> Option<PathBuf> {
        under_home(&[".local", "share"])
    }

}
