//! Data directory resolution and the optional `config.toml`.

use anyhow::{Context, Result};
use homebuy_core::deadline::DeadlineWindow;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";
pub const DB_FILE: &str = "homebuy.db";

/// User settings read from `<data dir>/config.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How many deadlines the status overview shows.
    pub deadline_preview: usize,
    pub urgent_days: i64,
    pub upcoming_days: i64,
}

impl Default for Config {
    fn default() -> Self {
        let window = DeadlineWindow::default();
        Self {
            deadline_preview: 5,
            urgent_days: window.urgent_days,
            upcoming_days: window.upcoming_days,
        }
    }
}

impl Config {
    /// Load the config file in `data_dir`. A missing file gives defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        if config.urgent_days > config.upcoming_days {
            anyhow::bail!(
                "urgent_days ({}) cannot exceed upcoming_days ({})",
                config.urgent_days,
                config.upcoming_days
            );
        }
        Ok(config)
    }

    pub fn window(&self) -> DeadlineWindow {
        DeadlineWindow {
            urgent_days: self.urgent_days,
            upcoming_days: self.upcoming_days,
        }
    }
}

/// Data directory: the explicit flag or env value, else the platform data dir.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    dirs::data_dir()
        .map(|d| d.join("homebuy"))
        .ok_or_else(|| anyhow::anyhow!("Cannot determine a data directory; pass --data-dir"))
}
