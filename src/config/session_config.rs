use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::rhythm_config::RhythmConfig;
use crate::command::{Command, CommandCatalog, default_commands};
use crate::util::error::ConfigError;

const CONFIG_FILE: &str = "beatmarch.json";

/// Everything a session is built from: tunables plus the command catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub rhythm: RhythmConfig,
    #[serde(default = "default_commands")]
    pub commands: Vec<Command>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rhythm: RhythmConfig::default(),
            commands: default_commands(),
        }
    }
}

impl SessionConfig {
    /// Loads config from the default config file.
    /// Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Loads config from a specified path.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("{} not found, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    /// Saves config to the default config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(CONFIG_FILE)
    }

    /// Saves config to a specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Validate the tunables and build the catalog.
    pub fn catalog(&self) -> Result<CommandCatalog, ConfigError> {
        self.rhythm.validate()?;
        CommandCatalog::new(self.commands.clone(), self.rhythm.button_count)
    }
}
