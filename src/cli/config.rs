//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::OwnerId;

/// Owner used when neither the CLI, the config file nor `$USER` names one.
pub const DEFAULT_USER: &str = "default";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default database file
    pub database: Option<PathBuf>,

    /// Default user whose notes are read and written
    pub user: Option<String>,

    /// Editor command for editing notes
    pub editor: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// Default: `~/.config/fastnote/config.toml`
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fastnote")
            .join("config.toml")
    }

    /// Returns the default database location.
    ///
    /// Default: `~/.local/share/fastnote/notes.db`
    pub fn default_database() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fastnote")
            .join("notes.db")
    }

    /// Resolve the database path, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--db` argument
    /// 2. Config file `database` setting
    /// 3. The platform data directory
    pub fn database(&self, cli_db: Option<&PathBuf>) -> PathBuf {
        cli_db
            .cloned()
            .or_else(|| self.database.clone())
            .unwrap_or_else(Self::default_database)
    }

    /// Resolve the acting user.
    ///
    /// Precedence order:
    /// 1. CLI `--user` argument
    /// 2. Config file `user` setting
    /// 3. $USER environment variable
    /// 4. "default" as fallback
    pub fn owner(&self, cli_user: Option<&str>) -> Result<OwnerId> {
        let name = cli_user
            .map(str::to_string)
            .or_else(|| self.user.clone())
            .or_else(|| std::env::var("USER").ok().filter(|u| !u.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_USER.to_string());

        OwnerId::new(&name).with_context(|| format!("invalid user '{}'", name))
    }

    /// Resolve the editor command.
    ///
    /// Precedence order:
    /// 1. Config file `editor` setting
    /// 2. $EDITOR environment variable
    /// 3. $VISUAL environment variable
    /// 4. "vi" as fallback
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| "vi".to_string())
    }
}
