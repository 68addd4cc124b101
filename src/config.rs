//! Configuration for simlog
//!
//! Centralized configuration with sensible defaults. The storage engine never
//! reads the environment itself; everything it needs arrives through `Config`.

use std::path::PathBuf;

use crate::error::{LogError, Result};

/// Main configuration for a simlog instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for all files
    /// Internal structure:
    ///   {log_dir}/
    ///     ├── log      (binary entry log)
    ///     └── entry    (scratch file handed to the editor)
    pub log_dir: PathBuf,

    /// File name of the binary log inside `log_dir`
    pub log_file_name: String,

    /// File name of the editor scratch file inside `log_dir`
    pub entry_file_name: String,

    // -------------------------------------------------------------------------
    // Entry Source Configuration
    // -------------------------------------------------------------------------
    /// Editor command used to compose new entries (usually `$EDITOR`)
    pub editor: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from(Self::LOG_DIR_NAME),
            log_file_name: "log".to_string(),
            entry_file_name: "entry".to_string(),
            editor: None,
        }
    }
}

impl Config {
    const LOG_DIR_NAME: &'static str = ".simlog";

    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Build a config from the process environment
    ///
    /// Uses `$HOME/.simlog` as the log directory and `$EDITOR` as the editor.
    pub fn from_env() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| LogError::Config("could not determine home directory".to_string()))?;

        let editor = std::env::var("EDITOR").ok().filter(|e| !e.trim().is_empty());

        Ok(Self::builder()
            .log_dir(home.join(Self::LOG_DIR_NAME))
            .editor(editor)
            .build())
    }

    /// Path of the binary log file
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(&self.log_file_name)
    }

    /// Path of the editor scratch file
    pub fn entry_path(&self) -> PathBuf {
        self.log_dir.join(&self.entry_file_name)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the log directory (root for all files)
    pub fn log_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_dir = path.into();
        self
    }

    /// Set the log file name
    pub fn log_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.log_file_name = name.into();
        self
    }

    /// Set the editor scratch file name
    pub fn entry_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.entry_file_name = name.into();
        self
    }

    /// Set the editor command
    pub fn editor(mut self, editor: Option<String>) -> Self {
        self.config.editor = editor;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
