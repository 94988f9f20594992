use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Picker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Show all directories before all files in the candidate list,
    /// preserving relative order within each group
    #[serde(default = "default_false")]
    pub group_directories_first: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            group_directories_first: false,
        }
    }
}

fn default_false() -> bool {
    false
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Default config file location (`<config dir>/quickopen/config.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("quickopen").join("config.json"))
    }

    /// Load from the default location; a missing file is the default
    /// config, a malformed one is downgraded to the default with a warning
    /// so the picker always starts.
    pub fn load() -> Self {
        let Some(path) = Config::default_path() else {
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }

        match Config::load_from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Config::default()
            }
        }
    }
}
