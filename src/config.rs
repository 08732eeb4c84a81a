use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Mode;

/// Session settings, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Mode used by [`GameInstance::start`](crate::GameInstance::start).
    pub mode: Mode,
    /// In player-vs-computer games, answer every successful human move made
    /// through [`GameInstance::play`](crate::GameInstance::play) with the
    /// computer's move.
    pub computer_replies: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            mode: Mode::PlayerVsComputer,
            computer_replies: true,
        }
    }
}

impl SessionConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }
}
