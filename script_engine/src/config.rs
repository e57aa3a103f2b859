//! Engine configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EngineError, Result};

/// Configuration for graph traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Maximum nodes executed in one synchronous run before it is cut off.
    pub max_steps_per_run: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            max_steps_per_run: 1024,
        }
    }
}

/// Configuration for dialogue sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ConversationConfig {
    /// Emit `ConversationEnded` when a session is cancelled from outside.
    pub emit_end_on_cancel: bool,
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub interpreter: InterpreterConfig,
    pub conversation: ConversationConfig,
}

impl EngineConfig {
    /// Parse configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|_| EngineError::ConfigNotFound(path.display().to_string()))?;
        Self::from_toml_str(&content)
    }
}
