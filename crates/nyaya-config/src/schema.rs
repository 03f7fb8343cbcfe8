//! Configuration schema types for Nyaya.
//!
//! All structs use `serde(default)` so partial configs work correctly;
//! missing fields are filled with defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration for Nyaya.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NyayaConfig {
    pub model: ModelConfig,
    pub assistant: AssistantConfig,
    pub storage: StorageConfig,
}

/// Generation model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Gemini model name.
    pub name: String,
    /// Upper bound on reply length, in tokens (valid range: 1-8192).
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: "gemini-2.0-flash".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}

/// Assistant behavior settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Overrides the built-in persona prompt when set.
    pub system_prompt: Option<String>,
}

/// Session storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory for the session file. Defaults to the OS data directory.
    pub data_dir: Option<PathBuf>,
}
