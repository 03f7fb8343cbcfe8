//! Nyaya configuration system.
//!
//! TOML-based configuration with sensible defaults for every field, so a
//! missing or partial config file works out of the box.

pub mod loader;
pub mod schema;
mod template;

pub use loader::{create_default_config, default_config_path, load_default, load_from_path};
pub use schema::{AssistantConfig, ModelConfig, NyayaConfig, StorageConfig};

use nyaya_common::ConfigError;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creating a commented
/// default file if none exists.
pub fn load_config() -> Result<NyayaConfig, ConfigError> {
    loader::load_default()
}
