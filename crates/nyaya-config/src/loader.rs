//! Config file loading: read from path or platform default.

use std::path::{Path, PathBuf};

use nyaya_common::ConfigError;
use tracing::info;

use crate::schema::NyayaConfig;
use crate::template::default_config_toml;

/// Get the platform-specific default config file path.
///
/// On macOS: `~/Library/Application Support/nyaya/config.toml`
/// On Linux: `~/.config/nyaya/config.toml`
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("nyaya").join("config.toml"))
}

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
pub fn load_from_path(path: &Path) -> Result<NyayaConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::FileNotFound(path.to_path_buf())
        } else {
            ConfigError::ParseError(format!("failed to read {}: {e}", path.display()))
        }
    })?;

    let config: NyayaConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// If the file does not exist, creates a default config file and returns
/// defaults.
pub fn load_default() -> Result<NyayaConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(NyayaConfig::default())
        }
        Err(e) => Err(e),
    }
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, default_config_toml()).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_from_nonexistent_returns_file_not_found() {
        let result = load_from_path(Path::new("/tmp/nonexistent_nyaya_config.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn load_valid_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r##"
[model]
name = "gemini-2.5-pro"
temperature = 0.2
"##,
        )
        .unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.model.name, "gemini-2.5-pro");
        assert!((config.model.temperature - 0.2).abs() < f64::EPSILON);
        // Defaults preserved
        assert_eq!(config.model.max_tokens, 4096);
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn load_invalid_toml_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[model\nname = ").unwrap();

        let result = load_from_path(&path);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn default_template_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        create_default_config(&path).unwrap();
        assert!(path.exists());

        let config = load_from_path(&path).unwrap();
        assert_eq!(config.model.name, "gemini-2.0-flash");
    }

    #[test]
    fn storage_override_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\ndata_dir = \"/tmp/nyaya-data\"\n").unwrap();

        let config = load_from_path(&path).unwrap();
        assert_eq!(
            config.storage.data_dir.as_deref(),
            Some(Path::new("/tmp/nyaya-data"))
        );
    }
}
