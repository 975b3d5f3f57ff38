//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use orgchart::{ChartError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for ChartError {
    fn from(err: ConfigError) -> Self {
        ChartError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (orgchart/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ChartError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("orgchart/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "orgchart", "orgchart") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file doesn't exist, cannot be read, or is not
/// valid configuration TOML.
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, ChartError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use orgchart::config::LayoutEngine;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_explicit_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[layout]\nengine = \"tidy\"\nline_depth_y = 150.0").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.layout().engine(), LayoutEngine::Tidy);
        assert_eq!(config.layout().line_depth_y(), 150.0);
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = load_config(Some("/definitely/not/here/config.toml"));
        assert!(matches!(result, Err(ChartError::Config(msg)) if msg.contains("Missing")));
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[layout\nengine = ").unwrap();

        let result = load_config(Some(file.path()));
        assert!(matches!(result, Err(ChartError::Config(msg)) if msg.contains("TOML")));
    }
}
