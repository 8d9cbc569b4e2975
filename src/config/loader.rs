//! Reading `DiverConfig` from disk.
use std::fmt;
use std::fs;
use std::path::Path;

use bevy::prelude::{info, warn};

use super::DiverConfig;

/// Location of the config file relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/diver.json";

/// Overrides `DEFAULT_CONFIG_PATH` when set.
pub const CONFIG_ENV_VAR: &str = "DEEPDIVE_CONFIG";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Parse(e) => write!(f, "failed to parse config: {e}"),
            ConfigError::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Read, parse and validate the config at `path`.
pub fn load_config(path: impl AsRef<Path>) -> Result<DiverConfig, ConfigError> {
    let text = fs::read_to_string(path.as_ref())?;
    let config: DiverConfig = serde_json::from_str(&text)?;
    config.validate()?;
    Ok(config)
}

/// Load the config from `path`, falling back to defaults on any error.
#[must_use]
pub fn load_or_default(path: impl AsRef<Path>) -> DiverConfig {
    let path = path.as_ref();
    match load_config(path) {
        Ok(config) => {
            info!("Loaded diver config from {}", path.display());
            config
        }
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("No config at {}, using defaults", path.display());
            DiverConfig::default()
        }
        Err(e) => {
            warn!("{} ({}), using defaults", e, path.display());
            DiverConfig::default()
        }
    }
}

/// The config path, honoring `CONFIG_ENV_VAR`.
pub fn config_path() -> String {
    std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("deepdive-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = load_config("definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let path = temp_file("bad.json", "{ \"weapon\": ");
        let result = load_config(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let path = temp_file("invalid.json", r#"{ "movement": { "max_speed": -5.0 } }"#);
        let result = load_config(&path);
        fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn load_or_default_falls_back() {
        let config = load_or_default("definitely/not/here.json");
        assert_eq!(config.weapon.fire_interval, DiverConfig::default().weapon.fire_interval);
    }

    #[test]
    fn load_or_default_falls_back_on_invalid_file() {
        let path = temp_file(
            "fallback.json",
            r#"{ "movement": { "max_speed": 999.0 }, "bubbles": { "boost_spread": -1.0 } }"#,
        );
        let config = load_or_default(&path);
        fs::remove_file(&path).ok();

        // Nothing from the rejected file leaks through
        assert_eq!(config.movement.max_speed, DiverConfig::default().movement.max_speed);
        assert_eq!(config.bubbles.boost_spread, DiverConfig::default().bubbles.boost_spread);
    }

    #[test]
    fn loads_valid_file() {
        let path = temp_file("ok.json", r#"{ "weapon": { "shooter_ignore_secs": 0.5 } }"#);
        let config = load_config(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.weapon.shooter_ignore_secs, 0.5);
    }
}
