//! Configuration management for claimtags.
//!
//! Settings are read from a TOML file. The location is, in order of
//! precedence: an explicit path, the `CLAIMTAGS_CONFIG` environment
//! variable, then `<config dir>/claimtags/config.toml`. A missing file is
//! not an error; defaults are used instead.

mod settings;

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

pub use settings::Settings;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "CLAIMTAGS_CONFIG";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The config file exists but could not be read.
    #[error("failed to read config file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The config file is not valid TOML for [`Settings`].
    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The settings are well-formed but unusable.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Resolve the config file path.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("claimtags").join("config.toml"))
}

/// Load and validate settings from `path`, or defaults if it does not exist.
pub fn load_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        info!(path = %path.display(), "No config file, using defaults");
        return Ok(Settings::default());
    }
    let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
    let settings: Settings = toml::from_str(&contents)?;
    settings.validate()?;
    debug!(path = %path.display(), "Config loaded");
    Ok(settings)
}

/// Load settings from the resolved config path.
pub fn load(explicit: Option<&Path>) -> Result<Settings> {
    let path = config_path(explicit)?;
    load_from(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "placeholder = \"Find a flat\"").unwrap();
        writeln!(file, "rotate_ms = 500").unwrap();
        writeln!(file, "[rewrites]").unwrap();
        writeln!(file, "loft = [\"open plan\"]").unwrap();

        let settings = load_from(file.path()).unwrap();
        assert_eq!(settings.placeholder, "Find a flat");
        assert_eq!(settings.rotate_ms, 500);
        assert_eq!(
            settings.rewrites.get("loft").map(Vec::as_slice),
            Some(&["open plan".to_string()][..])
        );
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rotate_ms = \"soon\"").unwrap();
        let err = load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_invalid_values_are_validation_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tick_rate_ms = 0").unwrap();
        let err = load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    #[serial]
    fn test_explicit_path_wins_over_env() {
        std::env::set_var(CONFIG_ENV, "/tmp/from-env.toml");
        let path = config_path(Some(Path::new("/tmp/explicit.toml"))).unwrap();
        std::env::remove_var(CONFIG_ENV);
        assert_eq!(path, PathBuf::from("/tmp/explicit.toml"));
    }

    #[test]
    #[serial]
    fn test_env_path_used() {
        std::env::set_var(CONFIG_ENV, "/tmp/from-env.toml");
        let path = config_path(None).unwrap();
        std::env::remove_var(CONFIG_ENV);
        assert_eq!(path, PathBuf::from("/tmp/from-env.toml"));
    }

    #[test]
    #[serial]
    fn test_default_path_layout() {
        std::env::remove_var(CONFIG_ENV);
        if let Ok(path) = config_path(None) {
            assert!(path.ends_with("claimtags/config.toml"));
        }
    }
}
