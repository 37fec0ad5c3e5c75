//! Application settings configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};
use crate::claim::DEFAULT_ROTATE_INTERVAL;
use crate::ui::DEFAULT_PLACEHOLDER;

/// Application-wide settings.
///
/// Every field has a default, so a config file only needs the values it
/// wants to change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Text shown in the empty input when no tip is available.
    pub placeholder: String,
    /// Milliseconds between placeholder tip changes.
    pub rotate_ms: u64,
    /// Example queries rotated through the empty input.
    pub tips: Vec<String>,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Simulated search latency in milliseconds.
    pub search_delay_ms: u64,
    /// Terms with no direct matches, mapped to suggested replacements.
    pub rewrites: BTreeMap<String, Vec<String>>,
}

impl Default for Settings {
    fn default() -> Self {
        let mut rewrites = BTreeMap::new();
        rewrites.insert("gym".to_string(), vec!["fitness center".to_string()]);
        rewrites.insert("pool".to_string(), vec!["swimming pool".to_string()]);
        rewrites.insert(
            "w/d".to_string(),
            vec!["washer".to_string(), "dryer".to_string()],
        );

        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            rotate_ms: DEFAULT_ROTATE_INTERVAL.as_millis() as u64,
            tips: vec![
                "2BR with hardwood floors near subway".to_string(),
                "Pet-friendly with balcony".to_string(),
                "Luxury building with gym and doorman".to_string(),
            ],
            tick_rate_ms: 100,
            search_delay_ms: 400,
            rewrites,
        }
    }
}

impl Settings {
    /// Validate these settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` if an interval is zero or a
    /// rewrite has no suggestions.
    pub fn validate(&self) -> Result<()> {
        if self.rotate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "rotate_ms must be greater than zero".to_string(),
            ));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        if let Some((term, _)) = self.rewrites.iter().find(|(_, s)| s.is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "rewrite for '{}' has no suggestions",
                term
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_rotate_rejected() {
        let settings = Settings {
            rotate_ms: 0,
            ..Settings::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("rotate_ms"));
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        let settings = Settings {
            tick_rate_ms: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_rewrite_rejected() {
        let mut settings = Settings::default();
        settings.rewrites.insert("loft".to_string(), Vec::new());
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("loft"));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: Settings = toml::from_str("rotate_ms = 1000").unwrap();
        assert_eq!(parsed.rotate_ms, 1000);
        assert_eq!(parsed.placeholder, DEFAULT_PLACEHOLDER);
        assert_eq!(parsed.tick_rate_ms, 100);
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings::default();
        let toml_str = toml::to_string(&settings).unwrap();
        let parsed: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
    }
}
