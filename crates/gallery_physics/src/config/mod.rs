//! Configuration system
//!
//! Configuration structs are plain serde types. Files are read and written by
//! extension: `.toml` through `toml`, `.ron` through `ron`.

use std::time::Duration;

pub use serde::{Serialize, Deserialize};

use crate::foundation::time::DEFAULT_TICK_HZ;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Check that the values make sense together
    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }

    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        let config: Self = if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A value is out of its allowed range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Physics engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Try the accelerated backend first; `false` goes straight to the fallback
    pub prefer_accelerated: bool,

    /// Upper bound on simultaneously live targets
    pub max_targets: usize,

    /// Seed for target placement; `None` draws from OS entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            prefer_accelerated: true,
            max_targets: 64,
            seed: None,
        }
    }
}

impl PhysicsConfig {
    /// Configuration that never uses the accelerated backend
    pub fn fallback_only() -> Self {
        Self {
            prefer_accelerated: false,
            ..Default::default()
        }
    }

    /// Set a fixed placement seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the target capacity
    pub fn with_max_targets(mut self, max_targets: usize) -> Self {
        self.max_targets = max_targets;
        self
    }
}

impl Config for PhysicsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_targets == 0 {
            return Err(ConfigError::Invalid("max_targets must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Game session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Targets spawned when the session starts
    pub initial_targets: usize,

    /// Delay before a hit target is replaced, in seconds
    pub replacement_delay_secs: f64,

    /// Update loop rate
    pub tick_hz: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            initial_targets: 5,
            replacement_delay_secs: 1.0,
            tick_hz: DEFAULT_TICK_HZ,
        }
    }
}

impl SessionConfig {
    /// Replacement delay as a `Duration`
    ///
    /// Negative or non-finite values clamp to zero.
    pub fn replacement_delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.replacement_delay_secs).unwrap_or(Duration::ZERO)
    }
}

impl Config for SessionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.replacement_delay_secs.is_finite() || self.replacement_delay_secs < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "replacement_delay_secs must be a non-negative number, got {}",
                self.replacement_delay_secs
            )));
        }
        if self.tick_hz == 0 {
            return Err(ConfigError::Invalid("tick_hz must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PhysicsConfig::default().validate().is_ok());
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_session_defaults_match_game_rules() {
        let config = SessionConfig::default();
        assert_eq!(config.initial_targets, 5);
        assert_eq!(config.replacement_delay(), Duration::from_secs(1));
        assert_eq!(config.tick_hz, 60);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = PhysicsConfig::default().with_max_targets(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_negative_delay_rejected() {
        let config = SessionConfig {
            replacement_delay_secs: -1.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert_eq!(config.replacement_delay(), Duration::ZERO);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: PhysicsConfig = toml::from_str("seed = 42\n").unwrap();
        assert_eq!(config.seed, Some(42));
        assert!(config.prefer_accelerated);
        assert_eq!(config.max_targets, 64);
    }

    #[test]
    fn test_ron_parse() {
        let config: SessionConfig =
            ron::from_str("(initial_targets: 3, replacement_delay_secs: 0.5)").unwrap();
        assert_eq!(config.initial_targets, 3);
        assert_eq!(config.replacement_delay(), Duration::from_millis(500));
        assert_eq!(config.tick_hz, 60);
    }

    #[test]
    fn test_save_and_load_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "gallery_physics_config_{}.toml",
            std::process::id()
        ));
        let path = path.to_string_lossy().to_string();

        let config = PhysicsConfig::fallback_only().with_seed(7);
        config.save_to_file(&path).unwrap();
        let loaded = PhysicsConfig::load_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let err = PhysicsConfig::default().save_to_file("physics.json").unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }
}
