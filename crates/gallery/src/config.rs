//! Game configuration

use gallery_physics::config::{Config, ConfigError, PhysicsConfig, SessionConfig};
use serde::{Deserialize, Serialize};

/// Game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Round rules
    pub gameplay: GameplayConfig,

    /// Physics engine settings
    pub physics: PhysicsConfig,

    /// Session settings
    pub session: SessionConfig,
}

/// Gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Round length in seconds
    pub round_secs: u32,

    /// Points per confirmed hit
    pub points_per_hit: u32,

    /// Seconds between simulated shots
    pub shot_interval_secs: f64,

    /// Chance a simulated shot is aimed at a live target, 0.0 - 1.0
    pub accuracy: f64,

    /// Eye height of the simulated player
    pub eye_height: f64,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            round_secs: 10,
            points_per_hit: 10,
            shot_interval_secs: 0.4,
            accuracy: 0.8,
            eye_height: 1.6,
        }
    }
}

impl Config for GameConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let gameplay = &self.gameplay;
        if gameplay.round_secs == 0 {
            return Err(ConfigError::Invalid("round_secs must be at least 1".to_string()));
        }
        if !(gameplay.shot_interval_secs.is_finite() && gameplay.shot_interval_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "shot_interval_secs must be positive, got {}",
                gameplay.shot_interval_secs
            )));
        }
        if !(0.0..=1.0).contains(&gameplay.accuracy) {
            return Err(ConfigError::Invalid(format!(
                "accuracy must be within 0.0 - 1.0, got {}",
                gameplay.accuracy
            )));
        }
        self.physics.validate()?;
        self.session.validate()
    }
}

impl GameConfig {
    /// Load configuration from `path`, or the defaults when no path is given
    pub fn load_or_default(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }
}
