//! Error types for the target physics core
//!
//! These never reach the host: the [`PhysicsEngine`](crate::engine::PhysicsEngine)
//! facade logs them and substitutes a safe default.

use thiserror::Error;

use crate::config::ConfigError;
use crate::physics::TargetId;

/// Physics core errors
#[derive(Debug, Error)]
pub enum PhysicsError {
    /// A target with this id is already live
    #[error("Target {0} is already live")]
    DuplicateTarget(TargetId),

    /// The registry is full
    #[error("Target capacity of {capacity} reached")]
    CapacityExceeded {
        /// Configured maximum number of live targets
        capacity: usize,
    },

    /// An input vector had NaN or infinite components
    #[error("Non-finite {0} vector")]
    NonFiniteInput(&'static str),

    /// The accelerated backend could not be brought up
    #[error("Accelerated backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Configuration rejected during load
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for physics operations
pub type Result<T> = std::result::Result<T, PhysicsError>;
