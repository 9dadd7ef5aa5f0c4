//! Backend acquisition
//!
//! Loading is the one potentially slow step of a session. It is async and
//! awaited once at session start, off the per-frame path.

use crate::config::{Config, PhysicsConfig};
use crate::engine::backend::{AcceleratedBackend, PhysicsBackend};
use crate::error::{PhysicsError, Result};

/// Produces the accelerated backend, or explains why it cannot
#[allow(async_fn_in_trait)]
pub trait BackendLoader {
    /// Bring up the accelerated backend
    async fn load(&self, config: &PhysicsConfig) -> Result<Box<dyn PhysicsBackend>>;
}

/// Default loader for [`AcceleratedBackend`]
///
/// Fails when the configuration is invalid or opts out of acceleration.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceleratedLoader;

impl BackendLoader for AcceleratedLoader {
    async fn load(&self, config: &PhysicsConfig) -> Result<Box<dyn PhysicsBackend>> {
        config.validate()?;
        if !config.prefer_accelerated {
            return Err(PhysicsError::BackendUnavailable(
                "disabled by configuration".to_string(),
            ));
        }
        Ok(Box::new(AcceleratedBackend::new(config)))
    }
}

/// Loader that always fails
///
/// Stands in for a platform where the accelerated path is missing.
#[derive(Debug, Clone)]
pub struct UnavailableLoader {
    reason: String,
}

impl UnavailableLoader {
    /// Loader failing with the given reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl BackendLoader for UnavailableLoader {
    async fn load(&self, _config: &PhysicsConfig) -> Result<Box<dyn PhysicsBackend>> {
        Err(PhysicsError::BackendUnavailable(self.reason.clone()))
    }
}
