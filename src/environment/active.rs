//! Process-wide environment selected at startup.

use std::sync::OnceLock;

use tracing::debug;

use super::{Environment, EnvironmentError};

static ACTIVE: OnceLock<Environment> = OnceLock::new();

/// Publish the startup environment. Can only succeed once per process.
pub fn init(environment: Environment) -> Result<&'static Environment, EnvironmentError> {
    ACTIVE
        .set(environment)
        .map_err(|_| EnvironmentError::AlreadyInitialized)?;

    let active = get().ok_or(EnvironmentError::AlreadyInitialized)?;
    debug!(production = active.production(), "active environment initialized");
    Ok(active)
}

/// The published environment, if `init` has run.
pub fn get() -> Option<&'static Environment> {
    ACTIVE.get()
}
