//! Diagnostics raised when a tap cannot produce a spawn.

use bevy::prelude::*;
use bevy_ecs::prelude::On;
use log::error;
use thiserror::Error;

/// Event raised when a spawner's configuration prevents spawning.
///
/// Errors never propagate out of the touch handler. They are triggered as
/// observer events and logged by [`log_spawn_error`], which
/// [`crate::TapSpawnPlugin`] installs.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SpawnError {
    /// The spawner has no template configured.
    #[error("tap spawner {spawner} has no template entity configured")]
    MissingTemplate {
        /// Entity carrying the misconfigured `TapSpawner`.
        spawner: Entity,
    },
    /// The configured template no longer exists.
    #[error("tap spawner {spawner} references missing template {template}")]
    InvalidTemplate {
        /// Entity carrying the misconfigured `TapSpawner`.
        spawner: Entity,
        /// Template reference that failed to resolve.
        template: Entity,
    },
}

impl SpawnError {
    /// Spawner whose configuration failed.
    #[must_use]
    pub const fn spawner(&self) -> Entity {
        match *self {
            Self::MissingTemplate { spawner } | Self::InvalidTemplate { spawner, .. } => spawner,
        }
    }
}

/// Observer logging every [`SpawnError`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value."
)]
pub fn log_spawn_error(event: On<SpawnError>) {
    error!("tap spawn failed: {}", event.event());
}
