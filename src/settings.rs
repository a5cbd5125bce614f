//! Runtime configuration shared by every tap spawner in the app.

use bevy::prelude::*;

use crate::attributes::Easing;

/// Minimum gap in milliseconds between two accepted taps on one spawner.
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
/// Length of the grow-in animation applied to each spawned entity.
pub const DEFAULT_GROW_DURATION_MS: u32 = 400;

/// Tuning knobs for tap handling and the entry animation.
///
/// Insert a customised copy before or after adding
/// [`crate::TapSpawnPlugin`]; the plugin only fills in a default when none
/// exists.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use tap_spawn::{SpawnSettings, TapSpawnPlugin};
///
/// let mut app = App::new();
/// app.insert_resource(SpawnSettings {
///     rng_seed: Some(7),
///     ..SpawnSettings::default()
/// });
/// app.add_plugins(TapSpawnPlugin);
/// assert_eq!(app.world().resource::<SpawnSettings>().rng_seed, Some(7));
/// ```
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SpawnSettings {
    /// Taps arriving this many milliseconds or fewer after the last accepted
    /// tap are ignored.
    pub debounce_ms: u64,
    /// Duration of the grow-in scale animation.
    pub grow_duration_ms: u32,
    /// Curve of the grow-in scale animation.
    pub grow_easing: Easing,
    /// Seed for entry-scale sampling. `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            grow_duration_ms: DEFAULT_GROW_DURATION_MS,
            grow_easing: Easing::QuadraticOut,
            rng_seed: None,
        }
    }
}
