//! Bevy plugin wiring tap spawning into the schedule.

use bevy::prelude::*;
use bevy_app::{App, Plugin, PostUpdate, Update};

use crate::clock::SpawnClock;
use crate::cloner::CloneRegistry;
use crate::controller::{
    arm_spawners_system, tap_spawn_system, TapSpawnState, TapSpawner, TouchStart,
};
use crate::error::log_spawn_error;
use crate::presentation::sync_transforms_system;
use crate::settings::SpawnSettings;

/// System set containing spawner activation and touch handling.
///
/// Hosts that hit-test touches in `Update` should order their input systems
/// `.before(TapSpawnSystems)` so touches are handled in the same frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TapSpawnSystems;

/// Plugin installing the tap-to-spawn behaviour.
///
/// # Responsibilities
///
/// - Registers [`TapSpawner`] and [`TapSpawnState`] for reflection.
/// - Adds the [`TouchStart`] message channel.
/// - Initialises [`SpawnSettings`], [`SpawnClock`] and [`CloneRegistry`]
///   unless the app already provides them.
/// - Logs every [`crate::SpawnError`] through an observer.
/// - Arms new spawners, then handles touches, in [`TapSpawnSystems`].
/// - Projects spawned attributes onto `Transform` in `PostUpdate`.
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use tap_spawn::{TapSpawnPlugin, TouchStart};
///
/// let mut app = App::new();
/// app.add_plugins(TapSpawnPlugin);
/// assert!(app.world().contains_resource::<Messages<TouchStart>>());
/// ```
#[derive(Debug, Default)]
pub struct TapSpawnPlugin;

impl Plugin for TapSpawnPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TapSpawner>();
        app.register_type::<TapSpawnState>();
        app.add_message::<TouchStart>();

        app.init_resource::<SpawnSettings>();
        app.init_resource::<SpawnClock>();
        app.init_resource::<CloneRegistry>();

        app.add_observer(log_spawn_error);

        app.add_systems(
            Update,
            (arm_spawners_system, tap_spawn_system)
                .chain()
                .in_set(TapSpawnSystems),
        );
        app.add_systems(PostUpdate, sync_transforms_system);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use rstest::rstest;

    #[rstest]
    fn plugin_initialises_resources() {
        let mut app = App::new();
        app.add_plugins(TapSpawnPlugin);
        assert!(app.world().contains_resource::<SpawnSettings>());
        assert!(app.world().contains_resource::<SpawnClock>());
        assert!(app.world().contains_resource::<CloneRegistry>());
        assert!(app.world().contains_resource::<Messages<TouchStart>>());
    }

    #[rstest]
    fn plugin_keeps_preinserted_settings() {
        let mut app = App::new();
        app.insert_resource(SpawnSettings {
            debounce_ms: 50,
            ..SpawnSettings::default()
        });
        app.insert_resource(SpawnClock::new(ManualClock::starting_at(9)));
        app.add_plugins(TapSpawnPlugin);

        assert_eq!(app.world().resource::<SpawnSettings>().debounce_ms, 50);
        assert_eq!(app.world().resource::<SpawnClock>().now_ms(), 9);
    }
}
