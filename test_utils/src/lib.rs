//! Shared fixtures for tap spawning integration tests.

use bevy::prelude::*;
use tap_spawn::{
    ManualClock, SpawnClock, SpawnSettings, SpawnedFrom, TapSpawnPlugin, TapSpawner, TouchStart,
};

/// Clock reading at which every test app starts.
pub const START_MS: u64 = 10_000;

/// Headless app with the tap spawn plugin and a manually driven clock.
#[derive(Debug)]
pub struct TapSpawnTestApp {
    /// The wrapped Bevy app.
    pub app: App,
    /// Handle to the clock the app reads.
    pub clock: ManualClock,
}

impl TapSpawnTestApp {
    /// Builds an app seeded for reproducible scales.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_settings(SpawnSettings {
            rng_seed: Some(seed),
            ..SpawnSettings::default()
        })
    }

    /// Builds an app with explicit settings.
    #[must_use]
    pub fn with_settings(settings: SpawnSettings) -> Self {
        let clock = ManualClock::starting_at(START_MS);
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(settings);
        app.insert_resource(SpawnClock::new(clock.clone()));
        app.add_plugins(TapSpawnPlugin);
        Self { app, clock }
    }

    /// Spawns a template entity from any bundle of attributes.
    pub fn spawn_template(&mut self, attributes: impl Bundle) -> Entity {
        self.app.world_mut().spawn(attributes).id()
    }

    /// Spawns a spawner and runs one frame so it is armed.
    pub fn spawn_armed(&mut self, spawner: TapSpawner) -> Entity {
        let entity = self.app.world_mut().spawn(spawner).id();
        self.app.update();
        entity
    }

    /// Delivers one touch and runs a frame to handle it.
    pub fn tap(&mut self, spawner: Entity, world_position: Vec3) {
        self.app.world_mut().write_message(TouchStart {
            spawner,
            world_position,
        });
        self.app.update();
    }

    /// Moves the clock forward.
    pub fn advance(&self, delta_ms: u64) {
        self.clock.advance(delta_ms);
    }

    /// Entities created by `spawner`, in spawn order.
    pub fn spawned_by(&mut self, spawner: Entity) -> Vec<Entity> {
        let world = self.app.world_mut();
        let mut query = world.query::<(Entity, &SpawnedFrom)>();
        let mut spawned: Vec<(u64, Entity)> = query
            .iter(world)
            .filter(|(_, origin)| origin.spawner == spawner)
            .map(|(entity, origin)| (origin.sequence, entity))
            .collect();
        spawned.sort_unstable_by_key(|(sequence, _)| *sequence);
        spawned.into_iter().map(|(_, entity)| entity).collect()
    }

    /// Number of entities in the world, disabled ones included.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        usize::try_from(self.app.world().entities().len()).unwrap_or(usize::MAX)
    }
}

/// Asserts two vectors agree component-wise within `f32::EPSILON`.
///
/// # Panics
/// Panics naming `what` when any component differs.
pub fn assert_vec3_eq(actual: Vec3, expected: Vec3, what: &str) {
    assert!(
        actual.abs_diff_eq(expected, f32::EPSILON),
        "{what}: expected {expected:?}, got {actual:?}"
    );
}
