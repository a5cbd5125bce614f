//! Tap-to-spawn controller.
//!
//! A [`TapSpawner`] entity listens for [`TouchStart`] messages addressed to
//! it. Each spawner moves through two phases: it starts
//! [`SpawnerPhase::Uninitialized`], and [`arm_spawners_system`] arms it once,
//! hiding its template. An armed spawner accepts a tap only when more than
//! [`SpawnSettings::debounce_ms`] have passed since the last accepted tap. An
//! accepted tap clones the template, places the clone at the touched world
//! position, and gives it a grow-in [`ScaleAnimation`] towards a random
//! uniform scale.
//!
//! The cooldown restarts on every accepted tap, including taps that then
//! fail because the spawner is misconfigured.

use bevy::prelude::*;
use bevy_ecs::entity_disabling::Disabled;
use bevy_ecs::system::SystemState;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::attributes::{Position, ScaleAnimation, Vec3Tween};
use crate::clock::SpawnClock;
use crate::cloner::{clone_attributes, CloneRegistry};
use crate::error::SpawnError;
use crate::settings::SpawnSettings;

/// Default lower bound of the entry scale.
pub const DEFAULT_MIN_SCALE: f32 = 1.0;
/// Default upper bound (exclusive) of the entry scale.
pub const DEFAULT_MAX_SCALE: f32 = 3.0;

/// Configuration of a tap spawner.
///
/// Inserting this component also inserts a fresh [`TapSpawnState`].
///
/// # Examples
///
/// ```
/// use bevy::prelude::*;
/// use tap_spawn::{TapSpawnState, TapSpawner};
///
/// let mut world = World::new();
/// let template = world.spawn_empty().id();
/// let spawner = world
///     .spawn(TapSpawner::new(template).with_scale_range(0.5, 1.5))
///     .id();
///
/// assert!(world.get::<TapSpawnState>(spawner).is_some());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component, Default)]
#[require(TapSpawnState)]
pub struct TapSpawner {
    /// Hidden prototype cloned on every accepted tap.
    pub template: Option<Entity>,
    /// Smallest entry scale.
    pub min_scale: f32,
    /// Entry scales stay below this bound.
    pub max_scale: f32,
}

impl TapSpawner {
    /// Spawner cloning `template` with the default scale range.
    #[must_use]
    pub const fn new(template: Entity) -> Self {
        Self {
            template: Some(template),
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }

    /// Replaces the entry scale range. The bounds are not validated.
    #[must_use]
    pub const fn with_scale_range(mut self, min_scale: f32, max_scale: f32) -> Self {
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self
    }
}

impl Default for TapSpawner {
    fn default() -> Self {
        Self {
            template: None,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }
}

/// Lifecycle phase of a spawner.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnerPhase {
    /// Added but not yet activated; taps are ignored.
    #[default]
    Uninitialized,
    /// Template hidden; taps may spawn.
    Armed,
}

/// Persistent per-spawner state.
#[derive(
    Component, Reflect, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[reflect(Component, Default)]
pub struct TapSpawnState {
    /// Current lifecycle phase.
    pub phase: SpawnerPhase,
    /// Time of the last accepted tap. `None` until the first tap.
    pub last_interaction_ms: Option<u64>,
}

impl TapSpawnState {
    /// Moves from `Uninitialized` to `Armed`.
    ///
    /// Returns `true` only on the call that performs the transition.
    pub fn arm(&mut self) -> bool {
        if self.phase == SpawnerPhase::Armed {
            return false;
        }
        self.phase = SpawnerPhase::Armed;
        true
    }

    /// Applies the cooldown rule to a tap at `now_ms`.
    ///
    /// A tap is rejected when it lands `window_ms` or less after the last
    /// accepted tap. Accepting records `now_ms` as the new reference point.
    ///
    /// # Examples
    ///
    /// ```
    /// use tap_spawn::TapSpawnState;
    ///
    /// let mut state = TapSpawnState::default();
    /// assert!(state.accept(0, 500));
    /// assert!(!state.accept(500, 500));
    /// assert!(state.accept(501, 500));
    /// ```
    pub fn accept(&mut self, now_ms: u64, window_ms: u64) -> bool {
        let cooling_down = self
            .last_interaction_ms
            .is_some_and(|last| now_ms.saturating_sub(last) <= window_ms);
        if cooling_down {
            return false;
        }
        self.last_interaction_ms = Some(now_ms);
        true
    }
}

/// Start of a touch on a spawner, already hit-tested into world space.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct TouchStart {
    /// Spawner entity that received the touch.
    pub spawner: Entity,
    /// World-space point under the finger.
    pub world_position: Vec3,
}

/// Links a spawned entity to the spawner that created it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnedFrom {
    /// Spawner whose template was cloned.
    pub spawner: Entity,
    /// Position of this clone in the world-wide spawn order, starting at 0.
    pub sequence: u64,
}

/// Counter behind [`SpawnedFrom::sequence`].
#[derive(Resource, Debug, Default)]
struct SpawnSequence(u64);

impl SpawnSequence {
    fn issue(&mut self) -> u64 {
        let current = self.0;
        self.0 += 1;
        current
    }
}

/// Random source for entry scales.
///
/// Created on first use, seeded from [`SpawnSettings::rng_seed`] when set.
#[derive(Resource, Debug)]
pub struct SpawnRng(StdRng);

impl SpawnRng {
    /// Deterministic generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    /// Draws uniformly from `[0, 1)`.
    pub fn unit(&mut self) -> f32 {
        self.0.gen::<f32>()
    }
}

impl FromWorld for SpawnRng {
    fn from_world(world: &mut World) -> Self {
        match world
            .get_resource::<SpawnSettings>()
            .and_then(|settings| settings.rng_seed)
        {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

/// Maps a unit sample onto the scale range.
///
/// With `unit` in `[0, 1)` the result lies in `[min_scale, max_scale)`.
/// Equal bounds give exactly that bound. Reversed bounds are not clamped
/// and give a scale in `(max_scale, min_scale]`.
///
/// # Examples
///
/// ```
/// use tap_spawn::entry_scale;
///
/// assert_eq!(entry_scale(1.0, 3.0, 0.0), 1.0);
/// assert!(entry_scale(1.0, 3.0, 0.999_999_94) < 3.0);
/// ```
#[must_use]
pub fn entry_scale(min_scale: f32, max_scale: f32, unit: f32) -> f32 {
    let scaled = min_scale + unit * (max_scale - min_scale);
    // Rounding can land a sample just under 1.0 on the upper bound.
    if max_scale > min_scale && scaled >= max_scale {
        max_scale.next_down()
    } else {
        scaled
    }
}

/// Result of handling one touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchOutcome {
    /// A clone was created.
    Spawned(Entity),
    /// The tap fell inside the cooldown window.
    Debounced,
    /// The tap was accepted but the spawner is misconfigured.
    Misconfigured(SpawnError),
    /// The spawner exists but has not been armed yet.
    NotArmed,
    /// The touched entity is not a spawner.
    NotASpawner,
}

/// Arms every spawner still in [`SpawnerPhase::Uninitialized`], disabling
/// its template so only clones are visible.
pub fn arm_spawners_system(
    mut commands: Commands,
    mut spawners: Query<(Entity, &TapSpawner, &mut TapSpawnState)>,
) {
    for (entity, spawner, mut state) in &mut spawners {
        if state.phase == SpawnerPhase::Armed {
            continue;
        }
        state.arm();

        let Some(template) = spawner.template else {
            debug!("armed tap spawner {entity} without a template");
            continue;
        };
        if let Ok(mut template_commands) = commands.get_entity(template) {
            template_commands.insert(Disabled);
            debug!("armed tap spawner {entity}; template {template} hidden");
        }
    }
}

/// Runs the full tap pipeline for one touch.
///
/// Never panics on bad input: unknown spawners are ignored and
/// configuration problems are triggered as [`SpawnError`] events.
pub fn handle_touch(world: &mut World, touch: TouchStart) -> TouchOutcome {
    let spawner = touch.spawner;
    let Some(config) = world.get::<TapSpawner>(spawner).copied() else {
        debug!("touch on {spawner} ignored: not a tap spawner");
        return TouchOutcome::NotASpawner;
    };

    let now_ms = world.get_resource_or_init::<SpawnClock>().now_ms();
    let settings = world.get_resource_or_init::<SpawnSettings>().clone();

    let Some(mut state) = world.get_mut::<TapSpawnState>(spawner) else {
        return TouchOutcome::NotASpawner;
    };
    if state.phase != SpawnerPhase::Armed {
        debug!("touch on {spawner} ignored: spawner not armed");
        return TouchOutcome::NotArmed;
    }
    if !state.accept(now_ms, settings.debounce_ms) {
        debug!("touch on {spawner} at {now_ms} ms debounced");
        return TouchOutcome::Debounced;
    }

    let template = match resolve_template(world, spawner, config.template) {
        Ok(template) => template,
        Err(err) => {
            world.trigger(err);
            return TouchOutcome::Misconfigured(err);
        }
    };

    let unit = world.get_resource_or_init::<SpawnRng>().unit();
    let scale = entry_scale(config.min_scale, config.max_scale, unit);

    let registry = world.get_resource_or_init::<CloneRegistry>().clone();
    let sequence = world.get_resource_or_init::<SpawnSequence>().issue();
    let target = world.spawn(SpawnedFrom { spawner, sequence }).id();
    let copied = clone_attributes(world, template, target, &registry);

    world.entity_mut(target).insert((
        Position(touch.world_position),
        ScaleAnimation(Vec3Tween::grow_in(
            scale,
            settings.grow_duration_ms,
            settings.grow_easing,
        )),
    ));

    info!(
        "spawned {target} from template {template} at {} with scale {scale:.3} ({copied} attributes cloned)",
        touch.world_position
    );
    TouchOutcome::Spawned(target)
}

fn resolve_template(
    world: &World,
    spawner: Entity,
    template: Option<Entity>,
) -> Result<Entity, SpawnError> {
    let template = template.ok_or(SpawnError::MissingTemplate { spawner })?;
    if world.get_entity(template).is_err() {
        return Err(SpawnError::InvalidTemplate { spawner, template });
    }
    Ok(template)
}

/// Drains pending [`TouchStart`] messages and handles them in arrival order.
pub fn tap_spawn_system(world: &mut World, touches: &mut SystemState<MessageReader<TouchStart>>) {
    let pending: Vec<TouchStart> = touches.get_mut(world).read().copied().collect();
    for touch in pending {
        handle_touch(world, touch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Scale;
    use crate::clock::ManualClock;
    use approx::assert_relative_eq;
    use bevy_ecs::system::RunSystemOnce;
    use rstest::{fixture, rstest};

    #[rstest]
    fn first_tap_is_accepted_at_time_zero() {
        let mut state = TapSpawnState::default();
        assert!(state.accept(0, 500));
        assert_eq!(state.last_interaction_ms, Some(0));
    }

    #[rstest]
    #[case::same_instant(1_000, false)]
    #[case::inside_window(1_499, false)]
    #[case::window_edge(1_500, false)]
    #[case::just_after(1_501, true)]
    #[case::clock_went_back(900, false)]
    fn cooldown_is_inclusive(#[case] now_ms: u64, #[case] accepted: bool) {
        let mut state = TapSpawnState {
            phase: SpawnerPhase::Armed,
            last_interaction_ms: Some(1_000),
        };
        assert_eq!(state.accept(now_ms, 500), accepted);
        let expected_last = if accepted { now_ms } else { 1_000 };
        assert_eq!(state.last_interaction_ms, Some(expected_last));
    }

    #[rstest]
    fn cooldown_restarts_from_each_accepted_tap() {
        let mut state = TapSpawnState::default();
        assert!(state.accept(0, 500));
        assert!(state.accept(600, 500));
        assert!(!state.accept(1_000, 500));
        assert!(state.accept(1_101, 500));
    }

    #[rstest]
    fn arm_transitions_once() {
        let mut state = TapSpawnState::default();
        assert_eq!(state.phase, SpawnerPhase::Uninitialized);
        assert!(state.arm());
        assert!(!state.arm());
        assert_eq!(state.phase, SpawnerPhase::Armed);
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(0.5, 2.0)]
    #[case(0.999, 2.998)]
    fn entry_scale_spans_range(#[case] unit: f32, #[case] expected: f32) {
        assert_relative_eq!(entry_scale(1.0, 3.0, unit), expected, epsilon = 1e-5);
    }

    #[rstest]
    #[case::largest_sample(1.0, 3.0, 1.0 - f32::EPSILON / 2.0)]
    #[case::wide_range(0.0, 1_000.0, 1.0 - f32::EPSILON / 2.0)]
    #[case::narrow_range(1.0, 1.000_001, 1.0 - f32::EPSILON / 2.0)]
    fn entry_scale_stays_below_max(#[case] min: f32, #[case] max: f32, #[case] unit: f32) {
        let scale = entry_scale(min, max, unit);
        assert!(scale < max, "{scale} reached the upper bound {max}");
        assert!(scale >= min, "{scale} fell below {min}");
    }

    #[rstest]
    fn entry_scale_with_equal_bounds_is_constant() {
        assert_relative_eq!(entry_scale(2.0, 2.0, 0.7), 2.0);
        assert_relative_eq!(entry_scale(2.0, 2.0, 1.0 - f32::EPSILON / 2.0), 2.0);
    }

    #[rstest]
    #[case(0.0, 3.0)]
    #[case(0.5, 2.0)]
    #[case(1.0 - f32::EPSILON / 2.0, 1.0)]
    fn reversed_bounds_apply_the_formula(#[case] unit: f32, #[case] expected: f32) {
        assert_relative_eq!(entry_scale(3.0, 1.0, unit), expected, epsilon = 1e-5);
    }

    #[rstest]
    fn seeded_rng_is_reproducible() {
        let mut a = SpawnRng::seeded(11);
        let mut b = SpawnRng::seeded(11);
        for _ in 0..16 {
            let sample = a.unit();
            assert!((0.0..1.0).contains(&sample));
            assert_relative_eq!(sample, b.unit());
        }
    }

    #[rstest]
    fn rng_picks_up_seed_from_settings() {
        let mut world = World::new();
        world.insert_resource(SpawnSettings {
            rng_seed: Some(3),
            ..SpawnSettings::default()
        });
        let mut from_world = SpawnRng::from_world(&mut world);
        assert_relative_eq!(from_world.unit(), SpawnRng::seeded(3).unit());
    }

    #[rstest]
    fn spawner_defaults_have_no_template() {
        let spawner = TapSpawner::default();
        assert!(spawner.template.is_none());
        assert_relative_eq!(spawner.min_scale, 1.0);
        assert_relative_eq!(spawner.max_scale, 3.0);
    }

    #[rstest]
    fn state_serialises_timestamp() {
        let state = TapSpawnState {
            phase: SpawnerPhase::Armed,
            last_interaction_ms: Some(1_234),
        };
        let json = serde_json::to_string(&state).unwrap_or_default();
        assert!(json.contains("\"last_interaction_ms\":1234"), "{json}");
    }

    // --- handle_touch on a bare world ---

    const NOW_MS: u64 = 5_000;

    struct TouchWorld {
        world: World,
        clock: ManualClock,
        template: Entity,
    }

    impl TouchWorld {
        fn spawner(&mut self, config: TapSpawner) -> Entity {
            self.world.spawn(config).id()
        }

        fn armed(&mut self, config: TapSpawner) -> Entity {
            let spawner = self.spawner(config);
            self.world.run_system_once(arm_spawners_system).ok();
            spawner
        }

        fn touch(&mut self, spawner: Entity) -> TouchOutcome {
            handle_touch(
                &mut self.world,
                TouchStart {
                    spawner,
                    world_position: Vec3::new(1.0, 0.0, -2.0),
                },
            )
        }

        fn state(&self, spawner: Entity) -> TapSpawnState {
            self.world
                .get::<TapSpawnState>(spawner)
                .copied()
                .unwrap_or_default()
        }
    }

    #[fixture]
    fn touch_world() -> TouchWorld {
        let mut world = World::new();
        let clock = ManualClock::starting_at(NOW_MS);
        world.insert_resource(SpawnClock::new(clock.clone()));
        world.insert_resource(SpawnSettings {
            rng_seed: Some(5),
            ..SpawnSettings::default()
        });
        let template = world.spawn((Position(Vec3::ONE), Scale(Vec3::splat(4.0)))).id();
        TouchWorld {
            world,
            clock,
            template,
        }
    }

    fn spawned_target(outcome: TouchOutcome) -> Entity {
        match outcome {
            TouchOutcome::Spawned(entity) => entity,
            other => panic!("expected a spawn, got {other:?}"),
        }
    }

    #[rstest]
    fn armed_spawner_spawns_on_touch(mut touch_world: TouchWorld) {
        let template = touch_world.template;
        let spawner = touch_world.armed(TapSpawner::new(template));

        let target = spawned_target(touch_world.touch(spawner));

        let world = &touch_world.world;
        assert_eq!(
            world.get::<SpawnedFrom>(target),
            Some(&SpawnedFrom {
                spawner,
                sequence: 0
            })
        );
        assert_eq!(world.get::<Position>(target), Some(&Position(Vec3::new(1.0, 0.0, -2.0))));
        assert_eq!(world.get::<Scale>(target), Some(&Scale(Vec3::splat(4.0))));
        assert!(world.get::<ScaleAnimation>(target).is_some());
        assert_eq!(touch_world.state(spawner).last_interaction_ms, Some(NOW_MS));
    }

    #[rstest]
    fn touch_inside_window_is_debounced(mut touch_world: TouchWorld) {
        let template = touch_world.template;
        let spawner = touch_world.armed(TapSpawner::new(template));
        spawned_target(touch_world.touch(spawner));

        touch_world.clock.advance(500);

        assert_eq!(touch_world.touch(spawner), TouchOutcome::Debounced);
        assert_eq!(touch_world.state(spawner).last_interaction_ms, Some(NOW_MS));
    }

    #[rstest]
    fn spawner_without_template_is_misconfigured(mut touch_world: TouchWorld) {
        let spawner = touch_world.armed(TapSpawner::default());

        assert_eq!(
            touch_world.touch(spawner),
            TouchOutcome::Misconfigured(SpawnError::MissingTemplate { spawner })
        );
        assert_eq!(touch_world.state(spawner).last_interaction_ms, Some(NOW_MS));
    }

    #[rstest]
    fn touch_before_arming_leaves_state_untouched(mut touch_world: TouchWorld) {
        let template = touch_world.template;
        let spawner = touch_world.spawner(TapSpawner::new(template));
        let entities_before = touch_world.world.entities().len();

        assert_eq!(touch_world.touch(spawner), TouchOutcome::NotArmed);

        let state = touch_world.state(spawner);
        assert_eq!(state.phase, SpawnerPhase::Uninitialized);
        assert_eq!(state.last_interaction_ms, None);
        assert_eq!(touch_world.world.entities().len(), entities_before);
    }

    #[rstest]
    fn touch_on_plain_entity_is_not_a_spawner(mut touch_world: TouchWorld) {
        let template = touch_world.template;
        assert_eq!(touch_world.touch(template), TouchOutcome::NotASpawner);
    }

    #[rstest]
    fn clones_are_numbered_in_spawn_order(mut touch_world: TouchWorld) {
        let template = touch_world.template;
        let spawner = touch_world.armed(TapSpawner::new(template));

        let mut sequences = Vec::new();
        for _ in 0..3 {
            let target = spawned_target(touch_world.touch(spawner));
            sequences.extend(
                touch_world
                    .world
                    .get::<SpawnedFrom>(target)
                    .map(|origin| origin.sequence),
            );
            touch_world.clock.advance(501);
        }

        assert_eq!(sequences, vec![0, 1, 2]);
    }

    #[rstest]
    fn reversed_scale_range_grows_between_the_bounds(mut touch_world: TouchWorld) {
        let template = touch_world.template;
        let spawner = touch_world.armed(TapSpawner::new(template).with_scale_range(3.0, 1.0));

        for _ in 0..20 {
            let target = spawned_target(touch_world.touch(spawner));
            let to = touch_world
                .world
                .get::<ScaleAnimation>(target)
                .map_or(Vec3::NAN, |animation| animation.to);
            assert!(to.x > 1.0 && to.x <= 3.0, "scale {} outside (1, 3]", to.x);
            touch_world.clock.advance(501);
        }
    }
}
