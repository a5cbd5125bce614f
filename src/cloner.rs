//! Attribute-wise entity duplication.
//!
//! Cloning walks a fixed, ordered list of [`CloneKind`] descriptors. Each
//! descriptor erases one component type behind two function pointers, so the
//! walk needs neither reflection nor a type registry: a kind present on the
//! source is read, cloned, and inserted on the target, replacing whatever the
//! target held for that kind. Kinds absent on the source leave the target
//! untouched.

use std::fmt;

use bevy::prelude::*;

use crate::attributes::{
    Audio, BoxGeometry, Collider, CustomPropertyAnimation, CustomVec3Animation, FollowAnimation,
    GltfModel, LookAtAnimation, Material, Orientation, ParticleEmitter, Position,
    PositionAnimation, RotateAnimation, Scale, ScaleAnimation, Shadow, Ui,
};

/// Type-erased capability descriptor for one clonable component kind.
#[derive(Clone, Copy)]
pub struct CloneKind {
    name: &'static str,
    has: fn(&World, Entity) -> bool,
    copy: fn(&mut World, Entity, Entity) -> bool,
}

impl CloneKind {
    /// Builds the descriptor for component type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// use bevy::prelude::*;
    /// use tap_spawn::attributes::Position;
    /// use tap_spawn::cloner::CloneKind;
    ///
    /// let kind = CloneKind::of::<Position>("position");
    /// let mut world = World::new();
    /// let source = world.spawn(Position(Vec3::X)).id();
    /// let target = world.spawn_empty().id();
    ///
    /// assert!(kind.has(&world, source));
    /// assert!(kind.copy(&mut world, source, target));
    /// assert_eq!(world.get::<Position>(target), Some(&Position(Vec3::X)));
    /// ```
    #[must_use]
    pub fn of<T: Component + Clone>(name: &'static str) -> Self {
        Self {
            name,
            has: has_attribute::<T>,
            copy: copy_attribute::<T>,
        }
    }

    /// Stable diagnostic name of the kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether `entity` currently carries this kind.
    #[must_use]
    pub fn has(&self, world: &World, entity: Entity) -> bool {
        (self.has)(world, entity)
    }

    /// Copies this kind's value from `source` onto `target`.
    ///
    /// Returns `false` when nothing was written, either because `source`
    /// lacks the kind or because `target` no longer exists.
    pub fn copy(&self, world: &mut World, source: Entity, target: Entity) -> bool {
        (self.copy)(world, source, target)
    }
}

impl fmt::Debug for CloneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CloneKind").field(&self.name).finish()
    }
}

fn has_attribute<T: Component>(world: &World, entity: Entity) -> bool {
    world.get::<T>(entity).is_some()
}

fn copy_attribute<T: Component + Clone>(world: &mut World, source: Entity, target: Entity) -> bool {
    let Some(value) = world.get::<T>(source).cloned() else {
        return false;
    };
    let Ok(mut target_entity) = world.get_entity_mut(target) else {
        return false;
    };
    target_entity.insert(value);
    true
}

/// Ordered set of component kinds eligible for duplication.
///
/// The default registry is the closed list of attribute kinds defined in
/// [`crate::attributes`]. Order is fixed so that clones are reproducible.
#[derive(Resource, Debug, Clone)]
pub struct CloneRegistry {
    kinds: Vec<CloneKind>,
}

impl CloneRegistry {
    /// Builds a registry from an explicit list of kinds, keeping their order.
    pub fn with_kinds(kinds: impl IntoIterator<Item = CloneKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// Registered kinds in clone order.
    #[must_use]
    pub fn kinds(&self) -> &[CloneKind] {
        &self.kinds
    }

    /// Names of the registered kinds in clone order.
    #[must_use]
    pub fn kind_names(&self) -> Vec<&'static str> {
        self.kinds.iter().map(CloneKind::name).collect()
    }
}

impl Default for CloneRegistry {
    fn default() -> Self {
        Self::with_kinds([
            CloneKind::of::<Position>("position"),
            CloneKind::of::<Orientation>("orientation"),
            CloneKind::of::<Scale>("scale"),
            CloneKind::of::<Shadow>("shadow"),
            CloneKind::of::<BoxGeometry>("box_geometry"),
            CloneKind::of::<Material>("material"),
            CloneKind::of::<ScaleAnimation>("scale_animation"),
            CloneKind::of::<PositionAnimation>("position_animation"),
            CloneKind::of::<RotateAnimation>("rotate_animation"),
            CloneKind::of::<CustomPropertyAnimation>("custom_property_animation"),
            CloneKind::of::<CustomVec3Animation>("custom_vec3_animation"),
            CloneKind::of::<FollowAnimation>("follow_animation"),
            CloneKind::of::<LookAtAnimation>("look_at_animation"),
            CloneKind::of::<GltfModel>("gltf_model"),
            CloneKind::of::<Collider>("collider"),
            CloneKind::of::<ParticleEmitter>("particle_emitter"),
            CloneKind::of::<Ui>("ui"),
            CloneKind::of::<Audio>("audio"),
        ])
    }
}

/// Copies every registered attribute present on `source` onto `target`.
///
/// Kinds are visited in registry order. Returns the number of kinds written.
/// An invalid `source` copies nothing; callers validate templates first.
pub fn clone_attributes(
    world: &mut World,
    source: Entity,
    target: Entity,
    registry: &CloneRegistry,
) -> usize {
    if world.get_entity(source).is_err() {
        return 0;
    }

    let mut copied = 0;
    for kind in registry.kinds() {
        if kind.has(world, source) && kind.copy(world, source, target) {
            copied += 1;
        }
    }
    copied
}
