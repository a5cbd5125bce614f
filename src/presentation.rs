//! Projection of spatial attributes onto Bevy transforms.
//!
//! Spawned entities carry [`Position`], [`Orientation`] and [`Scale`] as
//! separate attribute kinds so they can be cloned independently. Render and
//! physics hosts read `Transform`, so this module keeps the two views in step
//! whenever an attribute changes.

use bevy::prelude::*;
use bevy_transform::components::Transform;

use crate::attributes::{Orientation, Position, Scale, ScaleAnimation};

type AttributesChanged = Or<(Changed<Position>, Changed<Orientation>, Changed<Scale>)>;

/// Writes the attributes that are present onto `transform`, leaving the
/// other fields as they are.
pub fn apply_attributes(
    transform: &mut Transform,
    position: Option<&Position>,
    orientation: Option<&Orientation>,
    scale: Option<&Scale>,
) {
    if let Some(position) = position {
        transform.translation = position.0;
    }
    if let Some(orientation) = orientation {
        transform.rotation = orientation.0;
    }
    if let Some(scale) = scale {
        transform.scale = scale.0;
    }
}

/// Keeps `Transform` in sync with changed spatial attributes, inserting one
/// where the entity has none yet.
///
/// A freshly inserted transform on an entity that is growing in starts at
/// the [`ScaleAnimation`] origin rather than at its final scale.
#[expect(
    clippy::type_complexity,
    reason = "Bevy ECS query with optional components is inherently verbose."
)]
pub fn sync_transforms_system(
    mut commands: Commands,
    mut changed: Query<
        (
            Entity,
            Option<&mut Transform>,
            Option<&Position>,
            Option<&Orientation>,
            Option<&Scale>,
            Option<&ScaleAnimation>,
        ),
        AttributesChanged,
    >,
) {
    for (entity, transform, position, orientation, scale, growth) in &mut changed {
        if let Some(mut transform) = transform {
            apply_attributes(&mut transform, position, orientation, scale);
        } else {
            let mut fresh = Transform::IDENTITY;
            apply_attributes(&mut fresh, position, orientation, scale);
            if let Some(growth) = growth {
                fresh.scale = growth.from;
            }
            commands.entity(entity).insert(fresh);
        }
    }
}
