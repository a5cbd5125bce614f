//! Attribute kinds that a spawned entity can inherit from its template.
//!
//! Each kind is an ordinary Bevy component holding plain data. The set is
//! closed: [`crate::cloner::CloneRegistry`] lists exactly these types, and no
//! other component ever transfers during a clone. Values are copied by
//! `Clone`, so none of these types may hold shared handles.
//!
//! Animation kinds describe a tween; evaluating them each frame belongs to
//! the host animation systems. [`Vec3Tween::value_at`] exists so hosts and
//! tests can sample the curve without reimplementing the easing maths.

use bevy::prelude::*;
use serde::Serialize;

/// World-space position of an entity.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Deref, DerefMut, Serialize)]
pub struct Position(pub Vec3);

/// Orientation of an entity as a unit quaternion.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Deref, DerefMut, Serialize)]
pub struct Orientation(pub Quat);

/// Per-axis scale factor.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref, DerefMut, Serialize)]
pub struct Scale(pub Vec3);

impl Default for Scale {
    fn default() -> Self {
        Self(Vec3::ONE)
    }
}

/// Shadow participation flags.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Shadow {
    /// Whether the entity casts shadows onto others.
    pub cast: bool,
    /// Whether shadows from other entities are drawn on this one.
    pub receive: bool,
}

/// Axis-aligned box mesh dimensions in world units.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxGeometry {
    /// Extent along X.
    pub width: f32,
    /// Extent along Y.
    pub height: f32,
    /// Extent along Z.
    pub depth: f32,
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        }
    }
}

/// Surface appearance of a mesh.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Material {
    /// Linear RGB colour.
    pub color: [f32; 3],
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    /// Physically based roughness in `[0, 1]`.
    pub roughness: f32,
    /// Physically based metalness in `[0, 1]`.
    pub metalness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            opacity: 1.0,
            roughness: 0.5,
            metalness: 0.0,
        }
    }
}

/// Interpolation curve applied to an animation's normalised progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,
    /// Starts slow, accelerates.
    QuadraticIn,
    /// Starts fast, decelerates.
    QuadraticOut,
    /// Accelerates through the first half, decelerates through the second.
    QuadraticInOut,
    /// Stronger deceleration than [`Easing::QuadraticOut`].
    CubicOut,
}

impl Easing {
    /// Maps linear progress `t` to eased progress.
    ///
    /// `t` is clamped to `[0, 1]`; every curve maps `0 -> 0` and `1 -> 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tap_spawn::attributes::Easing;
    ///
    /// assert!((Easing::QuadraticOut.sample(0.5) - 0.75).abs() < f32::EPSILON);
    /// assert!((Easing::Linear.sample(2.0) - 1.0).abs() < f32::EPSILON);
    /// ```
    #[must_use]
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => t * (2.0 - t),
            Self::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::CubicOut => {
                let inv = t - 1.0;
                inv * inv * inv + 1.0
            }
        }
    }
}

/// Tween between two vectors over a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vec3Tween {
    /// Value at the start of the animation.
    pub from: Vec3,
    /// Value at the end of the animation.
    pub to: Vec3,
    /// Duration of one pass in milliseconds.
    pub duration_ms: u32,
    /// Restart from `from` after each pass instead of holding `to`.
    pub looping: bool,
    /// Curve applied to progress.
    pub easing: Easing,
}

impl Vec3Tween {
    /// Builds the non-looping grow-in tween from zero size to `scale` on
    /// every axis.
    #[must_use]
    pub const fn grow_in(scale: f32, duration_ms: u32, easing: Easing) -> Self {
        Self {
            from: Vec3::ZERO,
            to: Vec3::splat(scale),
            duration_ms,
            looping: false,
            easing,
        }
    }

    /// Evaluates the tween `elapsed_ms` after it started.
    ///
    /// Non-looping tweens hold `to` once finished. A zero duration jumps
    /// straight to `to`.
    #[must_use]
    pub fn value_at(&self, elapsed_ms: u64) -> Vec3 {
        if self.duration_ms == 0 {
            return self.to;
        }
        let duration = u64::from(self.duration_ms);
        let within = if self.looping {
            elapsed_ms % duration
        } else {
            elapsed_ms.min(duration)
        };
        #[expect(
            clippy::cast_precision_loss,
            reason = "Animation durations are far below f32's exact integer range."
        )]
        let progress = within as f32 / duration as f32;
        self.from.lerp(self.to, self.easing.sample(progress))
    }
}

/// Animates the entity's scale.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref, Serialize)]
pub struct ScaleAnimation(pub Vec3Tween);

/// Animates the entity's position.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref, Serialize)]
pub struct PositionAnimation(pub Vec3Tween);

/// Animates the entity's rotation, expressed as Euler angles in degrees.
#[derive(Component, Debug, Clone, Copy, PartialEq, Deref, Serialize)]
pub struct RotateAnimation(pub Vec3Tween);

/// Animates a single scalar field of another attribute.
#[derive(Component, Debug, Clone, PartialEq, Serialize)]
pub struct CustomPropertyAnimation {
    /// Attribute kind owning the property, e.g. `"material"`.
    pub attribute: String,
    /// Field name within the attribute, e.g. `"opacity"`.
    pub property: String,
    /// Starting value.
    pub from: f32,
    /// Final value.
    pub to: f32,
    /// Duration of one pass in milliseconds.
    pub duration_ms: u32,
    /// Restart after each pass.
    pub looping: bool,
    /// Curve applied to progress.
    pub easing: Easing,
}

/// Animates a three-component field of another attribute.
#[derive(Component, Debug, Clone, PartialEq, Serialize)]
pub struct CustomVec3Animation {
    /// Attribute kind owning the property.
    pub attribute: String,
    /// Field name within the attribute.
    pub property: String,
    /// The vector tween itself.
    pub tween: Vec3Tween,
}

/// Keeps the entity trailing another entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FollowAnimation {
    /// Entity to follow; `None` disables the behaviour.
    #[serde(skip)]
    pub target: Option<Entity>,
    /// Distance below which the follower stops moving.
    pub min_distance: f32,
    /// Distance the follower never falls behind.
    pub max_distance: f32,
    /// Fraction of the remaining gap closed each second.
    pub elasticity: f32,
}

/// Keeps the entity facing another entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LookAtAnimation {
    /// Entity to face; `None` disables the behaviour.
    #[serde(skip)]
    pub target: Option<Entity>,
    /// Restrict rotation to the vertical axis.
    pub lock_y: bool,
}

/// Reference to a glTF model asset.
#[derive(Component, Debug, Clone, Default, PartialEq, Serialize)]
pub struct GltfModel {
    /// Asset URL or path.
    pub url: String,
    /// Animation clip to play on load, if any.
    pub animation_clip: Option<String>,
    /// Loop the animation clip.
    pub looping: bool,
}

/// Collision shape used by the physics host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ColliderShape {
    /// Box with full extents.
    Box(Vec3),
    /// Sphere with radius.
    Sphere(f32),
    /// Upright capsule.
    Capsule {
        /// Radius of the hemispherical caps.
        radius: f32,
        /// Height of the cylindrical section.
        height: f32,
    },
}

/// Physics participation of an entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Collider {
    /// Shape of the collision volume.
    pub shape: ColliderShape,
    /// Mass in kilograms; zero makes the body static.
    pub mass: f32,
    /// Coulomb friction coefficient.
    pub friction: f32,
    /// Bounciness in `[0, 1]`.
    pub restitution: f32,
}

/// Particle effect emitted from the entity.
#[derive(Component, Debug, Clone, PartialEq, Serialize)]
pub struct ParticleEmitter {
    /// Particles emitted per second.
    pub emit_rate: f32,
    /// Upper bound on live particles.
    pub max_particles: u32,
    /// Lifetime of each particle in milliseconds.
    pub lifetime_ms: u32,
    /// Texture asset for each particle.
    pub texture: Option<String>,
}

/// Screen-space or world-space UI panel attached to the entity.
#[derive(Component, Debug, Clone, Default, PartialEq, Serialize)]
pub struct Ui {
    /// Text content.
    pub text: String,
    /// Panel width in pixels.
    pub width: f32,
    /// Panel height in pixels.
    pub height: f32,
    /// Background opacity in `[0, 1]`.
    pub background_opacity: f32,
}

/// Sound source attached to the entity.
#[derive(Component, Debug, Clone, PartialEq, Serialize)]
pub struct Audio {
    /// Asset URL or path.
    pub url: String,
    /// Linear gain.
    pub volume: f32,
    /// Repeat after finishing.
    pub looping: bool,
    /// Start playing as soon as the entity exists.
    pub autoplay: bool,
    /// Attenuate with distance from the listener.
    pub positional: bool,
}
