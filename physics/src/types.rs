/*!
Math aliases and the simulation-space transform shared by the physics modules.

Everything in here is expressed in simulation units. Conversion back to the
maze's native units lives in `pose`.
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Point3 = na::Point3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// A rigid transform in simulation space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    #[inline]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::identity())
    }
}

/// Stable identifier of the bodies owned by a maze world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BodyId {
    Maze,
    Floor,
    Ball,
}

/// Whether a body keeps taking part in the simulation while at rest.
///
/// - `Active`: normal engine behavior, may fall asleep after resting.
/// - `AlwaysActive`: never put to sleep; forces are always honored.
/// - `Deactivated`: asleep until something wakes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationState {
    Active,
    AlwaysActive,
    Deactivated,
}
