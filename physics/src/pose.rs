//! Ball pose in the maze's native coordinate space.
//!
//! The renderer draws the maze mesh in its own native units, centered the same way the
//! importer centers it. Simulation translations are converted back by dividing out the
//! horizontal scale. Y additionally divides by the vertical correction factor, which is
//! `1.0` by default (see `constants::VERTICAL_SCALE_CORRECTION_FACTOR`).
//!
//! Orientation passes through untouched. That is only sound because the ball is a
//! sphere; a non-spherical dynamic body under non-uniform scale would need its
//! orientation re-derived.

use crate::constants::{BALL_NATIVE_RADIUS, MAZE_NATIVE_EDGE};
use crate::settings::WorldSettings;
use crate::types::{Quat, Transform, Vec3};

/// Position and orientation, in native maze units unless stated otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Pose {
    /// Convert a simulation-space transform into native maze space.
    pub fn from_simulation(transform: &Transform, settings: &WorldSettings) -> Self {
        let h = settings.scale.horizontal;
        let v = h * settings.vertical_scale_correction_factor;
        debug_assert!(
            h > 0.0 && v > 0.0,
            "pose divisors must be positive (horizontal {h}, vertical {v})"
        );
        let t = transform.translation;
        Self {
            translation: Vec3::new(t.x / h, t.y / v, t.z / h),
            rotation: transform.rotation,
        }
    }

    /// Pose relative to the visual anchor, for a maze drawn at `display_scale`.
    pub fn to_display(&self, display_scale: f32) -> Pose {
        Pose {
            translation: self.translation * display_scale,
            rotation: self.rotation,
        }
    }

    pub fn translation_array(&self) -> [f32; 3] {
        [self.translation.x, self.translation.y, self.translation.z]
    }

    /// Quaternion as `[x, y, z, w]`.
    pub fn rotation_array(&self) -> [f32; 4] {
        let q = self.rotation.quaternion();
        [q.i, q.j, q.k, q.w]
    }
}

/// Scale that fits the native maze onto a tracked image of the given extents.
pub fn display_scale(image_extent_x: f32, image_extent_z: f32) -> f32 {
    image_extent_x.max(image_extent_z) / MAZE_NATIVE_EDGE
}

/// Radius of the visual ball proxy at `display_scale`.
pub fn ball_display_radius(display_scale: f32) -> f32 {
    BALL_NATIVE_RADIUS * display_scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translation_divides_out_horizontal_scale() {
        let settings = WorldSettings::default();
        let t = Transform::from_translation(Vec3::new(0.2, 0.13, -4.0));
        let pose = Pose::from_simulation(&t, &settings);
        let expected = t.translation / settings.scale.horizontal;
        assert!((pose.translation - expected).norm() < 1.0e-4);
    }

    #[test]
    fn correction_factor_only_touches_y() {
        let settings = WorldSettings {
            vertical_scale_correction_factor: 10.0,
            ..WorldSettings::default()
        };
        let t = Transform::from_translation(Vec3::new(1.0, 1.0, 1.0));
        let pose = Pose::from_simulation(&t, &settings);
        assert!((pose.translation.x - 50.0).abs() < 1.0e-3);
        assert!((pose.translation.y - 5.0).abs() < 1.0e-3);
        assert!((pose.translation.z - 50.0).abs() < 1.0e-3);
    }

    #[test]
    fn orientation_is_passed_through() {
        let rotation = Quat::from_euler_angles(0.3, -1.1, 2.0);
        let t = Transform::new(Vec3::new(0.5, 0.2, 0.1), rotation);
        let pose = Pose::from_simulation(&t, &WorldSettings::default());
        assert_eq!(pose.rotation, rotation);

        let [x, y, z, w] = pose.rotation_array();
        let q = rotation.quaternion();
        assert_eq!((x, y, z, w), (q.i, q.j, q.k, q.w));
    }

    #[test]
    fn display_scale_fits_largest_image_edge() {
        let s = display_scale(0.2, 0.15);
        assert!((s * MAZE_NATIVE_EDGE - 0.2).abs() < 1.0e-6);

        let pose = Pose {
            translation: Vec3::new(100.0, 0.0, -50.0),
            rotation: Quat::identity(),
        };
        let shown = pose.to_display(s);
        assert!((shown.translation.x - 100.0 * s).abs() < 1.0e-6);
        assert!((ball_display_radius(s) - 6.5 * s).abs() < 1.0e-6);
    }
}
