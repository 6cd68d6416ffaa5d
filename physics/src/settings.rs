/*!
Runtime settings for a maze world.

Defaults come from `constants`; override individual fields for tests or for a
different maze asset.

Notes
- Distances are in simulation units unless a field says otherwise, time in seconds.
- `scale` maps native maze units into simulation units. Keep the smallest and largest
  simulated dimensions within roughly 0.2..10 units.
*/

use crate::constants::{
    BALL_MASS, BALL_RADIUS, BALL_START_HEIGHT, MAX_SUBSTEP_SECONDS, MAX_SUBSTEPS, MAZE_SCALE,
    MAZE_SCALE_Y_EXTRA, STATIC_FRICTION, VERTICAL_SCALE_CORRECTION_FACTOR,
};
use crate::error::MazeError;
use crate::types::Vec3;

/// Native -> simulation scale, with a distinct factor for the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitScale {
    pub horizontal: f32,
    pub vertical: f32,
}

impl UnitScale {
    pub const fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Per-axis scale vector `(h, v, h)`.
    #[inline]
    pub fn as_vector(&self) -> Vec3 {
        Vec3::new(self.horizontal, self.vertical, self.horizontal)
    }

    /// Convert a native-space extent or position into simulation units.
    #[inline]
    pub fn to_simulation(&self, native: Vec3) -> Vec3 {
        native.component_mul(&self.as_vector())
    }
}

impl Default for UnitScale {
    fn default() -> Self {
        Self::new(MAZE_SCALE, MAZE_SCALE * MAZE_SCALE_Y_EXTRA)
    }
}

#[derive(Clone, Debug)]
pub struct WorldSettings {
    pub scale: UnitScale,
    /// Extra divisor on Y when converting the ball pose back to native units.
    pub vertical_scale_correction_factor: f32,

    pub ball_radius: f32,
    pub ball_mass: f32,
    pub ball_start_height: f32,
    /// Continuous collision detection for the ball against thin walls.
    pub ball_ccd: bool,

    pub maze_friction: f32,
    pub floor_friction: f32,
    pub floor_normal: Vec3,
    pub floor_offset: f32,

    pub max_substep_seconds: f32,
    pub max_substeps: u32,
}

impl WorldSettings {
    /// Longest span of time a single `step()` can simulate.
    #[inline]
    pub fn max_step_seconds(&self) -> f32 {
        self.max_substep_seconds * self.max_substeps as f32
    }

    /// Reject settings that would make the world or the pose conversion degenerate.
    ///
    /// Scales and the correction factor are divisors in `Pose::from_simulation`, so they
    /// must be finite and strictly positive.
    pub fn validate(&self) -> Result<(), MazeError> {
        let positive = [
            ("scale.horizontal", self.scale.horizontal),
            ("scale.vertical", self.scale.vertical),
            (
                "vertical_scale_correction_factor",
                self.vertical_scale_correction_factor,
            ),
            ("ball_radius", self.ball_radius),
            ("max_substep_seconds", self.max_substep_seconds),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(MazeError::InvalidSettings(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        if self.max_substeps == 0 {
            return Err(MazeError::InvalidSettings(
                "max_substeps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            scale: UnitScale::default(),
            vertical_scale_correction_factor: VERTICAL_SCALE_CORRECTION_FACTOR,
            ball_radius: BALL_RADIUS,
            ball_mass: BALL_MASS,
            ball_start_height: BALL_START_HEIGHT,
            ball_ccd: true,
            maze_friction: STATIC_FRICTION,
            floor_friction: STATIC_FRICTION,
            floor_normal: Vec3::y(),
            floor_offset: 0.0,
            max_substep_seconds: MAX_SUBSTEP_SECONDS,
            max_substeps: MAX_SUBSTEPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAZE_NATIVE_GAP;

    #[test]
    fn default_scale_is_squashed_vertically() {
        let scale = UnitScale::default();
        assert!((scale.horizontal - 0.02).abs() < 1.0e-7);
        assert!((scale.vertical - 0.002).abs() < 1.0e-7);
    }

    #[test]
    fn scaled_maze_extent_stays_in_stable_range() {
        // (492, 120, 492) native -> (9.84, 0.24, 9.84) simulated.
        let sim = UnitScale::default().to_simulation(Vec3::new(492.0, 120.0, 492.0));
        assert!((sim.x - 9.84).abs() < 1.0e-4);
        assert!((sim.y - 0.24).abs() < 1.0e-4);
        assert!((sim.z - 9.84).abs() < 1.0e-4);
        assert!(sim.x <= 10.0 && sim.y >= 0.2);
    }

    #[test]
    fn ball_fits_scaled_passage() {
        let settings = WorldSettings::default();
        let gap = MAZE_NATIVE_GAP * settings.scale.horizontal;
        assert!(gap >= 0.26 - 1.0e-6);
        assert!(settings.ball_radius * 2.0 <= gap + 1.0e-6);
    }

    #[test]
    fn default_settings_are_valid() {
        assert!(WorldSettings::default().validate().is_ok());
    }

    #[test]
    fn zero_divisors_are_rejected() {
        let zero_scale = WorldSettings {
            scale: UnitScale::new(0.0, 0.002),
            ..WorldSettings::default()
        };
        assert!(matches!(
            zero_scale.validate(),
            Err(MazeError::InvalidSettings(_))
        ));

        let zero_correction = WorldSettings {
            vertical_scale_correction_factor: 0.0,
            ..WorldSettings::default()
        };
        assert!(matches!(
            zero_correction.validate(),
            Err(MazeError::InvalidSettings(_))
        ));

        let nan_scale = WorldSettings {
            scale: UnitScale::new(f32::NAN, 0.002),
            ..WorldSettings::default()
        };
        assert!(nan_scale.validate().is_err());
    }

    #[test]
    fn zero_substeps_are_rejected() {
        let settings = WorldSettings {
            max_substeps: 0,
            ..WorldSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn max_step_covers_all_substeps() {
        let settings = WorldSettings::default();
        assert!((settings.max_step_seconds() - 8.0 / 60.0).abs() < 1.0e-6);
    }
}
