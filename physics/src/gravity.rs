//! Per-frame gravity injection.
//!
//! The world has no ambient gravity. Once per frame the host converts real-world "down"
//! into maze-local axes and hands it to [`apply_maze_gravity`], which applies it as a
//! central force on the ball for the next step. Nothing is filtered or smoothed.

use crate::types::{Quat, Vec3};
use crate::world::MazeWorld;

/// Apply a maze-local gravity vector to the ball for exactly one upcoming step.
#[inline]
pub fn apply_maze_gravity(world: &mut MazeWorld, maze_gravity: Vec3) {
    world.apply_force(maze_gravity);
}

/// Express a world-space gravity vector in maze-local axes.
///
/// `anchor_rotation` is the maze anchor's world orientation as reported by the tracker.
#[inline]
pub fn maze_gravity(anchor_rotation: &Quat, world_gravity: Vec3) -> Vec3 {
    anchor_rotation.inverse_transform_vector(&world_gravity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::WorldSettings;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn level_maze_keeps_gravity_down() {
        let g = maze_gravity(&Quat::identity(), Vec3::new(0.0, -10.0, 0.0));
        assert!((g - Vec3::new(0.0, -10.0, 0.0)).norm() < 1.0e-6);
    }

    #[test]
    fn tilted_maze_rotates_gravity_into_local_axes() {
        // Maze rolled 90 degrees about Z: world down lies along maze -X.
        let anchor = Quat::from_axis_angle(&Vec3::z_axis(), FRAC_PI_2);
        let g = maze_gravity(&anchor, Vec3::new(0.0, -10.0, 0.0));
        assert!((g.x + 10.0).abs() < 1.0e-4);
        assert!(g.y.abs() < 1.0e-4);

        // Rotating back recovers world gravity.
        let back = anchor * g;
        assert!((back - Vec3::new(0.0, -10.0, 0.0)).norm() < 1.0e-4);
    }

    #[test]
    fn gravity_passes_through_unchanged() {
        let mut world = MazeWorld::initialize(None, WorldSettings::default()).unwrap();
        apply_maze_gravity(&mut world, Vec3::new(0.3, 0.0, -0.2));
        world.step(1.0 / 60.0);
        let v = world.ball_velocity();
        // Velocity follows the force direction exactly.
        assert!(v.x > 0.0 && v.z < 0.0);
        assert!((v.x / v.z + 1.5).abs() < 1.0e-3);
    }
}
