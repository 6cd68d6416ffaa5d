//! Frame-driven entry point for hosts.
//!
//! A host needs only three calls per frame:
//! 1) [`PhysicsController::apply_gravity_to_ball`] with the maze-local gravity,
//! 2) [`PhysicsController::update_physics`] to advance by wall-clock time,
//! 3) [`PhysicsController::ball_pose`] to place the visual ball.
//!
//! The controller is single-threaded and owns its world outright. If the mesh is
//! loaded on another thread, hand the finished [`MeshBuffer`] over before constructing
//! the controller.

use std::io::BufRead;
use std::path::Path;
use std::time::Instant;

use crate::error::MazeError;
use crate::mesh::MeshBuffer;
use crate::pose::Pose;
use crate::settings::WorldSettings;
use crate::types::Vec3;
use crate::world::{BodySnapshot, MazeWorld};

pub struct PhysicsController {
    settings: WorldSettings,
    mesh: Option<MeshBuffer>,
    world: MazeWorld,
    last_step_timestamp: Instant,
}

impl PhysicsController {
    /// Build a controller from an already imported mesh (or none).
    pub fn new(mesh: Option<MeshBuffer>, settings: WorldSettings) -> Result<Self, MazeError> {
        let world = MazeWorld::initialize(mesh.clone(), settings.clone())?;
        Ok(Self {
            settings,
            mesh,
            world,
            last_step_timestamp: Instant::now(),
        })
    }

    /// Import the maze from an OBJ stream. A load failure is logged and yields a maze-less world.
    pub fn from_obj_reader<R: BufRead>(
        reader: &mut R,
        settings: WorldSettings,
    ) -> Result<Self, MazeError> {
        let mesh = MeshBuffer::from_obj_reader(reader)
            .inspect_err(|e| log::error!("Failed to read maze mesh: {e}"))
            .ok();
        Self::new(mesh, settings)
    }

    /// Import the maze from an OBJ file. A load failure is logged and yields a maze-less world.
    pub fn from_obj_path(
        path: impl AsRef<Path>,
        settings: WorldSettings,
    ) -> Result<Self, MazeError> {
        let path = path.as_ref();
        let mesh = MeshBuffer::from_obj_path(path)
            .inspect_err(|e| log::error!("Failed to read maze mesh {}: {e}", path.display()))
            .ok();
        Self::new(mesh, settings)
    }

    /// Rebuild the world in its initial state and restart the step clock.
    ///
    /// Calling this repeatedly always yields the same initial world.
    pub fn initialize(&mut self) -> Result<(), MazeError> {
        self.world = MazeWorld::initialize(self.mesh.clone(), self.settings.clone())?;
        self.last_step_timestamp = Instant::now();
        Ok(())
    }

    /// Advance by the wall-clock time elapsed since the previous update (or initialization).
    pub fn update_physics(&mut self) -> u32 {
        self.update_physics_at(Instant::now())
    }

    /// Advance by the time between the previous update and `now`.
    ///
    /// `now` earlier than the previous timestamp counts as no elapsed time.
    pub fn update_physics_at(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last_step_timestamp);
        self.last_step_timestamp = now;
        self.world.step(elapsed.as_secs_f32())
    }

    /// Advance by an explicit duration, leaving the wall clock untouched.
    pub fn step(&mut self, elapsed_seconds: f32) -> u32 {
        self.world.step(elapsed_seconds)
    }

    /// Apply maze-local gravity to the ball for the next update only.
    pub fn apply_gravity_to_ball(&mut self, maze_gravity: Vec3) {
        crate::gravity::apply_maze_gravity(&mut self.world, maze_gravity);
    }

    /// Ball pose in native maze units, ready for the renderer.
    pub fn ball_pose(&self) -> Pose {
        Pose::from_simulation(&self.world.ball_transform(), &self.settings)
    }

    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.world.snapshot()
    }

    pub fn world(&self) -> &MazeWorld {
        &self.world
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    pub fn last_step_timestamp(&self) -> Instant {
        self.last_step_timestamp
    }
}
