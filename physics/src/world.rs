//! Rapier dynamics world for the tilt maze.
//!
//! The world owns three bodies, inserted in this order:
//! - the maze (fixed concave mesh), only when a usable mesh was supplied,
//! - the floor (fixed infinite plane) under the open-bottomed maze,
//! - the ball (dynamic sphere that never sleeps).
//!
//! Design goals
//! - Ambient gravity is always zero. "Down" follows the maze's real-world tilt, so it is
//!   injected as a per-step force on the ball instead (see `gravity`).
//! - Forces last for exactly one `step()`.
//! - A single `step()` never simulates more than `max_substeps * max_substep_seconds`;
//!   longer gaps (e.g. after the host was suspended) are dropped rather than integrated.

use rapier3d::prelude::*;

use crate::body::BodyDef;
use crate::error::MazeError;
use crate::mesh::MeshBuffer;
use crate::settings::WorldSettings;
use crate::shapes::{build_ball_shape, build_floor_shape, build_maze_shape};
use crate::types::{ActivationState, BodyId, Transform, Vec3};

/// Read-only view of one body, as returned by [`MazeWorld::snapshot`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub transform: Transform,
    pub activation: ActivationState,
}

struct BodyEntry {
    id: BodyId,
    handle: RigidBodyHandle,
    activation: ActivationState,
}

pub struct MazeWorld {
    settings: WorldSettings,
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    entries: Vec<BodyEntry>,
    ball: RigidBodyHandle,
}

impl MazeWorld {
    /// Build the world and its bodies.
    ///
    /// A missing or unusable maze mesh is not an error: the world then holds only the
    /// floor and the ball. Errors are returned only for invalid body definitions.
    pub fn initialize(
        mesh: Option<MeshBuffer>,
        settings: WorldSettings,
    ) -> Result<Self, MazeError> {
        settings.validate()?;
        let mut world = Self {
            settings,
            gravity: Vector::zeros(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            entries: Vec::with_capacity(3),
            ball: RigidBodyHandle::invalid(),
        };

        match mesh {
            Some(mesh) if !mesh.is_empty() => {
                let scale = world.settings.scale;
                let def = BodyDef::fixed(
                    BodyId::Maze,
                    build_maze_shape(mesh, scale.horizontal, scale.vertical),
                    world.settings.maze_friction,
                );
                match world.insert(&def) {
                    Ok(_) => {}
                    Err(MazeError::MeshShape(reason)) => {
                        log::warn!("Maze mesh rejected ({reason}); continuing without maze body");
                    }
                    Err(e) => return Err(e),
                }
            }
            Some(_) => log::warn!("Maze mesh is empty; continuing without maze body"),
            None => log::warn!("No maze mesh; continuing without maze body"),
        }

        let floor = BodyDef::fixed(
            BodyId::Floor,
            build_floor_shape(world.settings.floor_normal, world.settings.floor_offset),
            world.settings.floor_friction,
        );
        world.insert(&floor)?;

        let ball = BodyDef::dynamic(
            BodyId::Ball,
            build_ball_shape(world.settings.ball_radius),
            world.settings.ball_mass,
            Vec3::new(0.0, world.settings.ball_start_height, 0.0),
        )
        .with_activation(ActivationState::AlwaysActive)
        .with_ccd(world.settings.ball_ccd);
        world.ball = world.insert(&ball)?;

        log::info!(
            "Maze world initialized with {} bodies (maze: {})",
            world.entries.len(),
            world.has_maze()
        );
        Ok(world)
    }

    fn insert(&mut self, def: &BodyDef) -> Result<RigidBodyHandle, MazeError> {
        let (body, collider) = def.build()?;
        let handle = self.bodies.insert(body);
        self.colliders.insert_with_parent(collider, handle, &mut self.bodies);
        self.entries.push(BodyEntry {
            id: def.id,
            handle,
            activation: def.activation,
        });
        log::info!("Added {:?} body ({}, mass {})", def.id, def.shape.name(), def.mass);
        Ok(handle)
    }

    /// Advance the simulation by `elapsed_seconds`.
    ///
    /// The time is split into equal sub-steps no longer than `max_substep_seconds`,
    /// at most `max_substeps` of them. Negative or non-finite input counts as zero.
    /// Any force applied since the previous step is consumed, even when no time passes.
    ///
    /// Returns the number of sub-steps run.
    pub fn step(&mut self, elapsed_seconds: f32) -> u32 {
        let elapsed = if elapsed_seconds.is_finite() && elapsed_seconds >= 0.0 {
            elapsed_seconds
        } else {
            log::warn!("Ignoring invalid step duration {elapsed_seconds}");
            0.0
        };

        if elapsed > self.settings.max_step_seconds() {
            log::warn!(
                "Step of {elapsed}s exceeds {}s; dropping the excess",
                self.settings.max_step_seconds()
            );
        }

        let (substeps, dt) = plan_substeps(
            elapsed,
            self.settings.max_substep_seconds,
            self.settings.max_substeps,
        );

        self.integration_parameters.dt = dt;
        let hooks = ();
        let events = ();
        for _ in 0..substeps {
            self.physics_pipeline.step(
                &self.gravity,
                &self.integration_parameters,
                &mut self.islands,
                &mut self.broad_phase,
                &mut self.narrow_phase,
                &mut self.bodies,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                &mut self.ccd_solver,
                &hooks,
                &events,
            );
        }

        if let Some(ball) = self.bodies.get_mut(self.ball) {
            ball.reset_forces(false);
        }

        log::trace!("Stepped {substeps} x {dt}s");
        substeps
    }

    /// Accumulate a central force on the ball for the next `step()` only.
    pub fn apply_force(&mut self, force: Vec3) {
        if let Some(ball) = self.bodies.get_mut(self.ball) {
            ball.add_force(force, true);
        }
    }

    /// Current ball transform in simulation space.
    pub fn ball_transform(&self) -> Transform {
        let ball = &self.bodies[self.ball];
        Transform::new(*ball.translation(), *ball.rotation())
    }

    pub fn ball_velocity(&self) -> Vec3 {
        *self.bodies[self.ball].linvel()
    }

    pub fn body_transform(&self, id: BodyId) -> Option<Transform> {
        let entry = self.entry(id)?;
        let body = self.bodies.get(entry.handle)?;
        Some(Transform::new(*body.translation(), *body.rotation()))
    }

    pub fn activation(&self, id: BodyId) -> Option<ActivationState> {
        self.entry(id).map(|entry| self.activation_of(entry))
    }

    fn activation_of(&self, entry: &BodyEntry) -> ActivationState {
        match self.bodies.get(entry.handle) {
            Some(body) if body.is_dynamic() && body.is_sleeping() => ActivationState::Deactivated,
            Some(body) if body.is_dynamic() => entry.activation,
            _ => ActivationState::Active,
        }
    }

    fn entry(&self, id: BodyId) -> Option<&BodyEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Transforms and activation of every body, in insertion order.
    ///
    /// Never mutates the world.
    pub fn snapshot(&self) -> Vec<BodySnapshot> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let body = self.bodies.get(entry.handle)?;
                Some(BodySnapshot {
                    id: entry.id,
                    transform: Transform::new(*body.translation(), *body.rotation()),
                    activation: self.activation_of(entry),
                })
            })
            .collect()
    }

    pub fn log_snapshot(&self) {
        for (i, snap) in self.snapshot().iter().enumerate() {
            let t = snap.transform.translation;
            log::debug!(
                "obj {i} {:?} [{:?}] world transform {:.4}, {:.4}, {:.4}",
                snap.id,
                snap.activation,
                t.x,
                t.y,
                t.z
            );
        }
    }

    pub fn has_maze(&self) -> bool {
        self.entry(BodyId::Maze).is_some()
    }

    pub fn body_count(&self) -> usize {
        self.entries.len()
    }

    pub fn settings(&self) -> &WorldSettings {
        &self.settings
    }

    /// Always the zero vector.
    pub fn ambient_gravity(&self) -> Vec3 {
        self.gravity
    }
}

/// Split `elapsed` into `(count, dt)` equal sub-steps.
///
/// `dt <= max_substep` and `count <= max_substeps`; time beyond
/// `max_substep * max_substeps` is not simulated.
pub(crate) fn plan_substeps(elapsed: f32, max_substep: f32, max_substeps: u32) -> (u32, f32) {
    if elapsed <= 0.0 || max_substep <= 0.0 || max_substeps == 0 {
        return (0, 0.0);
    }
    let simulated = elapsed.min(max_substep * max_substeps as f32);
    let count = ((simulated / max_substep).ceil() as u32).clamp(1, max_substeps);
    (count, simulated / count as f32)
}
