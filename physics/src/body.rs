use rapier3d::prelude::*;

use crate::error::MazeError;
use crate::shapes::{CollisionShape, collider_from_shape};
use crate::types::{ActivationState, BodyId, Vec3};

/// Definition of a rigid body before it is inserted into the world.
///
/// Conventions
/// - `mass == 0.0` means immovable (fixed); `mass > 0.0` means dynamic.
/// - Translation is in simulation units; bodies start unrotated.
#[derive(Clone, Debug)]
pub struct BodyDef {
    pub id: BodyId,
    pub shape: CollisionShape,
    pub mass: f32,
    pub friction: f32,
    pub translation: Vec3,
    pub activation: ActivationState,
    /// Continuous collision detection, dynamic bodies only.
    pub ccd: bool,
}

impl BodyDef {
    /// An immovable body at the origin.
    pub fn fixed(id: BodyId, shape: CollisionShape, friction: f32) -> Self {
        Self {
            id,
            shape,
            mass: 0.0,
            friction,
            translation: Vec3::zeros(),
            activation: ActivationState::Active,
            ccd: false,
        }
    }

    pub fn dynamic(id: BodyId, shape: CollisionShape, mass: f32, translation: Vec3) -> Self {
        Self {
            id,
            shape,
            mass,
            friction: 0.5,
            translation,
            activation: ActivationState::Active,
            ccd: false,
        }
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_activation(mut self, activation: ActivationState) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.mass == 0.0
    }

    /// Reject shape/mass pairings the engine cannot simulate.
    ///
    /// Concave meshes and infinite planes may only sit on immovable bodies.
    pub fn validate(&self) -> Result<(), MazeError> {
        if !self.mass.is_finite() || self.mass < 0.0 {
            return Err(MazeError::InvalidShapeConfiguration(format!(
                "{:?} has invalid mass {}",
                self.id, self.mass
            )));
        }
        if self.shape.is_static_only() && !self.is_static() {
            return Err(MazeError::InvalidShapeConfiguration(format!(
                "{:?}: a {} cannot be attached to a body with mass {}",
                self.id,
                self.shape.name(),
                self.mass
            )));
        }
        Ok(())
    }

    /// Validate, then build the Rapier body and collider for this definition.
    pub fn build(&self) -> Result<(RigidBody, Collider), MazeError> {
        self.validate()?;

        let builder = if self.is_static() {
            RigidBodyBuilder::fixed()
        } else {
            RigidBodyBuilder::dynamic().ccd_enabled(self.ccd)
        };
        let builder = match self.activation {
            ActivationState::Active => builder,
            ActivationState::AlwaysActive => builder.can_sleep(false),
            ActivationState::Deactivated => builder.sleeping(true),
        };
        let body = builder.translation(self.translation).build();

        let mut collider = collider_from_shape(&self.shape)?.friction(self.friction);
        if !self.is_static() {
            collider = collider.mass(self.mass);
        }

        Ok((body, collider.build()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshBuffer;
    use crate::shapes::{build_ball_shape, build_floor_shape, build_maze_shape};
    use crate::types::Point3;

    fn tiny_mesh() -> MeshBuffer {
        MeshBuffer::from_raw(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(10.0, 0.0, 0.0),
                Point3::new(0.0, 0.0, 10.0),
            ],
            [[0, 1, 2]],
        )
    }

    #[test]
    fn concave_mesh_with_mass_is_rejected() {
        let def = BodyDef::dynamic(
            BodyId::Maze,
            build_maze_shape(tiny_mesh(), 0.02, 0.002),
            1.0,
            Vec3::zeros(),
        );
        assert!(matches!(
            def.validate(),
            Err(MazeError::InvalidShapeConfiguration(_))
        ));
        assert!(def.build().is_err());
    }

    #[test]
    fn plane_with_mass_is_rejected() {
        let def = BodyDef::dynamic(
            BodyId::Floor,
            build_floor_shape(Vec3::y(), 0.0),
            0.5,
            Vec3::zeros(),
        );
        assert!(def.validate().is_err());
    }

    #[test]
    fn negative_mass_is_rejected() {
        let def = BodyDef::dynamic(BodyId::Ball, build_ball_shape(0.13), -1.0, Vec3::zeros());
        assert!(def.validate().is_err());
    }

    #[test]
    fn static_mesh_is_accepted() {
        let def = BodyDef::fixed(BodyId::Maze, build_maze_shape(tiny_mesh(), 0.02, 0.002), 0.1);
        let (body, collider) = def.build().unwrap();
        assert!(body.is_fixed());
        assert!((collider.friction() - 0.1).abs() < 1.0e-7);
    }

    #[test]
    fn always_active_body_starts_awake() {
        let def = BodyDef::dynamic(BodyId::Ball, build_ball_shape(0.13), 0.2, Vec3::y())
            .with_activation(ActivationState::AlwaysActive);
        let (body, _) = def.build().unwrap();
        assert!(body.is_dynamic());
        assert!(!body.is_sleeping());
    }
}
