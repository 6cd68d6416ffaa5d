//! Collision geometry for the maze world.
//!
//! Shapes are plain definitions until a body is inserted into the world; the Rapier
//! collider is built from them by [`collider_from_shape`].

use rapier3d::parry::shape::TriMeshFlags;
use rapier3d::prelude::*;

use crate::error::MazeError;
use crate::mesh::MeshBuffer;
use crate::settings::UnitScale;
use crate::types::Vec3;

/// Supported collision shapes.
#[derive(Clone, Debug)]
pub enum CollisionShape {
    /// Concave triangle mesh, scaled from native into simulation units.
    ///
    /// Only valid on immovable bodies.
    StaticConcaveMesh { mesh: MeshBuffer, scale: UnitScale },

    /// Sphere/ball (simulation units).
    Sphere { radius: f32 },

    /// Infinite one-sided plane `normal ⋅ x = offset` in body space.
    InfinitePlane { normal: Vec3, offset: f32 },
}

impl CollisionShape {
    /// Shapes without finite volume cannot be given mass.
    pub fn is_static_only(&self) -> bool {
        matches!(
            self,
            CollisionShape::StaticConcaveMesh { .. } | CollisionShape::InfinitePlane { .. }
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            CollisionShape::StaticConcaveMesh { .. } => "static concave mesh",
            CollisionShape::Sphere { .. } => "sphere",
            CollisionShape::InfinitePlane { .. } => "infinite plane",
        }
    }
}

/// Wrap a maze mesh as a static concave shape with separate horizontal/vertical scale.
pub fn build_maze_shape(
    mesh: MeshBuffer,
    horizontal_scale: f32,
    vertical_scale: f32,
) -> CollisionShape {
    debug_assert!(!mesh.is_empty(), "maze shape needs at least one triangle");
    CollisionShape::StaticConcaveMesh {
        mesh,
        scale: UnitScale::new(horizontal_scale, vertical_scale),
    }
}

pub fn build_ball_shape(radius: f32) -> CollisionShape {
    CollisionShape::Sphere { radius }
}

/// Floor safety net under an open-bottomed maze.
pub fn build_floor_shape(normal: Vec3, offset_from_origin: f32) -> CollisionShape {
    CollisionShape::InfinitePlane {
        normal,
        offset: offset_from_origin,
    }
}

/// Build a Rapier collider builder for `shape`.
///
/// The collider is attached to its body with an identity local transform, except for
/// planes which are shifted along their normal by `offset`.
pub fn collider_from_shape(shape: &CollisionShape) -> Result<ColliderBuilder, MazeError> {
    match shape {
        CollisionShape::StaticConcaveMesh { mesh, scale } => {
            // Scale vertices up front; the engine sees the mesh already in simulation units.
            let factors = scale.as_vector();
            let vertices: Vec<Point<Real>> = mesh
                .positions()
                .iter()
                .map(|p| Point::from(p.coords.component_mul(&factors)))
                .collect();
            let indices = mesh.indices().to_vec();

            // No ORIENTED flag: contacts are generated on both faces of each triangle.
            let flags = TriMeshFlags::MERGE_DUPLICATE_VERTICES
                | TriMeshFlags::DELETE_DEGENERATE_TRIANGLES;
            ColliderBuilder::trimesh_with_flags(vertices, indices, flags)
                .map_err(|e| MazeError::MeshShape(format!("{e:?}")))
        }

        CollisionShape::Sphere { radius } => Ok(ColliderBuilder::ball(*radius)),

        CollisionShape::InfinitePlane { normal, offset } => {
            // Rapier's half-space expects a `UnitVector<Real>`, not a raw vector.
            let unit_n = UnitVector::new_normalize(*normal);

            // Plane `unit_n ⋅ x = offset`: the half-space sits at `unit_n * offset`.
            let halfspace = HalfSpace::new(unit_n);
            Ok(ColliderBuilder::new(SharedShape::new(halfspace))
                .translation(unit_n.into_inner() * *offset))
        }
    }
}
