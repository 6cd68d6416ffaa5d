pub mod body;
pub mod constants;
pub mod controller;
pub mod error;
pub mod gravity;
pub mod mesh;
pub mod pose;
pub mod settings;
pub mod shapes;
pub mod types;
pub mod world;

// Re-export Rapier so hosts can reach engine types without depending on `rapier3d` directly.
pub use rapier3d;

pub use constants::{
    BALL_MASS, BALL_NATIVE_RADIUS, BALL_RADIUS, BALL_START_HEIGHT, DEFAULT_WORLD_GRAVITY,
    MAX_SUBSTEP_SECONDS, MAX_SUBSTEPS, MAZE_NATIVE_EDGE, MAZE_NATIVE_GAP, MAZE_SCALE,
    MAZE_SCALE_Y_EXTRA, STATIC_FRICTION, VERTICAL_SCALE_CORRECTION_FACTOR,
};
pub use controller::PhysicsController;
pub use error::{MazeError, MeshLoadError};
pub use gravity::{apply_maze_gravity, maze_gravity};
pub use mesh::{MeshBounds, MeshBuffer};
pub use pose::{Pose, ball_display_radius, display_scale};
pub use settings::{UnitScale, WorldSettings};
pub use shapes::{CollisionShape, build_ball_shape, build_floor_shape, build_maze_shape};
pub use types::{ActivationState, BodyId, Quat, Transform, Vec3};
pub use world::{BodySnapshot, MazeWorld};
