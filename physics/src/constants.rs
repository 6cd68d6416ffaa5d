/// Uniform scale applied to the maze asset on X and Z (native units -> simulation units).
///
/// The maze asset is roughly 492 units wide. At this scale it spans ~9.84 simulation
/// units, which keeps triangle sizes inside the solver's comfortable range of
/// roughly 0.2..10 units.
pub const MAZE_SCALE: f32 = 0.02;

/// Extra squash applied on top of [`MAZE_SCALE`] for the Y axis.
///
/// Walls end up at 1/10 of their modelled height, slightly above the ball radius,
/// so the ball stays visible from above.
pub const MAZE_SCALE_Y_EXTRA: f32 = 0.1;

/// Divisor applied to the Y axis of the ball pose, on top of [`MAZE_SCALE`].
///
/// Pose translation is converted back with the horizontal scale only. Y is therefore
/// reported exaggerated by `1 / MAZE_SCALE_Y_EXTRA` relative to the squashed maze.
/// `1.0` keeps that behavior; awaiting product confirmation before changing it.
pub const VERTICAL_SCALE_CORRECTION_FACTOR: f32 = 1.0;

/// Edge length of the maze asset in native units (largest of its X/Z extents).
pub const MAZE_NATIVE_EDGE: f32 = 492.65;

/// Width of the narrowest maze passage in native units.
pub const MAZE_NATIVE_GAP: f32 = 13.0;

/// Ball collision radius in simulation units.
///
/// Half of the passage width after scaling: `13 * 0.02 / 2 = 0.13`.
pub const BALL_RADIUS: f32 = 0.13;

/// Ball radius in native maze units, for sizing a visual proxy.
pub const BALL_NATIVE_RADIUS: f32 = BALL_RADIUS / MAZE_SCALE;

pub const BALL_MASS: f32 = 0.2;

/// Initial ball height above the maze floor (simulation units).
pub const BALL_START_HEIGHT: f32 = 0.5;

/// Friction of the maze walls and the floor plane.
pub const STATIC_FRICTION: f32 = 0.1;

/// Longest duration a single solver sub-step may cover (seconds).
pub const MAX_SUBSTEP_SECONDS: f32 = 1.0 / 60.0;

/// Maximum number of sub-steps per `step()` call.
///
/// Time beyond `MAX_SUBSTEPS * MAX_SUBSTEP_SECONDS` is dropped, so a frame delivered
/// after a long suspension cannot blow up the solver.
pub const MAX_SUBSTEPS: u32 = 8;

/// World-space gravity the frame driver feeds into the maze (simulation units / s^2).
pub const DEFAULT_WORLD_GRAVITY: [f32; 3] = [0.0, -10.0, 0.0];
