//! Headless frame driver: tilts a maze back and forth and logs where the ball goes.
//!
//! Usage: `maze_headless [--wall-clock] [path/to/maze.obj] [frames]`
//!
//! Without a mesh (or if it fails to load) the ball rolls on the bare floor plane.
//! `--wall-clock` paces frames in real time and advances by measured elapsed time,
//! the way an interactive host does; otherwise every frame steps exactly 1/60 s.

use std::env;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use maze_physics::{
    DEFAULT_WORLD_GRAVITY, PhysicsController, Quat, Vec3, WorldSettings, maze_gravity,
};

const FRAME_SECONDS: f32 = 1.0 / 60.0;
const DEFAULT_FRAMES: u32 = 600;
const LOG_EVERY: u32 = 30;

/// Maximum tilt of the simulated device, radians.
const MAX_TILT: f32 = 0.35;

/// Anchor orientation for frame `frame`: a slow wobble around X and Z.
fn anchor_rotation(frame: u32) -> Quat {
    let t = frame as f32 * FRAME_SECONDS;
    let roll = MAX_TILT * (t * 0.9).sin();
    let pitch = MAX_TILT * (t * 0.6).cos();
    Quat::from_euler_angles(pitch, 0.0, roll)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let (flags, positional): (Vec<String>, Vec<String>) =
        env::args().skip(1).partition(|arg| arg.starts_with("--"));
    let mut wall_clock = false;
    for flag in &flags {
        match flag.as_str() {
            "--wall-clock" => wall_clock = true,
            other => anyhow::bail!("unknown flag `{other}`"),
        }
    }

    let mut args = positional.into_iter();
    let mesh_path = args.next();
    let frames = match args.next() {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("invalid frame count `{raw}`"))?,
        None => DEFAULT_FRAMES,
    };

    let settings = WorldSettings::default();
    let mut controller = match mesh_path {
        Some(path) => PhysicsController::from_obj_path(&path, settings)?,
        None => PhysicsController::new(None, settings)?,
    };

    if wall_clock {
        // Construction time must not count as the first frame.
        controller.initialize()?;
    }

    let world_gravity = Vec3::from(DEFAULT_WORLD_GRAVITY);
    for frame in 0..frames {
        let gravity = maze_gravity(&anchor_rotation(frame), world_gravity);
        controller.apply_gravity_to_ball(gravity);
        if wall_clock {
            thread::sleep(Duration::from_secs_f32(FRAME_SECONDS));
            controller.update_physics();
        } else {
            controller.step(FRAME_SECONDS);
        }

        if frame % LOG_EVERY == 0 {
            let pose = controller.ball_pose();
            let [x, y, z] = pose.translation_array();
            log::info!("frame {frame:>5}: ball at ({x:8.2}, {y:8.2}, {z:8.2})");
        }
    }

    controller.world().log_snapshot();
    let [x, y, z] = controller.ball_pose().translation_array();
    println!("final ball position (native units): {x:.3} {y:.3} {z:.3}");
    Ok(())
}
