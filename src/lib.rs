//! Hoppy - simulation core of an endless side-scrolling hop game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, scrolling, obstacles, game state)
//! - `scene`: Scene descriptor (player body, scroll layers, obstacle template)
//! - `tuning`: Data-driven physics and scheduling constants
//! - `error`: Construction-time failures
//!
//! Rendering, input capture and persistence belong to the host. The host
//! calls [`sim::Simulation::step`] once per fixed tick, forwards jump input
//! and resolved contacts, and polls the query methods to redraw.

pub mod error;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use error::SimError;
pub use scene::SceneDescriptor;
pub use sim::{ContactTag, GamePhase, SimEvent, Simulation};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Downward acceleration (SpriteKit default 9.8 m/s² at 150 points/m)
    pub const GRAVITY: f32 = -1470.0;
    /// Upper bound on vertical velocity while active
    pub const MAX_RISE_SPEED: f32 = 400.0;
    /// Upward impulse applied on jump
    pub const JUMP_IMPULSE: f32 = 300.0;
    /// Angular impulse applied on jump
    pub const JUMP_SPIN: f32 = 1.0;
    /// Falling torque per second once the touch grace has elapsed
    pub const FALL_TORQUE: f32 = -20000.0;
    /// Seconds after a jump before the falling torque kicks in
    pub const TOUCH_GRACE: f32 = 0.2;

    /// Rotation limits (degrees)
    pub const MIN_ROTATION_DEG: f32 = -90.0;
    pub const MAX_ROTATION_DEG: f32 = 30.0;
    /// Angular velocity limits (rad/s)
    pub const MIN_ANGULAR_VEL: f32 = -1.0;
    pub const MAX_ANGULAR_VEL: f32 = 3.0;

    /// World scroll speed (units/s)
    pub const SCROLL_SPEED: f32 = 100.0;

    /// Obstacle scheduling
    pub const SPAWN_INTERVAL: f32 = 1.5;
    pub const SPAWN_X: f32 = 352.0;
    pub const SPAWN_Y_MIN: f32 = 234.0;
    pub const SPAWN_Y_MAX: f32 = 382.0;
    pub const DESPAWN_X: f32 = -26.0;
}

/// Clamp an angle given in radians to a range given in degrees
#[inline]
pub fn clamp_degrees(angle: f32, min_deg: f32, max_deg: f32) -> f32 {
    angle.clamp(min_deg.to_radians(), max_deg.to_radians())
}
