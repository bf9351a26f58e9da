//! Player body kinematics
//!
//! Gravity, jump impulse, falling torque and the rotation clamps. The body
//! knows nothing about game phase; [`super::Simulation`] only calls in while
//! the run is active.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clamp_degrees;
use crate::scene::BodyDescriptor;
use crate::tuning::Tuning;

/// Rotation of the body after a fatal contact (degrees)
pub const FACE_PLANT_DEG: f32 = -90.0;

/// Position and rotation as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    /// Radians, counter-clockwise positive
    pub rotation: f32,
}

/// The player-controlled body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerBody {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Radians
    pub rotation: f32,
    /// Radians per second
    pub angular_vel: f32,
    /// Set on game over; the body no longer turns
    pub rotation_locked: bool,
    pub radius: f32,
    /// Seconds since the last jump
    pub since_touch: f32,
}

impl PlayerBody {
    pub fn new(desc: &BodyDescriptor) -> Self {
        Self {
            pos: Vec2::new(desc.x, desc.y),
            vel: Vec2::ZERO,
            rotation: 0.0,
            angular_vel: 0.0,
            rotation_locked: false,
            radius: desc.radius,
            since_touch: 0.0,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: self.pos,
            rotation: self.rotation,
        }
    }

    /// Accelerate downward for one step
    pub fn apply_gravity(&mut self, dt: f32, tuning: &Tuning) {
        self.vel.y += tuning.gravity * dt;
    }

    /// Move by the current velocity. Rotation only advances while unlocked.
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        if !self.rotation_locked {
            self.rotation += self.angular_vel * dt;
        }
    }

    /// Change angular velocity by `impulse / moment_of_inertia`
    pub fn apply_angular_impulse(&mut self, impulse: f32, tuning: &Tuning) {
        if self.rotation_locked {
            return;
        }
        self.angular_vel += impulse / tuning.moment_of_inertia;
    }

    /// Jump: the previous fall speed is discarded so every jump feels the same
    pub fn apply_jump_impulse(&mut self, tuning: &Tuning) {
        self.vel = Vec2::ZERO;
        self.vel.y += tuning.jump_impulse / tuning.mass;
        self.apply_angular_impulse(tuning.jump_spin, tuning);
        self.since_touch = 0.0;
    }

    /// Per-step clamps and falling torque
    pub fn tick(&mut self, dt: f32, tuning: &Tuning) {
        if self.vel.y > tuning.max_rise_speed {
            self.vel.y = tuning.max_rise_speed;
        }

        // Nose down once the jump has worn off
        if self.since_touch > tuning.touch_grace {
            self.apply_angular_impulse(tuning.fall_torque * dt, tuning);
        }

        self.clamp_rotation(tuning);
        self.since_touch += dt;
    }

    fn clamp_rotation(&mut self, tuning: &Tuning) {
        self.rotation = clamp_degrees(
            self.rotation,
            tuning.min_rotation_deg,
            tuning.max_rotation_deg,
        );
        self.angular_vel = self
            .angular_vel
            .clamp(tuning.min_angular_vel, tuning.max_angular_vel);
    }

    /// Stop all turning and face-plant
    pub fn freeze(&mut self) {
        self.rotation_locked = true;
        self.angular_vel = 0.0;
        self.rotation = FACE_PLANT_DEG.to_radians();
    }

    /// Keep the body on top of the ground. Returns true if it is resting.
    pub fn rest_on(&mut self, ground_top: f32) -> bool {
        let floor = ground_top + self.radius;
        if self.pos.y > floor {
            return false;
        }
        self.pos.y = floor;
        if self.vel.y < 0.0 {
            self.vel.y = 0.0;
        }
        self.vel.x = 0.0;
        true
    }
}
