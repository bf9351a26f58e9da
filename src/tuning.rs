//! Physics and scheduling constants
//!
//! Loaded from JSON so balance can be changed without recompiling. Every
//! field defaults to the value in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SimError;

/// Environment variable naming a tuning file for [`Tuning::load`]
pub const TUNING_ENV: &str = "HOPPY_TUNING";

/// Data-driven simulation constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Kinematics ===
    pub gravity: f32,
    /// Vertical velocity cap while active
    pub max_rise_speed: f32,
    pub jump_impulse: f32,
    pub jump_spin: f32,
    /// Angular impulse per second applied once `touch_grace` has elapsed
    pub fall_torque: f32,
    pub touch_grace: f32,
    pub min_rotation_deg: f32,
    pub max_rotation_deg: f32,
    pub min_angular_vel: f32,
    pub max_angular_vel: f32,
    pub mass: f32,
    pub moment_of_inertia: f32,

    // === World ===
    pub scroll_speed: f32,
    pub spawn_interval: f32,
    pub spawn_x: f32,
    pub spawn_y_min: f32,
    pub spawn_y_max: f32,
    pub despawn_x: f32,

    // === After death ===
    /// Keep scrolling background layers once the run has ended
    pub scroll_after_game_over: bool,
    /// Let the frozen body keep falling until it rests on the ground
    pub body_falls_after_game_over: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            max_rise_speed: MAX_RISE_SPEED,
            jump_impulse: JUMP_IMPULSE,
            jump_spin: JUMP_SPIN,
            fall_torque: FALL_TORQUE,
            touch_grace: TOUCH_GRACE,
            min_rotation_deg: MIN_ROTATION_DEG,
            max_rotation_deg: MAX_ROTATION_DEG,
            min_angular_vel: MIN_ANGULAR_VEL,
            max_angular_vel: MAX_ANGULAR_VEL,
            mass: 1.0,
            moment_of_inertia: 1.0,

            scroll_speed: SCROLL_SPEED,
            spawn_interval: SPAWN_INTERVAL,
            spawn_x: SPAWN_X,
            spawn_y_min: SPAWN_Y_MIN,
            spawn_y_max: SPAWN_Y_MAX,
            despawn_x: DESPAWN_X,

            scroll_after_game_over: false,
            body_falls_after_game_over: true,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Tuning = serde_json::from_str(json).map_err(|source| SimError::Parse {
            what: "tuning",
            source,
        })?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a tuning file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load tuning from the file named by `HOPPY_TUNING`. Falls back to
    /// defaults if the variable is unset or the file is unusable.
    pub fn load() -> Self {
        let Ok(path) = std::env::var(TUNING_ENV) else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::warn!("{e}, using default tuning");
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        let finite = [
            ("gravity", self.gravity),
            ("max_rise_speed", self.max_rise_speed),
            ("jump_impulse", self.jump_impulse),
            ("jump_spin", self.jump_spin),
            ("fall_torque", self.fall_torque),
            ("touch_grace", self.touch_grace),
            ("min_rotation_deg", self.min_rotation_deg),
            ("max_rotation_deg", self.max_rotation_deg),
            ("min_angular_vel", self.min_angular_vel),
            ("max_angular_vel", self.max_angular_vel),
            ("scroll_speed", self.scroll_speed),
            ("spawn_x", self.spawn_x),
            ("spawn_y_min", self.spawn_y_min),
            ("spawn_y_max", self.spawn_y_max),
            ("despawn_x", self.despawn_x),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SimError::tuning(field, format!("{value} is not finite")));
            }
        }

        let positive = [
            ("mass", self.mass),
            ("moment_of_inertia", self.moment_of_inertia),
            ("spawn_interval", self.spawn_interval),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::tuning(field, format!("{value} must be positive")));
            }
        }

        if self.scroll_speed < 0.0 {
            return Err(SimError::tuning("scroll_speed", "must not be negative"));
        }
        if self.min_rotation_deg > self.max_rotation_deg {
            return Err(SimError::tuning("min_rotation_deg", "exceeds max_rotation_deg"));
        }
        if self.min_angular_vel > self.max_angular_vel {
            return Err(SimError::tuning("min_angular_vel", "exceeds max_angular_vel"));
        }
        if self.spawn_y_min > self.spawn_y_max {
            return Err(SimError::tuning("spawn_y_min", "exceeds spawn_y_max"));
        }
        if self.despawn_x >= self.spawn_x {
            return Err(SimError::tuning(
                "despawn_x",
                "must lie left of the spawn column",
            ));
        }
        Ok(())
    }

    /// Seconds an obstacle stays on screen at the scroll speed
    pub fn obstacle_lifetime(&self) -> f32 {
        (self.spawn_x - self.despawn_x) / self.scroll_speed
    }

    /// Upper bound on concurrently active obstacles in steady state
    pub fn expected_max_obstacles(&self) -> usize {
        if self.scroll_speed <= 0.0 {
            return usize::MAX;
        }
        ((self.obstacle_lifetime() / self.spawn_interval).ceil() as usize).saturating_add(1)
    }
}
