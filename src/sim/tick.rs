//! Fixed timestep simulation tick
//!
//! Advances a run by one step. While active, kinematics, scrolling and
//! obstacles all move; after game over only the optional post-death
//! behaviour configured in [`crate::Tuning`] runs.

use super::collision::ContactTag;
use super::state::{GamePhase, SimEvent, Simulation};

/// Everything the host delivers for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump pressed since the previous tick
    pub jump: bool,
    /// Contacts that began since the previous tick
    pub contacts: Vec<(ContactTag, ContactTag)>,
}

/// Apply pending contacts and input, then advance by `dt`
pub fn tick(sim: &mut Simulation, input: &TickInput, dt: f32) {
    for (a, b) in &input.contacts {
        sim.on_contact(a, b);
    }
    if input.jump {
        sim.on_jump_pressed();
    }
    sim.step(dt);
}

impl Simulation {
    /// Advance the run by one fixed timestep
    pub fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("Ignoring invalid timestep {dt}");
            0.0
        };

        match self.phase {
            GamePhase::Active => self.step_active(dt),
            GamePhase::GameOver => self.step_game_over(dt),
        }
    }

    fn step_active(&mut self, dt: f32) {
        self.time_ticks += 1;

        self.body.apply_gravity(dt, &self.tuning);
        self.body.integrate(dt);
        self.body.tick(dt, &self.tuning);
        log::trace!(
            "tick {}: pos=({:.1}, {:.1}) vy={:.1} rot={:.3} w={:.2}",
            self.time_ticks,
            self.body.pos.x,
            self.body.pos.y,
            self.body.vel.y,
            self.body.rotation,
            self.body.angular_vel
        );

        self.scroll.advance(dt, self.tuning.scroll_speed);

        let step = self.spawner.advance(dt, &self.tuning);
        for id in step.released {
            self.push_event(SimEvent::ObstacleReleased { id });
        }
        if let Some(obstacle) = step.spawned {
            self.push_event(SimEvent::ObstacleSpawned {
                id: obstacle.id,
                pos: obstacle.pos,
            });
        }
    }

    fn step_game_over(&mut self, dt: f32) {
        if self.tuning.scroll_after_game_over {
            self.scroll.advance(dt, self.tuning.scroll_speed);
        }
        if self.tuning.body_falls_after_game_over {
            self.body.apply_gravity(dt, &self.tuning);
            self.body.integrate(dt);
            self.body.rest_on(self.ground_top);
        }
    }
}
