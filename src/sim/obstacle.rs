//! Obstacle spawning and recycling
//!
//! A single spawn timer creates one obstacle per interval at the spawn
//! column with a random gap height. Obstacles scroll left with the world and
//! are released once they pass the despawn threshold.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Shape shared by every spawned obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleTemplate {
    /// Width of the solid columns
    pub width: f32,
    /// Height of the passable gap (the goal volume)
    pub gap_height: f32,
}

impl Default for ObstacleTemplate {
    fn default() -> Self {
        Self {
            width: 52.0,
            gap_height: 130.0,
        }
    }
}

/// A spawned obstacle. `pos` is the center of its gap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub template: ObstacleTemplate,
}

impl Obstacle {
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.template.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.template.width / 2.0
    }

    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.pos.y - self.template.gap_height / 2.0
    }

    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.pos.y + self.template.gap_height / 2.0
    }
}

/// What changed during one [`ObstacleSpawner::advance`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnerStep {
    pub released: Vec<u32>,
    pub spawned: Option<Obstacle>,
}

/// Owns every active obstacle and the spawn timer
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    template: ObstacleTemplate,
    obstacles: Vec<Obstacle>,
    spawn_timer: f32,
    rng: Pcg32,
    next_id: u32,
}

impl ObstacleSpawner {
    pub fn new(template: ObstacleTemplate, rng: Pcg32) -> Self {
        Self {
            template,
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            rng,
            next_id: 1,
        }
    }

    /// Active obstacles in spawn order
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawn_timer
    }

    pub fn template(&self) -> ObstacleTemplate {
        self.template
    }

    /// Scroll, release off-screen obstacles, then run the spawn timer
    pub fn advance(&mut self, dt: f32, tuning: &Tuning) -> SpawnerStep {
        let mut step = SpawnerStep::default();

        let dx = tuning.scroll_speed * dt;
        for obstacle in &mut self.obstacles {
            obstacle.pos.x -= dx;
        }

        let despawn_x = tuning.despawn_x;
        self.obstacles.retain(|o| {
            if o.pos.x <= despawn_x {
                step.released.push(o.id);
                false
            } else {
                true
            }
        });
        for id in &step.released {
            log::debug!("Released obstacle {id}");
        }

        self.spawn_timer += dt;
        if self.spawn_timer > tuning.spawn_interval {
            step.spawned = Some(self.spawn(tuning));
            self.spawn_timer = 0.0;
        }

        step
    }

    fn spawn(&mut self, tuning: &Tuning) -> Obstacle {
        let y = self
            .rng
            .random_range(tuning.spawn_y_min..=tuning.spawn_y_max);
        let obstacle = Obstacle {
            id: self.next_id,
            pos: Vec2::new(tuning.spawn_x, y),
            template: self.template,
        };
        self.next_id += 1;
        self.obstacles.push(obstacle);
        log::debug!("Spawned obstacle {} at ({}, {:.1})", obstacle.id, obstacle.pos.x, y);

        let cap = tuning.expected_max_obstacles();
        if self.obstacles.len() > cap {
            log::warn!(
                "{} obstacles active, expected at most {} at steady state",
                self.obstacles.len(),
                cap
            );
        }
        obstacle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const DT: f32 = 1.0 / 60.0;

    fn spawner(seed: u64) -> ObstacleSpawner {
        ObstacleSpawner::new(ObstacleTemplate::default(), Pcg32::seed_from_u64(seed))
    }

    #[test]
    fn test_single_long_advance_spawns_once() {
        let tuning = Tuning::default();
        let mut s = spawner(1);
        let step = s.advance(1.6, &tuning);

        let spawned = step.spawned.unwrap();
        assert_eq!(spawned.pos.x, 352.0);
        assert!((234.0..=382.0).contains(&spawned.pos.y));
        assert_eq!(s.obstacles().len(), 1);
        assert_eq!(s.spawn_timer(), 0.0);
    }

    #[test]
    fn test_timer_must_exceed_interval() {
        let tuning = Tuning::default();
        let mut s = spawner(1);
        assert!(s.advance(1.5, &tuning).spawned.is_none());
        assert_eq!(s.spawn_timer(), 1.5);
        assert!(s.advance(0.01, &tuning).spawned.is_some());
    }

    #[test]
    fn test_empty_spawner_advances() {
        let tuning = Tuning::default();
        let mut s = spawner(1);
        let step = s.advance(DT, &tuning);
        assert_eq!(step, SpawnerStep::default());
        assert!(s.obstacles().is_empty());
    }

    #[test]
    fn test_released_at_threshold_never_before() {
        let tuning = Tuning::default();
        let mut s = spawner(7);
        let first = s.advance(1.6, &tuning).spawned.unwrap();

        let mut x = first.pos.x;
        loop {
            let step = s.advance(DT, &tuning);
            x -= tuning.scroll_speed * DT;
            match s.obstacles().iter().find(|o| o.id == first.id) {
                Some(o) => {
                    assert!(o.pos.x > -26.0);
                    assert!(!step.released.contains(&first.id));
                }
                None => {
                    assert!(x <= -26.0 + 1e-3);
                    assert_eq!(step.released, vec![first.id]);
                    break;
                }
            }
        }
    }

    #[test]
    fn test_release_and_spawn_in_one_advance() {
        let tuning = Tuning::default();
        let mut s = spawner(3);
        s.obstacles.push(Obstacle {
            id: 99,
            pos: Vec2::new(-20.0, 300.0),
            template: ObstacleTemplate::default(),
        });
        s.spawn_timer = 1.45;

        let step = s.advance(0.1, &tuning);
        assert_eq!(step.released, vec![99]);
        assert!(step.spawned.is_some());
        assert_eq!(s.obstacles().len(), 1);
    }

    #[test]
    fn test_steady_state_stays_small() {
        let tuning = Tuning::default();
        let mut s = spawner(11);
        for _ in 0..(60 * 60) {
            s.advance(DT, &tuning);
            assert!(s.obstacles().len() <= 3);
        }
    }

    #[test]
    fn test_same_seed_same_heights() {
        let tuning = Tuning::default();
        let mut a = spawner(42);
        let mut b = spawner(42);
        for _ in 0..5 {
            let ya = a.advance(1.6, &tuning).spawned.unwrap().pos.y;
            let yb = b.advance(1.6, &tuning).spawned.unwrap().pos.y;
            assert_eq!(ya, yb);
        }
    }

    #[test]
    fn test_gap_edges() {
        let o = Obstacle {
            id: 1,
            pos: Vec2::new(100.0, 300.0),
            template: ObstacleTemplate::default(),
        };
        assert_eq!(o.left(), 74.0);
        assert_eq!(o.right(), 126.0);
        assert_eq!(o.gap_bottom(), 235.0);
        assert_eq!(o.gap_top(), 365.0);
    }
}
