//! Geometric contact resolution
//!
//! For hosts without a physics engine. Tests the player body (a circle)
//! against the ground strip, each obstacle's two solid columns and the goal
//! volume between them, and reports only contacts that *began* since the
//! previous call, so passing one goal scores once.

use std::collections::BTreeSet;

use glam::Vec2;

use super::collision::ContactTag;
use super::obstacle::Obstacle;
use super::state::Simulation;

/// Something the body can be touching
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Touch {
    Goal(u32),
    Column(u32),
    Ground,
}

impl Touch {
    fn tag(self) -> ContactTag {
        match self {
            Touch::Goal(_) => ContactTag::Goal,
            Touch::Column(_) => ContactTag::Obstacle,
            Touch::Ground => ContactTag::Ground,
        }
    }
}

/// Edge-triggered contact detector
#[derive(Debug, Clone, Default)]
pub struct ContactProbe {
    touching: BTreeSet<Touch>,
}

impl ContactProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contacts that began since the previous call, goals first
    pub fn detect(&mut self, sim: &Simulation) -> Vec<(ContactTag, ContactTag)> {
        let body = sim.body();
        let center = body.pos;
        let r = body.radius;

        let mut now = BTreeSet::new();
        if center.y - r <= sim.ground_top() {
            now.insert(Touch::Ground);
        }
        for obstacle in sim.obstacles() {
            if circle_hits_goal(center, r, obstacle) {
                now.insert(Touch::Goal(obstacle.id));
            }
            if circle_hits_columns(center, r, obstacle) {
                now.insert(Touch::Column(obstacle.id));
            }
        }

        let began: Vec<_> = now
            .difference(&self.touching)
            .map(|t| (ContactTag::Hero, t.tag()))
            .collect();
        self.touching = now;
        began
    }
}

/// Circle vs axis-aligned box, bounds given as (min, max)
fn circle_hits_box(center: Vec2, r: f32, min: Vec2, max: Vec2) -> bool {
    let closest = center.clamp(min, max);
    center.distance_squared(closest) < r * r
}

fn circle_hits_goal(center: Vec2, r: f32, o: &Obstacle) -> bool {
    circle_hits_box(
        center,
        r,
        Vec2::new(o.left(), o.gap_bottom()),
        Vec2::new(o.right(), o.gap_top()),
    )
}

fn circle_hits_columns(center: Vec2, r: f32, o: &Obstacle) -> bool {
    let lower = circle_hits_box(
        center,
        r,
        Vec2::new(o.left(), f32::MIN),
        Vec2::new(o.right(), o.gap_bottom()),
    );
    let upper = circle_hits_box(
        center,
        r,
        Vec2::new(o.left(), o.gap_top()),
        Vec2::new(o.right(), f32::MAX),
    );
    lower || upper
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::scene::SceneDescriptor;
    use crate::sim::GamePhase;
    use crate::sim::obstacle::ObstacleTemplate;
    use crate::tuning::Tuning;

    fn obstacle_at(x: f32, y: f32) -> Obstacle {
        Obstacle {
            id: 1,
            pos: Vec2::new(x, y),
            template: ObstacleTemplate::default(),
        }
    }

    #[test]
    fn test_box_overlap() {
        let min = Vec2::new(0.0, 0.0);
        let max = Vec2::new(10.0, 10.0);
        assert!(circle_hits_box(Vec2::new(5.0, 5.0), 1.0, min, max));
        assert!(circle_hits_box(Vec2::new(12.0, 5.0), 3.0, min, max));
        assert!(!circle_hits_box(Vec2::new(14.0, 14.0), 3.0, min, max));
    }

    #[test]
    fn test_gap_center_touches_goal_only() {
        let o = obstacle_at(100.0, 300.0);
        assert!(circle_hits_goal(Vec2::new(100.0, 300.0), 14.0, &o));
        assert!(!circle_hits_columns(Vec2::new(100.0, 300.0), 14.0, &o));
        assert!(circle_hits_columns(Vec2::new(100.0, 200.0), 14.0, &o));
        assert!(circle_hits_columns(Vec2::new(100.0, 400.0), 14.0, &o));
        assert!(!circle_hits_goal(Vec2::new(30.0, 300.0), 14.0, &o));
    }

    #[test]
    fn test_falling_body_hits_ground_once() {
        let mut sim =
            Simulation::new(&SceneDescriptor::default(), Tuning::default(), 5).unwrap();
        let mut probe = ContactProbe::new();
        let mut ground_contacts = 0;

        for _ in 0..300 {
            sim.step(SIM_DT);
            for (a, b) in probe.detect(&sim) {
                if b == ContactTag::Ground {
                    ground_contacts += 1;
                }
                sim.on_contact(&a, &b);
            }
        }

        assert_eq!(ground_contacts, 1);
        assert_eq!(sim.current_state(), GamePhase::GameOver);
        assert_eq!(sim.current_score(), 0);
    }
}
