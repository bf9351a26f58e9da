//! Game state and the simulation aggregate
//!
//! [`Simulation`] owns every entity of a run. A run is terminal once it
//! reaches [`GamePhase::GameOver`]; the host starts over by building a new
//! instance.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{PlayerBody, Pose};
use super::collision::{ContactOutcome, ContactTag, classify};
use super::obstacle::{Obstacle, ObstacleSpawner};
use super::scroll::{ScrollManager, ScrollTile};
use crate::error::SimError;
use crate::scene::SceneDescriptor;
use crate::tuning::Tuning;

/// Undrained events kept before the oldest are dropped
pub const MAX_PENDING_EVENTS: usize = 256;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    /// Run ended; terminal
    GameOver,
}

/// Notifications for the host, drained after each step. Hosts that only
/// poll state may never drain; the queue then keeps the newest
/// [`MAX_PENDING_EVENTS`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Jumped,
    ObstacleSpawned { id: u32, pos: Vec2 },
    ObstacleReleased { id: u32 },
    Scored { score: u64 },
    /// Emitted exactly once. The host stops player animations, reveals the
    /// restart control and shakes the scene.
    GameOver { score: u64 },
}

/// Tile position as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    pub layer: usize,
    pub tile: ScrollTile,
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub pose: Pose,
    pub obstacles: Vec<Obstacle>,
    pub tiles: Vec<TileView>,
}

/// One run of the game
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(super) tuning: Tuning,
    pub(super) phase: GamePhase,
    pub(super) score: u64,
    pub(super) body: PlayerBody,
    pub(super) scroll: ScrollManager,
    pub(super) spawner: ObstacleSpawner,
    pub(super) viewport: Vec2,
    pub(super) ground_top: f32,
    /// Simulation tick counter
    pub(super) time_ticks: u64,
    pub(super) events: VecDeque<SimEvent>,
}

impl Simulation {
    /// Build a run from a scene, seeding obstacle placement from `seed`
    pub fn new(scene: &SceneDescriptor, tuning: Tuning, seed: u64) -> Result<Self, SimError> {
        let mut sim = Self::with_rng(scene, tuning, Pcg32::seed_from_u64(seed))?;
        sim.seed = seed;
        Ok(sim)
    }

    /// Build a run with an explicit random source for obstacle placement
    pub fn with_rng(scene: &SceneDescriptor, tuning: Tuning, rng: Pcg32) -> Result<Self, SimError> {
        tuning.validate()?;
        scene.validate_layout()?;
        let hero = scene.hero()?;
        let template = scene.obstacle_template()?;

        let sim = Self {
            seed: 0,
            body: PlayerBody::new(hero),
            scroll: ScrollManager::new(&scene.scroll_layers, scene.width),
            spawner: ObstacleSpawner::new(template, rng),
            viewport: Vec2::new(scene.width, scene.height),
            ground_top: scene.ground_top,
            tuning,
            phase: GamePhase::Active,
            score: 0,
            time_ticks: 0,
            events: VecDeque::new(),
        };
        log::info!(
            "Simulation ready: hero at ({}, {}), {} scroll layer(s)",
            hero.x,
            hero.y,
            sim.scroll.layers.len()
        );
        Ok(sim)
    }

    pub fn current_score(&self) -> u64 {
        self.score
    }

    pub fn current_state(&self) -> GamePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Active
    }

    pub fn player_pose(&self) -> Pose {
        self.body.pose()
    }

    pub fn body(&self) -> &PlayerBody {
        &self.body
    }

    /// Active obstacles in spawn order
    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.spawner.obstacles().iter()
    }

    /// Every background tile, tagged with its layer index
    pub fn scroll_tiles(&self) -> impl Iterator<Item = (usize, &ScrollTile)> {
        self.scroll.tiles()
    }

    pub fn spawn_timer(&self) -> f32 {
        self.spawner.spawn_timer()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn ground_top(&self) -> f32 {
        self.ground_top
    }

    /// Playfield width and height
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Take the events emitted since the last call, oldest first
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.events.drain(..).collect()
    }

    pub(super) fn push_event(&mut self, event: SimEvent) {
        if self.events.len() == MAX_PENDING_EVENTS {
            self.events.pop_front();
            log::trace!("Event queue full, dropped oldest event");
        }
        self.events.push_back(event);
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            phase: self.phase,
            score: self.score,
            pose: self.body.pose(),
            obstacles: self.spawner.obstacles().to_vec(),
            tiles: self
                .scroll
                .tiles()
                .map(|(layer, tile)| TileView { layer, tile: *tile })
                .collect(),
        }
    }

    /// Jump input. Ignored once the run has ended.
    pub fn on_jump_pressed(&mut self) {
        if self.phase != GamePhase::Active {
            return;
        }
        self.body.apply_jump_impulse(&self.tuning);
        self.push_event(SimEvent::Jumped);
    }

    /// A contact between two host bodies began
    pub fn on_contact(&mut self, a: &ContactTag, b: &ContactTag) -> ContactOutcome {
        let outcome = classify(a, b, self.phase);
        match outcome {
            ContactOutcome::Score => {
                self.score += 1;
                log::debug!("Goal ({a}/{b}), score {}", self.score);
                self.push_event(SimEvent::Scored { score: self.score });
            }
            ContactOutcome::Ignore => {
                log::trace!("Contact {a}/{b} ignored, run already over");
            }
            ContactOutcome::Terminate => {
                log::info!("Fatal contact {a}/{b}, final score {}", self.score);
                self.game_over();
            }
        }
        outcome
    }

    /// [`Self::on_contact`] for hosts that report node names
    pub fn on_contact_named(&mut self, a: &str, b: &str) -> ContactOutcome {
        self.on_contact(&ContactTag::from_name(a), &ContactTag::from_name(b))
    }

    fn game_over(&mut self) {
        self.phase = GamePhase::GameOver;
        self.body.freeze();
        self.push_event(SimEvent::GameOver { score: self.score });
    }
}
