//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod obstacle;
pub mod probe;
pub mod scroll;
pub mod state;
pub mod tick;

pub use body::{FACE_PLANT_DEG, PlayerBody, Pose};
pub use collision::{ContactOutcome, ContactTag, classify};
pub use obstacle::{Obstacle, ObstacleSpawner, ObstacleTemplate, SpawnerStep};
pub use probe::ContactProbe;
pub use scroll::{ScrollLayer, ScrollManager, ScrollTile};
pub use state::{GamePhase, MAX_PENDING_EVENTS, SimEvent, Simulation, Snapshot, TileView};
pub use tick::{TickInput, tick};
