//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Seeded RNG only
//! - Stable iteration order (obstacle index order)
//! - No rendering, audio or platform dependencies

pub mod camera;
pub mod collision;
pub mod levels;
pub mod motion;
pub mod rules;
pub mod state;
pub mod tick;

pub use camera::ChaseCamera;
pub use collision::{Aabb, player_hits_obstacle};
pub use levels::{LEVEL_COUNT, LEVELS, Level, level};
pub use motion::RecycleSpot;
pub use state::{
    Direction, Explosion, GameEvent, GamePhase, GameState, Message, MessageKind, Obstacle,
    Outcome, Player,
};
pub use tick::{FrameInput, frame, tick_second};
