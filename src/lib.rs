//! Lane Dash - A lane-dodging arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, progression)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (audio, auto-pause)
//! - `input`: Direction pad (press/hold/release)
//! - `ui`: Control visibility and HUD text
//! - `snapshot`: Per-frame view handed to the external renderer

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod input;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod tuning;
pub mod ui;

pub use input::DirectionPad;
pub use settings::Settings;
pub use snapshot::RenderSnapshot;
pub use tuning::{Tuning, TuningError};

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Nominal frame rate used by the headless runner
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta the frontend will feed the simulation (tab switches etc.)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Period of the elapsed-time counter
    pub const SECOND_TICK_MS: i32 = 1000;

    /// Lane extends from -LANE_HALF_WIDTH to +LANE_HALF_WIDTH on x
    pub const LANE_HALF_WIDTH: f32 = 5.0;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 5.0; // units/second
    pub const PLAYER_SPAWN: [f32; 3] = [0.0, 0.1, 0.0];
    /// Car model bounds after its 1.5x scale (half extents)
    pub const PLAYER_HALF_EXTENTS: [f32; 3] = [0.6, 0.45, 1.2];

    /// Obstacle defaults (unit cubes)
    pub const OBSTACLE_BASE_SPEED: f32 = 4.0; // units/second before level multiplier
    pub const OBSTACLE_Y: f32 = 0.5;
    pub const OBSTACLE_SPAWN_Z: f32 = -30.0;
    pub const OBSTACLE_RECYCLE_Z: f32 = -50.0;
    /// Obstacles beyond this z have passed the player
    pub const OBSTACLE_PASS_Z: f32 = 10.0;
    pub const OBSTACLE_HALF_EXTENTS: [f32; 3] = [0.5, 0.5, 0.5];

    /// Session defaults
    pub const STARTING_LIVES: u8 = 5;
    pub const EXPLOSION_LIFETIME: f32 = 1.0;
    pub const COLLISION_MESSAGE_SECS: f32 = 1.0;
    pub const LEVEL_UP_MESSAGE_SECS: f32 = 1.5;
}

/// Convert a `[x, y, z]` constant to a vector
#[inline]
pub fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

/// Linear interpolation factor clamped to [0, 1]
#[inline]
pub fn lerp_factor(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}
