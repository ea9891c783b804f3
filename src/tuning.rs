//! Data-driven game balance
//!
//! Every gameplay number the simulation reads lives in [`Tuning`]. The defaults
//! reproduce the shipped game; a JSON document can override any subset of them.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::vec3;

/// Errors raised while loading a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning value `{field}` must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("tuning value `{field}` must be finite (got {value})")]
    NotFinite { field: &'static str, value: f32 },
    #[error("player spawn x {x} lies outside the lane (half width {half_width})")]
    SpawnOutsideLane { x: f32, half_width: f32 },
    #[error("starting lives must be at least 1")]
    NoLives,
    #[error("obstacle track must satisfy recycle z < spawn z < pass z (got {recycle} / {spawn} / {pass})")]
    TrackOrder { recycle: f32, spawn: f32, pass: f32 },
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Player speed (units/second)
    pub player_speed: f32,
    /// Obstacle speed before the level multiplier (units/second)
    pub obstacle_base_speed: f32,
    /// Half width of the drivable lane
    pub lane_half_width: f32,
    pub player_spawn: Vec3,
    pub player_half_extents: Vec3,
    pub obstacle_y: f32,
    pub obstacle_spawn_z: f32,
    pub obstacle_recycle_z: f32,
    pub obstacle_pass_z: f32,
    pub obstacle_half_extents: Vec3,
    pub starting_lives: u8,
    /// Seconds an explosion effect stays on screen
    pub explosion_lifetime: f32,
    pub collision_message_secs: f32,
    pub level_up_message_secs: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_speed: PLAYER_SPEED,
            obstacle_base_speed: OBSTACLE_BASE_SPEED,
            lane_half_width: LANE_HALF_WIDTH,
            player_spawn: vec3(PLAYER_SPAWN),
            player_half_extents: vec3(PLAYER_HALF_EXTENTS),
            obstacle_y: OBSTACLE_Y,
            obstacle_spawn_z: OBSTACLE_SPAWN_Z,
            obstacle_recycle_z: OBSTACLE_RECYCLE_Z,
            obstacle_pass_z: OBSTACLE_PASS_Z,
            obstacle_half_extents: vec3(OBSTACLE_HALF_EXTENTS),
            starting_lives: STARTING_LIVES,
            explosion_lifetime: EXPLOSION_LIFETIME,
            collision_message_secs: COLLISION_MESSAGE_SECS,
            level_up_message_secs: LEVEL_UP_MESSAGE_SECS,
        }
    }
}

impl Tuning {
    /// Parse a (partial) tuning document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the values the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("player_speed", self.player_speed),
            ("obstacle_base_speed", self.obstacle_base_speed),
            ("lane_half_width", self.lane_half_width),
            ("player_spawn.x", self.player_spawn.x),
            ("player_spawn.y", self.player_spawn.y),
            ("player_spawn.z", self.player_spawn.z),
            ("player_half_extents.x", self.player_half_extents.x),
            ("player_half_extents.y", self.player_half_extents.y),
            ("player_half_extents.z", self.player_half_extents.z),
            ("obstacle_y", self.obstacle_y),
            ("obstacle_spawn_z", self.obstacle_spawn_z),
            ("obstacle_recycle_z", self.obstacle_recycle_z),
            ("obstacle_pass_z", self.obstacle_pass_z),
            ("obstacle_half_extents.x", self.obstacle_half_extents.x),
            ("obstacle_half_extents.y", self.obstacle_half_extents.y),
            ("obstacle_half_extents.z", self.obstacle_half_extents.z),
            ("explosion_lifetime", self.explosion_lifetime),
            ("collision_message_secs", self.collision_message_secs),
            ("level_up_message_secs", self.level_up_message_secs),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::NotFinite { field, value });
            }
        }

        let positive = [
            ("player_speed", self.player_speed),
            ("obstacle_base_speed", self.obstacle_base_speed),
            ("lane_half_width", self.lane_half_width),
            ("explosion_lifetime", self.explosion_lifetime),
            ("collision_message_secs", self.collision_message_secs),
            ("level_up_message_secs", self.level_up_message_secs),
            ("player_half_extents.x", self.player_half_extents.x),
            ("player_half_extents.y", self.player_half_extents.y),
            ("player_half_extents.z", self.player_half_extents.z),
            ("obstacle_half_extents.x", self.obstacle_half_extents.x),
            ("obstacle_half_extents.y", self.obstacle_half_extents.y),
            ("obstacle_half_extents.z", self.obstacle_half_extents.z),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NotPositive { field, value });
            }
        }

        if self.player_spawn.x.abs() > self.lane_half_width {
            return Err(TuningError::SpawnOutsideLane {
                x: self.player_spawn.x,
                half_width: self.lane_half_width,
            });
        }

        if self.starting_lives == 0 {
            return Err(TuningError::NoLives);
        }

        if !(self.obstacle_recycle_z < self.obstacle_spawn_z
            && self.obstacle_spawn_z < self.obstacle_pass_z)
        {
            return Err(TuningError::TrackOrder {
                recycle: self.obstacle_recycle_z,
                spawn: self.obstacle_spawn_z,
                pass: self.obstacle_pass_z,
            });
        }

        Ok(())
    }
}
