//! Game state and core simulation types
//!
//! `GameState` owns everything a session needs: entities, counters, phase,
//! transient message and explosion effects, plus the seeded RNG that drives
//! obstacle placement.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::camera::ChaseCamera;
use super::levels::{Level, level};
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Waiting for the Start control
    NotStarted,
    /// Active gameplay
    Running,
    /// Motion and accounting suspended, rendering continues
    Paused,
    /// Session ended; only a reset leaves this phase
    GameOver,
}

impl GamePhase {
    pub fn is_started(self) -> bool {
        self != GamePhase::NotStarted
    }

    pub fn is_game_over(self) -> bool {
        self == GamePhase::GameOver
    }

    /// Background loop plays only while running
    pub fn music_playing(self) -> bool {
        self == GamePhase::Running
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Defeat,
    Victory,
}

/// Movement command; exactly one direction is honoured per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
}

/// The player's car
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec3,
}

/// An obstacle block travelling toward the player
#[derive(Debug, Clone, Serialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec3,
}

/// A short-lived explosion effect at a collision site
#[derive(Debug, Clone, Serialize)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec3,
    /// Session clock time (seconds) at which the effect is removed
    pub expires_at: f64,
}

/// What the transient message is announcing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MessageKind {
    Collision,
    /// Level reached (1-based)
    LevelUp(usize),
    Defeat,
    Victory,
}

impl MessageKind {
    pub fn text(self) -> String {
        match self {
            MessageKind::Collision => "💥 Collision!".to_string(),
            MessageKind::LevelUp(n) => format!("✅ Level {n}"),
            MessageKind::Defeat => "💀 GAME OVER".to_string(),
            MessageKind::Victory => "🎉 WINNER".to_string(),
        }
    }
}

/// Transient on-screen message with an optional scheduled clear
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub kind: MessageKind,
    /// Session clock time (seconds) at which the message clears; `None` = sticky
    pub expires_at: Option<f64>,
}

/// Events emitted by the simulation for the frontend (audio, logging)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    Started,
    Paused,
    Resumed,
    Reset,
    ObstaclePassed,
    Collision { position: Vec3 },
    LevelUp { level: usize },
    GameOver { outcome: Outcome },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub outcome: Option<Outcome>,
    pub lives: u8,
    /// Whole seconds spent running (paused time excluded)
    pub elapsed_seconds: u32,
    pub obstacles_passed: u32,
    /// Index into the level table, never decreases until reset
    pub level_index: usize,
    pub player: Player,
    /// Active obstacles in fixed enumeration order
    pub obstacles: Vec<Obstacle>,
    pub explosions: Vec<Explosion>,
    pub message: Option<Message>,
    pub camera: ChaseCamera,
    /// Session clock in seconds; advances every frame, including paused ones
    pub clock: f64,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::NotStarted,
            outcome: None,
            lives: tuning.starting_lives,
            elapsed_seconds: 0,
            obstacles_passed: 0,
            level_index: 0,
            player: Player {
                pos: tuning.player_spawn,
            },
            obstacles: Vec::new(),
            explosions: Vec::new(),
            message: None,
            camera: ChaseCamera::default(),
            clock: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The level currently in play
    pub fn current_level(&self) -> &'static Level {
        level(self.level_index)
    }

    /// Uniform lateral position in [-w, w)
    pub(crate) fn random_lane_x(&mut self) -> f32 {
        let w = self.tuning.lane_half_width;
        self.rng.random_range(-w..w)
    }

    /// Bring the obstacle population up to the current level's row count.
    /// Existing obstacles keep their positions.
    pub(crate) fn fill_obstacle_rows(&mut self) {
        let rows = self.current_level().rows;
        while self.obstacles.len() < rows {
            let id = self.next_entity_id();
            let x = self.random_lane_x();
            let pos = Vec3::new(x, self.tuning.obstacle_y, self.tuning.obstacle_spawn_z);
            self.obstacles.push(Obstacle { id, pos });
        }
    }

    /// Put the player back at the spawn point
    pub fn respawn_player(&mut self) {
        self.player.pos = self.tuning.player_spawn;
    }

    /// Show a message, optionally clearing it after `secs`
    pub(crate) fn show_message(&mut self, kind: MessageKind, secs: Option<f32>) {
        self.message = Some(Message {
            kind,
            expires_at: secs.map(|s| self.clock + f64::from(s)),
        });
    }

    /// Text of the current message, if any
    pub fn message_text(&self) -> Option<String> {
        self.message.as_ref().map(|m| m.kind.text())
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// NotStarted -> Running
    pub fn start(&mut self) {
        if self.phase != GamePhase::NotStarted {
            return;
        }
        self.phase = GamePhase::Running;
        self.respawn_player();
        self.fill_obstacle_rows();
        self.events.push(GameEvent::Started);
        log::info!("Session started (seed {})", self.seed);
    }

    /// Running <-> Paused; no effect in other phases
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
                log::info!("Paused");
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                self.events.push(GameEvent::Resumed);
                log::info!("Resumed");
            }
            _ => {}
        }
    }

    /// Return to NotStarted with every field at its initial value.
    /// The RNG stream and session clock carry on.
    pub fn reset(&mut self) {
        self.phase = GamePhase::NotStarted;
        self.outcome = None;
        self.lives = self.tuning.starting_lives;
        self.elapsed_seconds = 0;
        self.obstacles_passed = 0;
        self.level_index = 0;
        self.message = None;
        self.obstacles.clear();
        self.explosions.clear();
        self.respawn_player();
        self.camera = ChaseCamera::default();
        self.events.push(GameEvent::Reset);
        log::info!("Session reset");
    }

    /// Enter GameOver, tearing down obstacles and effects
    pub(crate) fn finish(&mut self, outcome: Outcome) {
        self.phase = GamePhase::GameOver;
        self.outcome = Some(outcome);
        self.obstacles.clear();
        self.explosions.clear();
        let kind = match outcome {
            Outcome::Defeat => MessageKind::Defeat,
            Outcome::Victory => MessageKind::Victory,
        };
        self.show_message(kind, None);
        self.events.push(GameEvent::GameOver { outcome });
        log::info!(
            "Game over: {:?} after {}s, {} obstacles passed, level {}",
            outcome,
            self.elapsed_seconds,
            self.obstacles_passed,
            self.current_level().number()
        );
    }

    /// Drop explosions and messages whose display time is up
    pub(crate) fn prune_expired(&mut self) {
        let now = self.clock;
        self.explosions.retain(|e| e.expires_at > now);
        if self
            .message
            .as_ref()
            .and_then(|m| m.expires_at)
            .is_some_and(|t| t <= now)
        {
            self.message = None;
        }
    }
}
