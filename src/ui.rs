//! HUD and control state derived from the simulation

use serde::Serialize;

use crate::sim::{GamePhase, GameState, LEVEL_COUNT};

/// Which controls the page shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub start: bool,
    pub pause_toggle: bool,
    pub reset: bool,
}

impl Controls {
    pub fn for_phase(phase: GamePhase) -> Self {
        Self {
            start: phase == GamePhase::NotStarted,
            pause_toggle: matches!(phase, GamePhase::Running | GamePhase::Paused),
            reset: phase == GamePhase::GameOver,
        }
    }
}

/// Label of the pause toggle
pub fn pause_label(phase: GamePhase) -> &'static str {
    if phase == GamePhase::Paused {
        "▶️ Resume"
    } else {
        "⏸️ Pause"
    }
}

/// Elapsed seconds as `m:ss`
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// HUD values, already formatted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hud {
    pub lives: String,
    pub time: String,
    /// Passed obstacles against the current level goal
    pub passed: String,
    pub level: String,
    pub message: Option<String>,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        let level = state.current_level();
        Self {
            lives: "❤️".repeat(usize::from(state.lives)),
            time: format_time(state.elapsed_seconds),
            passed: format!("{}/{}", state.obstacles_passed, level.pass_threshold),
            level: format!("{}/{}", level.number(), LEVEL_COUNT),
            message: state.message_text(),
        }
    }
}
