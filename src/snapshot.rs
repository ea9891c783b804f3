//! Per-frame view of the game for the external renderer
//!
//! The 3D scene lives outside this crate. Each frame the frontend serialises a
//! [`RenderSnapshot`] and hands it to the renderer; nothing flows back.

use glam::Vec3;
use serde::Serialize;

use crate::sim::{ChaseCamera, GamePhase, GameState};
use crate::ui::{Controls, Hud, pause_label};

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub pos: Vec3,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplosionView {
    pub id: u32,
    pub pos: Vec3,
    /// Seconds the effect has been alive (drives particle spread)
    pub age: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    /// Absent until the session starts
    pub player: Option<Vec3>,
    /// Only while the session is running or paused
    pub obstacles: Vec<ObstacleView>,
    pub obstacle_color: String,
    pub obstacle_rgb: [f32; 3],
    pub explosions: Vec<ExplosionView>,
    pub camera: ChaseCamera,
    /// Lane half width, for drawing the lane lines
    pub lane_half_width: f32,
    pub hud: Hud,
    pub controls: Controls,
    pub pause_label: &'static str,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let level = state.current_level();
        let in_play = matches!(state.phase, GamePhase::Running | GamePhase::Paused);
        let lifetime = f64::from(state.tuning.explosion_lifetime);

        Self {
            phase: state.phase,
            player: state.phase.is_started().then_some(state.player.pos),
            obstacles: if in_play {
                state
                    .obstacles
                    .iter()
                    .map(|o| ObstacleView { id: o.id, pos: o.pos })
                    .collect()
            } else {
                Vec::new()
            },
            obstacle_color: level.css_color(),
            obstacle_rgb: level.rgb(),
            explosions: state
                .explosions
                .iter()
                .map(|e| ExplosionView {
                    id: e.id,
                    pos: e.pos,
                    age: (state.clock - (e.expires_at - lifetime)) as f32,
                })
                .collect(),
            camera: state.camera,
            lane_half_width: state.tuning.lane_half_width,
            hud: Hud::from_state(state),
            controls: Controls::for_phase(state.phase),
            pause_label: pause_label(state.phase),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FrameInput, frame};

    #[test]
    fn test_snapshot_before_start() {
        let state = GameState::new(1);
        let snap = RenderSnapshot::capture(&state);
        assert!(snap.player.is_none());
        assert!(snap.obstacles.is_empty());
        assert!(snap.controls.start);
        assert_eq!(snap.obstacle_color, "hsl(0, 100%, 50%)");
    }

    #[test]
    fn test_snapshot_while_running() {
        let mut state = GameState::new(1);
        state.start();
        state.on_collision(Vec3::new(1.0, 0.5, -1.0));
        frame(&mut state, &FrameInput::default(), 0.25);

        let snap = RenderSnapshot::capture(&state);
        assert_eq!(snap.player, Some(state.player.pos));
        assert_eq!(snap.obstacles.len(), 5);
        assert_eq!(snap.explosions.len(), 1);
        assert!((snap.explosions[0].age - 0.25).abs() < 1e-5);
        assert_eq!(snap.hud.message.as_deref(), Some("💥 Collision!"));
        assert!(snap.controls.pause_toggle);
    }

    #[test]
    fn test_snapshot_json() {
        let mut state = GameState::new(1);
        state.start();
        let json = RenderSnapshot::capture(&state).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Running");
        assert_eq!(value["obstacles"].as_array().map(Vec::len), Some(5));
        assert_eq!(value["player"][1].as_f64().map(|y| (y * 10.0).round()), Some(1.0));
    }
}
