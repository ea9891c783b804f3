//! Per-frame simulation step
//!
//! Frame order: advance the clock and prune expired effects, move the player,
//! then walk the obstacles in index order (move, pass check, collision check).
//! Collision tests therefore see this frame's player position.

use serde::Serialize;

use super::collision::player_hits_obstacle;
use super::motion::RecycleSpot;
use super::state::{Direction, GamePhase, GameState};

/// Input commands for a single frame
#[derive(Debug, Clone, Default, Serialize)]
pub struct FrameInput {
    /// Held direction control (None when released)
    pub direction: Direction,
    /// Demo mode - the simulation steers the car
    pub autopilot: bool,
}

/// Advance the game by one rendered frame of `dt` seconds
pub fn frame(state: &mut GameState, input: &FrameInput, dt: f32) {
    // Also rejects NaN
    if !(dt > 0.0) || !dt.is_finite() {
        return;
    }

    state.clock += f64::from(dt);
    state.prune_expired();

    if state.phase == GamePhase::Running {
        let direction = if input.autopilot {
            autopilot_direction(state)
        } else {
            input.direction
        };
        let tuning = &state.tuning;
        let (player_speed, lane) = (tuning.player_speed, tuning.lane_half_width);
        state.player.step(direction, player_speed, dt, lane);

        step_obstacles(state, dt);
    }

    if state.phase.is_started() {
        state.camera.follow(state.player.pos);
    }
}

fn step_obstacles(state: &mut GameState, dt: f32) {
    // Speed is fixed for the whole frame even if a level-up happens mid-walk
    let speed = state.tuning.obstacle_base_speed * state.current_level().speed_multiplier;
    let pass_z = state.tuning.obstacle_pass_z;
    let spot = RecycleSpot {
        z: state.tuning.obstacle_recycle_z,
        lane_half_width: state.tuning.lane_half_width,
    };

    // Obstacles added by a level-up join from the next frame
    let count = state.obstacles.len();
    for i in 0..count {
        if state.obstacles[i].advance(speed, dt, pass_z) {
            state.obstacles[i].recycle(spot, &mut state.rng);
            state.on_passed();
            if state.phase.is_game_over() {
                return;
            }
        }

        if player_hits_obstacle(&state.player, &state.obstacles[i], &state.tuning) {
            let position = state.obstacles[i].pos;
            state.on_collision(position);
            if state.phase.is_game_over() {
                return;
            }
            state.obstacles[i].recycle(spot, &mut state.rng);
        }
    }
}

/// The 1 Hz clock: counts whole seconds of running time
pub fn tick_second(state: &mut GameState) {
    if state.phase == GamePhase::Running {
        state.elapsed_seconds += 1;
    }
}

/// How far ahead (along -z) the autopilot reacts to obstacles
const AUTOPILOT_LOOK_AHEAD: f32 = 12.0;
/// Extra lateral clearance the autopilot keeps
const AUTOPILOT_MARGIN: f32 = 0.4;

/// Pick a lateral dodge for the nearest obstacle on a collision course
fn autopilot_direction(state: &GameState) -> Direction {
    let tuning = &state.tuning;
    let player = state.player.pos;
    let clearance =
        tuning.player_half_extents.x + tuning.obstacle_half_extents.x + AUTOPILOT_MARGIN;
    let reach = tuning.player_half_extents.z + tuning.obstacle_half_extents.z;

    let threat = state
        .obstacles
        .iter()
        .filter(|o| {
            let ahead = player.z - o.pos.z;
            ahead > -reach && ahead < AUTOPILOT_LOOK_AHEAD
        })
        .filter(|o| (o.pos.x - player.x).abs() < clearance)
        .min_by(|a, b| {
            (player.z - a.pos.z)
                .partial_cmp(&(player.z - b.pos.z))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(obstacle) = threat else {
        return Direction::None;
    };

    let wall = tuning.lane_half_width - tuning.player_half_extents.x;
    if player.x <= -wall {
        return Direction::Right;
    }
    if player.x >= wall {
        return Direction::Left;
    }

    if obstacle.pos.x > player.x {
        Direction::Left
    } else if obstacle.pos.x < player.x {
        Direction::Right
    } else if player.x > 0.0 {
        Direction::Left
    } else {
        Direction::Right
    }
}
