//! Session rules: collision and pass handling, lives and level progression
//!
//! Every counter mutation is followed synchronously by the rule that watches
//! that counter, so defeat and victory are decided before the next event.

use glam::Vec3;

use super::state::{Explosion, GameEvent, GamePhase, GameState, MessageKind, Outcome};

impl GameState {
    /// An obstacle hit the player at `position`
    pub fn on_collision(&mut self, position: Vec3) {
        if matches!(self.phase, GamePhase::GameOver | GamePhase::Paused) {
            return;
        }

        let id = self.next_entity_id();
        self.explosions.push(Explosion {
            id,
            pos: position,
            expires_at: self.clock + f64::from(self.tuning.explosion_lifetime),
        });
        self.lives = self.lives.saturating_sub(1);
        self.respawn_player();
        self.show_message(
            MessageKind::Collision,
            Some(self.tuning.collision_message_secs),
        );
        self.events.push(GameEvent::Collision { position });
        log::debug!("Collision at {position:?}, {} lives left", self.lives);

        self.check_lives();
    }

    /// An obstacle made it past the player without hitting it
    pub fn on_passed(&mut self) {
        if matches!(self.phase, GamePhase::GameOver | GamePhase::Paused) {
            return;
        }

        self.obstacles_passed += 1;
        self.events.push(GameEvent::ObstaclePassed);
        log::debug!("Obstacle passed ({} total)", self.obstacles_passed);

        self.check_progress();
    }

    /// Lives exhausted -> defeat
    fn check_lives(&mut self) {
        if self.lives == 0 && self.phase != GamePhase::GameOver {
            self.finish(Outcome::Defeat);
        }
    }

    /// Advance at most one level per change of the passed counter;
    /// clearing the final level's threshold wins the game.
    fn check_progress(&mut self) {
        let level = self.current_level();
        if self.obstacles_passed < level.pass_threshold {
            return;
        }

        if level.is_final() {
            self.finish(Outcome::Victory);
            return;
        }

        self.level_index += 1;
        let reached = self.current_level().number();
        self.show_message(
            MessageKind::LevelUp(reached),
            Some(self.tuning.level_up_message_secs),
        );
        self.fill_obstacle_rows();
        self.events.push(GameEvent::LevelUp { level: reached });
        log::info!(
            "Level {} reached: {} rows at x{:.2} speed",
            reached,
            self.current_level().rows,
            self.current_level().speed_multiplier
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::levels::LEVEL_COUNT;

    fn running() -> GameState {
        let mut state = GameState::new(42);
        state.start();
        state.drain_events();
        state
    }

    #[test]
    fn test_collision_costs_one_life() {
        let mut state = running();
        state.obstacles_passed = 3;
        state.player.pos = Vec3::new(4.0, 0.1, -2.0);

        state.on_collision(Vec3::new(4.0, 0.5, -2.5));

        assert_eq!(state.lives, 4);
        assert_eq!(state.obstacles_passed, 3);
        assert_eq!(state.player.pos, Vec3::new(0.0, 0.1, 0.0));
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].expires_at, 1.0);
        assert_eq!(state.message.as_ref().map(|m| m.kind), Some(MessageKind::Collision));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Collision {
                position: Vec3::new(4.0, 0.5, -2.5)
            }]
        );
    }

    #[test]
    fn test_collision_ignored_when_paused_or_over() {
        let mut state = running();
        state.toggle_pause();
        state.on_collision(Vec3::ZERO);
        assert_eq!(state.lives, 5);
        assert!(state.explosions.is_empty());

        state.toggle_pause();
        state.finish(Outcome::Victory);
        state.on_collision(Vec3::ZERO);
        assert_eq!(state.lives, 5);
    }

    #[test]
    fn test_pass_ignored_when_paused_or_over() {
        let mut state = running();
        state.toggle_pause();
        state.on_passed();
        assert_eq!(state.obstacles_passed, 0);

        state.toggle_pause();
        state.on_passed();
        assert_eq!(state.obstacles_passed, 1);
        assert_eq!(state.lives, 5);
    }

    #[test]
    fn test_last_life_is_defeat() {
        let mut state = running();
        state.obstacles_passed = 4;
        for _ in 0..5 {
            state.on_collision(Vec3::ZERO);
        }
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.outcome, Some(Outcome::Defeat));
        assert_eq!(state.message_text().as_deref(), Some("💀 GAME OVER"));
        // Torn down on game over
        assert!(state.explosions.is_empty());
        assert!(state.obstacles.is_empty());

        // Terminal: nothing changes lives any more
        state.on_collision(Vec3::ZERO);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_level_up_at_threshold_once() {
        let mut state = running();
        for _ in 0..4 {
            state.on_passed();
        }
        assert_eq!(state.level_index, 0);

        state.on_passed();
        assert_eq!(state.level_index, 1);
        assert_eq!(state.obstacles.len(), 6);
        assert_eq!(state.message_text().as_deref(), Some("✅ Level 2"));
        assert_eq!(state.message.as_ref().and_then(|m| m.expires_at), Some(1.5));

        // Next threshold is 10: passes 6..9 do not advance again
        for _ in 0..4 {
            state.on_passed();
        }
        assert_eq!(state.level_index, 1);
        assert!(state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::LevelUp { .. }))
            .eq([&GameEvent::LevelUp { level: 2 }]));
    }

    #[test]
    fn test_one_level_per_change() {
        // Counter already far beyond several thresholds: a single pass
        // only moves one level.
        let mut state = running();
        state.obstacles_passed = 29;
        state.on_passed();
        assert_eq!(state.level_index, 1);
        state.on_passed();
        assert_eq!(state.level_index, 2);
    }

    #[test]
    fn test_final_threshold_is_victory() {
        let mut state = running();
        state.level_index = LEVEL_COUNT - 1;
        state.obstacles_passed = 99;
        state.on_passed();
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.outcome, Some(Outcome::Victory));
        assert_eq!(state.message_text().as_deref(), Some("🎉 WINNER"));
        assert_eq!(state.lives, 5);
    }
}
