//! Direction pad input
//!
//! The on-screen pad asserts a direction while a control is held; releasing
//! (or the pointer leaving the control) clears it. Keyboard arrows and WASD
//! feed the same pad, alongside the session shortcuts in [`KeyCommand`].

use crate::sim::Direction;

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionPad {
    held: Direction,
}

impl DirectionPad {
    pub fn new() -> Self {
        Self::default()
    }

    /// A control was pressed; it replaces whatever was held before
    pub fn press(&mut self, direction: Direction) {
        self.held = direction;
    }

    /// Any release clears the held direction
    pub fn release(&mut self) {
        self.held = Direction::None;
    }

    pub fn direction(&self) -> Direction {
        self.held
    }
}

impl Direction {
    /// Map a `KeyboardEvent.key` value to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" | "w" | "W" => Some(Direction::Up),
            "ArrowDown" | "s" | "S" => Some(Direction::Down),
            "ArrowLeft" | "a" | "A" => Some(Direction::Left),
            "ArrowRight" | "d" | "D" => Some(Direction::Right),
            _ => None,
        }
    }

    /// DOM id suffix of the matching on-screen control
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::None => "none",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// What a keyboard shortcut does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Steer(Direction),
    /// Start a fresh session, or reset one that has ended
    StartOrReset,
    TogglePause,
    ToggleAutopilot,
    ToggleMute,
}

impl KeyCommand {
    /// Map a `KeyboardEvent.key` value to a command. Every mapped key is
    /// consumed, so a focused button never receives it as a click.
    pub fn from_key(key: &str) -> Option<Self> {
        if let Some(direction) = Direction::from_key(key) {
            return Some(KeyCommand::Steer(direction));
        }
        match key {
            "Enter" => Some(KeyCommand::StartOrReset),
            " " | "p" | "P" | "Escape" => Some(KeyCommand::TogglePause),
            "i" | "I" => Some(KeyCommand::ToggleAutopilot),
            "m" | "M" => Some(KeyCommand::ToggleMute),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut pad = DirectionPad::new();
        assert_eq!(pad.direction(), Direction::None);
        pad.press(Direction::Left);
        assert_eq!(pad.direction(), Direction::Left);
        // Last press wins, no diagonals
        pad.press(Direction::Up);
        assert_eq!(pad.direction(), Direction::Up);
        pad.release();
        assert_eq!(pad.direction(), Direction::None);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("D"), Some(Direction::Right));
        assert_eq!(Direction::from_key("w"), Some(Direction::Up));
        assert_eq!(Direction::from_key("Enter"), None);
        assert_eq!(Direction::Down.as_str(), "down");
    }

    #[test]
    fn test_key_commands() {
        assert_eq!(KeyCommand::from_key(" "), Some(KeyCommand::TogglePause));
        assert_eq!(KeyCommand::from_key("Escape"), Some(KeyCommand::TogglePause));
        assert_eq!(KeyCommand::from_key("Enter"), Some(KeyCommand::StartOrReset));
        assert_eq!(
            KeyCommand::from_key("ArrowDown"),
            Some(KeyCommand::Steer(Direction::Down))
        );
        assert_eq!(KeyCommand::from_key("M"), Some(KeyCommand::ToggleMute));
        assert_eq!(KeyCommand::from_key("i"), Some(KeyCommand::ToggleAutopilot));
        // Unmapped keys keep their browser behaviour
        assert_eq!(KeyCommand::from_key("Tab"), None);
        assert_eq!(KeyCommand::from_key("x"), None);
    }
}
