//! Axis-aligned bounding box collision
//!
//! Entities are boxes: the car uses its scaled model bounds, obstacles are unit
//! cubes. Boxes touching on a face count as overlapping.

use glam::Vec3;

use super::state::{Obstacle, Player};
use crate::tuning::Tuning;

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centred at `center` with the given half extents
    pub fn from_center_half_extents(center: Vec3, half: Vec3) -> Self {
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Non-empty intersection on all three axes
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}

impl Player {
    pub fn bounds(&self, tuning: &Tuning) -> Aabb {
        Aabb::from_center_half_extents(self.pos, tuning.player_half_extents)
    }
}

impl Obstacle {
    pub fn bounds(&self, tuning: &Tuning) -> Aabb {
        Aabb::from_center_half_extents(self.pos, tuning.obstacle_half_extents)
    }
}

/// True if the obstacle's box overlaps the player's box
pub fn player_hits_obstacle(player: &Player, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    player.bounds(tuning).intersects(&obstacle.bounds(tuning))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::splat(0.5), Vec3::splat(1.5));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert_eq!(b.center(), Vec3::ONE);
    }

    #[test]
    fn test_aabb_touching_counts() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 1.0, 1.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_aabb_separated_on_one_axis() {
        let a = Aabb::new(Vec3::ZERO, Vec3::ONE);
        // Overlaps on x and y, separated on z
        let b = Aabb::new(Vec3::new(0.5, 0.5, 1.1), Vec3::new(1.5, 1.5, 2.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_player_vs_obstacle() {
        let tuning = Tuning::default();
        let player = Player {
            pos: tuning.player_spawn,
        };
        let mut obstacle = Obstacle {
            id: 1,
            pos: Vec3::new(0.0, 0.5, -30.0),
        };
        assert!(!player_hits_obstacle(&player, &obstacle, &tuning));

        obstacle.pos.z = -1.0;
        assert!(player_hits_obstacle(&player, &obstacle, &tuning));

        // Same depth, one lane over
        obstacle.pos.x = 3.0;
        assert!(!player_hits_obstacle(&player, &obstacle, &tuning));
    }
}
