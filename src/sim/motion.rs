//! Player and obstacle motion

use glam::Vec3;
use rand::Rng;

use super::state::{Direction, Obstacle, Player};

impl Player {
    /// Apply one frame of movement. Lateral motion is clamped to the lane.
    pub fn step(&mut self, direction: Direction, speed: f32, dt: f32, lane_half_width: f32) {
        let step = speed * dt;
        match direction {
            Direction::None => {}
            Direction::Up => self.pos.z -= step,
            Direction::Down => self.pos.z += step,
            Direction::Left => self.pos.x = (self.pos.x - step).max(-lane_half_width),
            Direction::Right => self.pos.x = (self.pos.x + step).min(lane_half_width),
        }
    }
}

/// Where an obstacle is sent back to once it leaves play
#[derive(Debug, Clone, Copy)]
pub struct RecycleSpot {
    pub z: f32,
    pub lane_half_width: f32,
}

impl Obstacle {
    /// Advance toward the player. Returns true once the obstacle is past `pass_z`.
    pub fn advance(&mut self, speed: f32, dt: f32, pass_z: f32) -> bool {
        self.pos.z += speed * dt;
        self.pos.z > pass_z
    }

    /// Send the obstacle back to the far end with a fresh lateral offset in [-w, w)
    pub fn recycle<R: Rng>(&mut self, spot: RecycleSpot, rng: &mut R) {
        let w = spot.lane_half_width;
        self.pos = Vec3::new(rng.random_range(-w..w), self.pos.y, spot.z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn player() -> Player {
        Player {
            pos: Vec3::new(0.0, 0.1, 0.0),
        }
    }

    #[test]
    fn test_player_directions() {
        let mut p = player();
        p.step(Direction::Up, 5.0, 0.5, 5.0);
        assert_eq!(p.pos.z, -2.5);
        p.step(Direction::Down, 5.0, 1.0, 5.0);
        assert_eq!(p.pos.z, 2.5);
        p.step(Direction::Left, 5.0, 0.2, 5.0);
        assert_eq!(p.pos.x, -1.0);
        p.step(Direction::Right, 5.0, 0.4, 5.0);
        assert_eq!(p.pos.x, 1.0);
        p.step(Direction::None, 5.0, 10.0, 5.0);
        assert_eq!(p.pos, Vec3::new(1.0, 0.1, 2.5));
    }

    #[test]
    fn test_player_clamped_to_lane() {
        let mut p = player();
        p.step(Direction::Left, 5.0, 3.0, 5.0);
        assert_eq!(p.pos.x, -5.0);
        p.step(Direction::Left, 5.0, 0.1, 5.0);
        assert_eq!(p.pos.x, -5.0);
        p.step(Direction::Right, 5.0, 10.0, 5.0);
        assert_eq!(p.pos.x, 5.0);
    }

    #[test]
    fn test_obstacle_advance_and_recycle() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut o = Obstacle {
            id: 1,
            pos: Vec3::new(2.0, 0.5, 9.0),
        };
        assert!(!o.advance(4.0, 0.25, 10.0));
        assert_eq!(o.pos.z, 10.0);
        assert!(o.advance(4.0, 0.01, 10.0));

        o.recycle(RecycleSpot { z: -50.0, lane_half_width: 5.0 }, &mut rng);
        assert_eq!(o.pos.z, -50.0);
        assert_eq!(o.pos.y, 0.5);
        assert!(o.pos.x >= -5.0 && o.pos.x < 5.0);
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::None),
            Just(Direction::Up),
            Just(Direction::Down),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn prop_player_x_stays_in_lane(
            steps in prop::collection::vec((direction(), 0.0f32..2.0), 1..200)
        ) {
            let mut p = player();
            for (dir, dt) in steps {
                p.step(dir, 5.0, dt, 5.0);
                prop_assert!(p.pos.x >= -5.0 && p.pos.x <= 5.0);
            }
        }

        #[test]
        fn prop_obstacle_z_strictly_increases(
            dts in prop::collection::vec(0.001f32..0.1, 1..100),
            multiplier in 1.0f32..1.95,
        ) {
            let mut o = Obstacle { id: 1, pos: Vec3::new(0.0, 0.5, -50.0) };
            for dt in dts {
                let before = o.pos.z;
                let passed = o.advance(4.0 * multiplier, dt, 10.0);
                prop_assert!(o.pos.z > before);
                if passed {
                    break;
                }
            }
        }
    }
}
