//! Chase camera that trails the player's car

use glam::Vec3;
use serde::Serialize;

use crate::lerp_factor;

/// Where the camera sits relative to the car it follows
pub const CHASE_OFFSET: Vec3 = Vec3::new(0.0, 2.0, 6.0);
/// Fraction of the remaining distance covered each frame
pub const CHASE_SMOOTHING: f32 = 0.1;
/// Camera position before the first follow
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 3.0, 8.0);

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChaseCamera {
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
}

impl Default for ChaseCamera {
    fn default() -> Self {
        Self {
            position: CAMERA_START,
            target: Vec3::ZERO,
        }
    }
}

impl ChaseCamera {
    /// Ease toward the chase position behind `target` and look at it
    pub fn follow(&mut self, target: Vec3) {
        let desired = target + CHASE_OFFSET;
        self.position = self.position.lerp(desired, lerp_factor(CHASE_SMOOTHING));
        self.target = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_converges() {
        let mut camera = ChaseCamera::default();
        let car = Vec3::new(2.0, 0.1, -4.0);
        camera.follow(car);
        assert_eq!(camera.target, car);
        // One step covers 10% of the gap
        let expected = CAMERA_START + (car + CHASE_OFFSET - CAMERA_START) * 0.1;
        assert!(camera.position.abs_diff_eq(expected, 1e-5));

        for _ in 0..200 {
            camera.follow(car);
        }
        assert!(camera.position.abs_diff_eq(car + CHASE_OFFSET, 1e-3));
    }
}
