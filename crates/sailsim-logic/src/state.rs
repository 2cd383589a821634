//! Kinematic state and simulation flags.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Linear and yaw state of the hull.
///
/// Only the `y` components of the angular fields are driven; roll and pitch
/// are not modeled and stay at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct KinematicState {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Cached `net_force / mass` from the last step.
    pub acceleration: Vec3,
    pub angular_velocity: Vec3,
    pub angular_acceleration: Vec3,
    /// Yaw angle (rad) in `.y`.
    pub heading: Vec3,
}

impl KinematicState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.acceleration.is_finite()
            && self.angular_velocity.is_finite()
            && self.angular_acceleration.is_finite()
            && self.heading.is_finite()
    }

    /// Yaw angle in radians.
    pub fn yaw(&self) -> f32 {
        self.heading.y
    }

    pub fn yaw_rate(&self) -> f32 {
        self.angular_velocity.y
    }
}

/// Run gate and the sticky collision latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimulationFlags {
    /// While false, `step` does nothing.
    pub started: bool,
    /// Set by the first floor collision; the core never clears it.
    pub collided: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_at_rest() {
        let s = KinematicState::default();
        assert_eq!(s.position, Vec3::ZERO);
        assert_eq!(s.yaw(), 0.0);
        assert!(s.is_finite());
    }

    #[test]
    fn nan_anywhere_is_not_finite() {
        let mut s = KinematicState::at(Vec3::new(1.0, 2.0, 3.0));
        assert!(s.is_finite());
        s.angular_acceleration.y = f32::NAN;
        assert!(!s.is_finite());
    }
}
