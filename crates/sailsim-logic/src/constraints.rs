//! Post-integration constraints.
//!
//! Two independent branches, each switched on by [`DynamicsConfig`]:
//!
//! - **Yaw**: pin the heading at `±max_heading` (stopping rotation), then cap
//!   the yaw rate. The cap is checked every step on its own.
//! - **Floor**: when the hull reaches the floor datum, bounce it inelastically
//!   back to a fixed rest height and latch `collided`.
//!
//! None of this is an error path; it is deterministic corrective policy.

use glam::Vec3;

use crate::config::{DynamicsConfig, FloorResponse, YawLimits};
use crate::state::{KinematicState, SimulationFlags};

/// What fired during one [`enforce`] call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConstraintReport {
    pub heading_pinned: bool,
    pub yaw_rate_clamped: bool,
    /// Vertical velocity just before the bounce, if one happened.
    pub floor_bounce: Option<f32>,
}

impl ConstraintReport {
    pub fn any(&self) -> bool {
        self.heading_pinned || self.yaw_rate_clamped || self.floor_bounce.is_some()
    }
}

/// Apply every enabled constraint in order: heading, yaw rate, floor.
pub fn enforce(
    state: &mut KinematicState,
    flags: &mut SimulationFlags,
    dynamics: &DynamicsConfig,
) -> ConstraintReport {
    let mut report = ConstraintReport::default();

    if let Some(limits) = &dynamics.yaw {
        report.heading_pinned = clamp_heading(state, limits);
        report.yaw_rate_clamped = clamp_yaw_rate(state, limits);
    }

    if let Some(floor) = &dynamics.floor {
        report.floor_bounce = resolve_floor(state, flags, floor);
    }

    report
}

/// Returns true if the heading hit its bound.
pub fn clamp_heading(state: &mut KinematicState, limits: &YawLimits) -> bool {
    let heading = state.heading.y;
    if heading.abs() < limits.max_heading {
        return false;
    }
    state.angular_velocity = Vec3::ZERO;
    state.angular_acceleration = Vec3::ZERO;
    state.heading.y = limits.max_heading * heading.signum();
    true
}

/// Returns true if the yaw rate was capped.
pub fn clamp_yaw_rate(state: &mut KinematicState, limits: &YawLimits) -> bool {
    let rate = state.angular_velocity.y;
    if rate.abs() <= limits.max_angular_velocity {
        return false;
    }
    state.angular_velocity.y = limits.max_angular_velocity * rate.signum();
    true
}

/// Bounce off the floor datum. Returns the pre-bounce vertical velocity.
///
/// Sets `flags.collided` and never clears it.
pub fn resolve_floor(
    state: &mut KinematicState,
    flags: &mut SimulationFlags,
    floor: &FloorResponse,
) -> Option<f32> {
    if state.position.y > floor.floor_height {
        return None;
    }
    let incoming = state.velocity.y;
    state.velocity.y = incoming * -floor.restitution;
    state.position.y = floor.rest_height;
    state.acceleration.y = 0.0;
    flags.collided = true;
    Some(incoming)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn heading_pinned_to_signed_max() {
        let limits = YawLimits::default();
        let mut s = KinematicState::default();
        s.heading.y = -1.0;
        s.angular_velocity.y = -0.4;
        s.angular_acceleration.y = -0.05;
        assert!(clamp_heading(&mut s, &limits));
        assert_eq!(s.heading.y, -FRAC_PI_4);
        assert_eq!(s.angular_velocity, Vec3::ZERO);
        assert_eq!(s.angular_acceleration, Vec3::ZERO);
    }

    #[test]
    fn heading_within_bound_untouched() {
        let limits = YawLimits::default();
        let mut s = KinematicState::default();
        s.heading.y = 0.5;
        s.angular_velocity.y = 0.2;
        assert!(!clamp_heading(&mut s, &limits));
        assert_eq!(s.heading.y, 0.5);
        assert_eq!(s.angular_velocity.y, 0.2);
    }

    #[test]
    fn yaw_rate_capped_with_sign() {
        let limits = YawLimits::default();
        let mut s = KinematicState::default();
        s.angular_velocity.y = -3.0;
        assert!(clamp_yaw_rate(&mut s, &limits));
        assert_eq!(s.angular_velocity.y, -1.0);
        s.angular_velocity.y = 0.99;
        assert!(!clamp_yaw_rate(&mut s, &limits));
    }

    #[test]
    fn floor_bounce_resets_height_and_latches() {
        let mut s = KinematicState::default();
        let mut flags = SimulationFlags::default();
        s.position.y = -0.3;
        s.velocity.y = -8.0;
        s.acceleration.y = -2.0;
        let incoming = resolve_floor(&mut s, &mut flags, &FloorResponse::default());
        assert_eq!(incoming, Some(-8.0));
        assert_eq!(s.position.y, 10.0);
        assert_eq!(s.velocity.y, 4.0);
        assert_eq!(s.acceleration.y, 0.0);
        assert!(flags.collided);
    }

    #[test]
    fn floor_touch_at_exact_datum_counts() {
        let mut s = KinematicState::default();
        let mut flags = SimulationFlags::default();
        assert!(resolve_floor(&mut s, &mut flags, &FloorResponse::default()).is_some());
    }

    #[test]
    fn above_floor_leaves_latch_alone() {
        let mut s = KinematicState::at(Vec3::new(0.0, 5.0, 0.0));
        let mut flags = SimulationFlags {
            started: true,
            collided: true,
        };
        assert!(resolve_floor(&mut s, &mut flags, &FloorResponse::default()).is_none());
        assert!(flags.collided);
    }

    #[test]
    fn disabled_branches_do_nothing() {
        let mut s = KinematicState::default();
        s.heading.y = 2.0;
        s.angular_velocity.y = 5.0;
        s.position.y = -1.0;
        let mut flags = SimulationFlags::default();
        let report = enforce(&mut s, &mut flags, &DynamicsConfig::linear_only());
        assert!(!report.any());
        assert_eq!(s.heading.y, 2.0);
        assert_eq!(s.position.y, -1.0);
        assert!(!flags.collided);
    }

    #[test]
    fn heading_pin_then_rate_check_both_run() {
        let mut s = KinematicState::default();
        s.heading.y = 0.1;
        s.angular_velocity.y = 2.0;
        let mut flags = SimulationFlags::default();
        let report = enforce(&mut s, &mut flags, &DynamicsConfig::default());
        assert!(!report.heading_pinned);
        assert!(report.yaw_rate_clamped);
        assert_eq!(s.angular_velocity.y, 1.0);
    }
}
