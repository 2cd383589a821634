//! Semi-implicit (symplectic) Euler.
//!
//! Velocity is advanced from the new acceleration first, then position from
//! the new velocity, in the same step. Yaw follows the same pattern on the
//! `y` components of the angular fields.
//!
//! `dt` must be finite and positive; [`crate::world::SimulationWorld::step`]
//! rejects anything else before reaching this module.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::state::KinematicState;

/// Advance linear motion by `dt` under `net_force`.
pub fn integrate_linear(state: &mut KinematicState, net_force: Vec3, mass: f32, dt: f32) {
    state.acceleration = net_force / mass;
    state.velocity += state.acceleration * dt;
    state.position += state.velocity * dt;
}

/// Advance yaw by `dt` with an already-clamped angular acceleration (rad/s²).
///
/// The heading is wrapped to `(-π, π]` afterwards.
pub fn integrate_yaw(state: &mut KinematicState, angular_acceleration: f32, dt: f32) {
    state.angular_acceleration = Vec3::new(0.0, angular_acceleration, 0.0);
    state.angular_velocity.y += angular_acceleration * dt;
    state.heading.y = wrap_angle(state.heading.y + state.angular_velocity.y * dt);
}

/// Map an angle (rad) to its equivalent in `(-π, π]`.
///
/// Angles already in range are returned untouched, so no rounding creeps in
/// during normal integration.
pub fn wrap_angle(angle: f32) -> f32 {
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}
