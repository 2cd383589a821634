//! Yaw torque from the sail.
//!
//! The sail's centre of effort sits on a circle of radius `R` around the
//! mast, at the trim angle θ. Lateral wind acting there produces a torque
//! about the vertical axis:
//!
//! ```text
//! lever = (R cos θ, R sin θ)
//! τ_y   = lever_z · F_x − lever_x · F_z
//! ```
//!
//! `F_x` / `F_z` are the per-axis sums of the four wind sources (see
//! [`ForceBreakdown::lateral_wind`]), not the net force.

use glam::Vec3;

use crate::config::{DynamicsConfig, YawLimits};
use crate::environment::EnvironmentParameters;
use crate::error::SimError;
use crate::forces::ForceBreakdown;

/// Horizontal lever from mast to sail centre of effort: `(x, z)`.
pub fn sail_lever(env: &EnvironmentParameters, dynamics: &DynamicsConfig) -> (f32, f32) {
    let theta = env.sail_angle_rad();
    let r = dynamics.sail_lever_radius;
    (r * theta.cos(), r * theta.sin())
}

/// Sail tip relative to the hull origin. A pure function of the trim.
pub fn sail_tip_position(env: &EnvironmentParameters, dynamics: &DynamicsConfig) -> Vec3 {
    let (x, z) = sail_lever(env, dynamics);
    Vec3::new(x, dynamics.sail_mast_height, z)
}

/// Yaw torque from the lateral wind forces acting at the sail lever.
pub fn yaw_torque(
    forces: &ForceBreakdown,
    env: &EnvironmentParameters,
    dynamics: &DynamicsConfig,
) -> f32 {
    let (lever_x, lever_z) = sail_lever(env, dynamics);
    let (force_x, force_z) = forces.lateral_wind();
    lever_z * force_x - lever_x * force_z
}

/// `torque / I`, then deadbanded and clamped.
///
/// Magnitudes under the deadband become zero; magnitudes over the ceiling
/// are clamped with sign preserved. A zero, negative or non-finite moment of
/// inertia is rejected instead of dividing. A non-finite quotient from a
/// valid inertia (an overflowed torque) is returned unclamped so the caller
/// can reject the whole step.
pub fn yaw_angular_acceleration(
    torque: f32,
    moment_of_inertia: f32,
    limits: &YawLimits,
) -> Result<f32, SimError> {
    if !moment_of_inertia.is_finite() || moment_of_inertia <= 0.0 {
        return Err(SimError::InvalidMomentOfInertia {
            value: moment_of_inertia,
        });
    }

    let raw = torque / moment_of_inertia;
    if !raw.is_finite() {
        return Ok(raw);
    }

    if raw.abs() < limits.angular_acceleration_deadband {
        Ok(0.0)
    } else {
        let ceiling = limits.max_angular_acceleration;
        Ok(raw.clamp(-ceiling, ceiling))
    }
}
