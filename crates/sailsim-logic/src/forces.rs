//! Force model: every force acting on the hull, as pure functions.
//!
//! The force set is closed: four wind sources, buoyancy, weight, water drag
//! and sail thrust. [`ForceKind`] names each one, [`force_breakdown`]
//! evaluates them all, and [`net_force`] sums them.
//!
//! | Force | Magnitude | Direction |
//! |-------|-----------|-----------|
//! | Wind (per source) | `½ ρ_air A (v_axis + w)² C_d` | source's signed axis |
//! | Buoyancy | `ρ_water g A_sub h_sub` | +Y |
//! | Weight | `m g` | −Y |
//! | Drag | `½ ρ_water A_drag |v|² C_d` | −v̂ |
//! | Thrust | `½ ρ_air A_sail w_eff²` | `(cos θ, 0, sin θ)` |
//!
//! where `w_eff = sqrt((w₊ₓ cos θ)² + (w₊_z sin θ)²)` and θ is the sail trim.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{DynamicsConfig, WindReferenceArea};
use crate::constants::PhysicalConstants;
use crate::environment::{EnvironmentParameters, WindSource};
use crate::state::KinematicState;

/// Identifies one named contribution to the net force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForceKind {
    Wind(WindSource),
    Buoyancy,
    Weight,
    Drag,
    Thrust,
}

impl ForceKind {
    /// Every force, in summation order.
    pub const ALL: [ForceKind; 8] = [
        ForceKind::Wind(WindSource::PosX),
        ForceKind::Wind(WindSource::PosZ),
        ForceKind::Wind(WindSource::NegX),
        ForceKind::Wind(WindSource::NegZ),
        ForceKind::Buoyancy,
        ForceKind::Weight,
        ForceKind::Drag,
        ForceKind::Thrust,
    ];

    /// Evaluate this single contribution.
    pub fn evaluate(
        self,
        state: &KinematicState,
        env: &EnvironmentParameters,
        constants: &PhysicalConstants,
        dynamics: &DynamicsConfig,
    ) -> Vec3 {
        match self {
            ForceKind::Wind(source) => wind_force(
                source,
                state.velocity,
                env,
                constants,
                dynamics.wind_reference_area,
            ),
            ForceKind::Buoyancy => buoyancy_force(constants),
            ForceKind::Weight => weight_force(constants),
            ForceKind::Drag => drag_force(state.velocity, constants),
            ForceKind::Thrust => thrust_force(env, constants),
        }
    }
}

/// Area that scales wind pressure for the chosen model variant.
pub fn wind_reference_area(constants: &PhysicalConstants, area: WindReferenceArea) -> f32 {
    match area {
        WindReferenceArea::Sail => constants.sail_area,
        WindReferenceArea::Drag => constants.drag_area,
    }
}

/// Push from one wind source.
///
/// Relative speed is the hull velocity along the source's axis plus the
/// source's configured speed. The result always points along the source's
/// signed axis, whatever the sign of the relative speed.
pub fn wind_force(
    source: WindSource,
    velocity: Vec3,
    env: &EnvironmentParameters,
    constants: &PhysicalConstants,
    area: WindReferenceArea,
) -> Vec3 {
    let relative_speed = source.axis_component(velocity) + env.wind_speed(source);
    let magnitude = 0.5
        * constants.air_density
        * wind_reference_area(constants, area)
        * relative_speed.powi(2)
        * constants.drag_coefficient;
    source.direction() * magnitude
}

/// Constant upward buoyancy from the fixed displaced volume.
///
/// Does not respond to actual depth.
pub fn buoyancy_force(constants: &PhysicalConstants) -> Vec3 {
    Vec3::new(
        0.0,
        constants.water_density * constants.gravity * constants.submerged_volume(),
        0.0,
    )
}

pub fn weight_force(constants: &PhysicalConstants) -> Vec3 {
    Vec3::new(0.0, -(constants.mass * constants.gravity), 0.0)
}

/// Water drag opposing the current velocity. Exactly zero at rest.
pub fn drag_force(velocity: Vec3, constants: &PhysicalConstants) -> Vec3 {
    let direction = velocity.normalize_or_zero();
    if direction == Vec3::ZERO {
        return Vec3::ZERO;
    }
    let magnitude = 0.5
        * constants.water_density
        * constants.drag_area
        * velocity.length_squared()
        * constants.drag_coefficient;
    -direction * magnitude
}

/// Effective wind speed seen through the sail trim.
pub fn effective_sail_wind(env: &EnvironmentParameters) -> f32 {
    let theta = env.sail_angle_rad();
    let along_x = env.wind_pos_x * theta.cos();
    let along_z = env.wind_pos_z * theta.sin();
    (along_x.powi(2) + along_z.powi(2)).sqrt()
}

/// Sail thrust. Zero whenever the sail angle is exactly zero.
pub fn thrust_force(env: &EnvironmentParameters, constants: &PhysicalConstants) -> Vec3 {
    if env.sail_angle_deg == 0.0 {
        return Vec3::ZERO;
    }
    let theta = env.sail_angle_rad();
    let wind = effective_sail_wind(env);
    let magnitude = 0.5 * constants.air_density * constants.sail_area * wind.powi(2);
    Vec3::new(theta.cos(), 0.0, theta.sin()) * magnitude
}

/// Every named contribution for one state.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ForceBreakdown {
    /// Indexed in [`WindSource::ALL`] order.
    pub wind: [Vec3; 4],
    pub buoyancy: Vec3,
    pub weight: Vec3,
    pub drag: Vec3,
    pub thrust: Vec3,
}

impl ForceBreakdown {
    pub fn get(&self, kind: ForceKind) -> Vec3 {
        match kind {
            ForceKind::Wind(source) => self.wind_from(source),
            ForceKind::Buoyancy => self.buoyancy,
            ForceKind::Weight => self.weight,
            ForceKind::Drag => self.drag,
            ForceKind::Thrust => self.thrust,
        }
    }

    pub fn wind_from(&self, source: WindSource) -> Vec3 {
        match source {
            WindSource::PosX => self.wind[0],
            WindSource::PosZ => self.wind[1],
            WindSource::NegX => self.wind[2],
            WindSource::NegZ => self.wind[3],
        }
    }

    /// Lateral wind components used for yaw torque: the x-sum of the ±X
    /// sources and the z-sum of the ±Z sources.
    pub fn lateral_wind(&self) -> (f32, f32) {
        let force_x = self.wind_from(WindSource::PosX).x + self.wind_from(WindSource::NegX).x;
        let force_z = self.wind_from(WindSource::PosZ).z + self.wind_from(WindSource::NegZ).z;
        (force_x, force_z)
    }

    /// Sum of all contributions, in [`ForceKind::ALL`] order.
    pub fn net(&self) -> Vec3 {
        ForceKind::ALL
            .iter()
            .fold(Vec3::ZERO, |sum, kind| sum + self.get(*kind))
    }
}

/// Evaluate every force for the given state.
pub fn force_breakdown(
    state: &KinematicState,
    env: &EnvironmentParameters,
    constants: &PhysicalConstants,
    dynamics: &DynamicsConfig,
) -> ForceBreakdown {
    let wind = WindSource::ALL
        .map(|source| ForceKind::Wind(source).evaluate(state, env, constants, dynamics));
    ForceBreakdown {
        wind,
        buoyancy: ForceKind::Buoyancy.evaluate(state, env, constants, dynamics),
        weight: ForceKind::Weight.evaluate(state, env, constants, dynamics),
        drag: ForceKind::Drag.evaluate(state, env, constants, dynamics),
        thrust: ForceKind::Thrust.evaluate(state, env, constants, dynamics),
    }
}

/// Net force on the hull. Pure; `state` is only read.
pub fn net_force(
    state: &KinematicState,
    env: &EnvironmentParameters,
    constants: &PhysicalConstants,
    dynamics: &DynamicsConfig,
) -> Vec3 {
    force_breakdown(state, env, constants, dynamics).net()
}
