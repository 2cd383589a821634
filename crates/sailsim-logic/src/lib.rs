//! Pure sailing-vessel physics.
//!
//! This crate contains the whole numerical model of a sailing boat on open
//! water and nothing else. It owns no meshes, loads no assets and reads no
//! input devices: a presentation layer calls [`world::SimulationWorld::step`]
//! once per frame and copies the resulting position, heading and sail
//! geometry onto its own visual objects.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`collision`] | Embedded ellipsoidal boundary zones and point queries |
//! | [`config`] | Model-variant switches (wind area, lever radius, yaw and floor limits) |
//! | [`constants`] | Immutable physical constants of the vessel and fluids |
//! | [`constraints`] | Heading / angular-speed clamps and the floor bounce |
//! | [`environment`] | Tunable control surface: four winds, sail trim, yaw inertia |
//! | [`error`] | Error and validation types |
//! | [`forces`] | Wind, buoyancy, weight, drag and sail thrust |
//! | [`integrator`] | Semi-implicit Euler for linear and yaw motion |
//! | [`state`] | Kinematic state and simulation flags |
//! | [`torque`] | Sail lever arm and clamped yaw angular acceleration |
//! | [`world`] | Owns the state and runs the per-step pipeline |
//!
//! ```
//! use sailsim_logic::world::SimulationWorld;
//!
//! let mut world = SimulationWorld::default();
//! world.set_sail_angle_deg(30.0);
//! world.start();
//! world.step(1.0 / 60.0).unwrap();
//! assert!(world.position().is_finite());
//! ```

pub mod collision;
pub mod config;
pub mod constants;
pub mod constraints;
pub mod environment;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod state;
pub mod torque;
pub mod world;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::config::{DynamicsConfig, FloorResponse, WindReferenceArea, YawLimits};
    pub use crate::constants::PhysicalConstants;
    pub use crate::environment::{EnvironmentParameters, WindSource};
    pub use crate::error::{ConfigError, SimError};
    pub use crate::state::{KinematicState, SimulationFlags};
    pub use crate::world::{FrameSnapshot, SimPhase, SimulationWorld};
}
