//! Simulation world: owns all mutable state and runs the step pipeline.
//!
//! ```text
//! step(dt):
//!   forces   → net force            (forces)
//!   linear   → velocity, position   (integrator)
//!   torque   → yaw acceleration     (torque, if yaw enabled)
//!   yaw      → yaw rate, heading    (integrator, if yaw enabled)
//!   clamp    → heading, rate, floor (constraints)
//! ```
//!
//! # Lifecycle
//!
//! `Idle` (not started, `step` does nothing) → `Running` → `Collided`
//! (sticky: the floor bounce fired at least once; stepping continues but the
//! caller should treat the scenario as over). The core never goes back to
//! `Idle` on its own; [`SimulationWorld::reset`] is the caller's way back.

use glam::{Quat, Vec3};
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};

use crate::config::DynamicsConfig;
use crate::constants::PhysicalConstants;
use crate::constraints::{enforce, ConstraintReport};
use crate::environment::{EnvironmentParameters, WindSource};
use crate::error::SimError;
use crate::forces::{force_breakdown, ForceBreakdown};
use crate::integrator::{integrate_linear, integrate_yaw};
use crate::state::{KinematicState, SimulationFlags};
use crate::torque::{sail_tip_position, yaw_angular_acceleration, yaw_torque};

/// Coarse lifecycle state derived from the flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimPhase {
    Idle,
    Running,
    Collided,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub step: u64,
    /// Simulated seconds since start or last reset.
    pub elapsed: f64,
    pub position: Vec3,
    /// Yaw in radians.
    pub heading: f32,
    /// Sail tip relative to the hull origin.
    pub sail_tip: Vec3,
    pub collided: bool,
}

/// Owns one vessel's state, configuration and flags.
#[derive(Debug, Clone)]
pub struct SimulationWorld {
    constants: PhysicalConstants,
    dynamics: DynamicsConfig,
    env: EnvironmentParameters,
    state: KinematicState,
    initial_state: KinematicState,
    flags: SimulationFlags,
    elapsed: f64,
    steps: u64,
}

impl Default for SimulationWorld {
    fn default() -> Self {
        Self::from_parts(
            PhysicalConstants::default(),
            DynamicsConfig::default(),
            EnvironmentParameters::default(),
        )
    }
}

impl SimulationWorld {
    /// Create a world, validating every configuration struct.
    pub fn new(
        constants: PhysicalConstants,
        dynamics: DynamicsConfig,
        env: EnvironmentParameters,
    ) -> Result<Self, SimError> {
        let mut errors = constants.validate();
        errors.extend(dynamics.validate());
        if !errors.is_empty() {
            return Err(SimError::InvalidConstants(errors));
        }
        let env_errors = env.validate();
        if !env_errors.is_empty() {
            return Err(SimError::InvalidEnvironment(env_errors));
        }
        Ok(Self::from_parts(constants, dynamics, env))
    }

    fn from_parts(
        constants: PhysicalConstants,
        dynamics: DynamicsConfig,
        env: EnvironmentParameters,
    ) -> Self {
        Self {
            constants,
            dynamics,
            env,
            state: KinematicState::default(),
            initial_state: KinematicState::default(),
            flags: SimulationFlags::default(),
            elapsed: 0.0,
            steps: 0,
        }
    }

    /// Start from `position` instead of the origin. Also used by [`Self::reset`].
    pub fn with_initial_position(self, position: Vec3) -> Self {
        self.with_initial_state(KinematicState::at(position))
    }

    /// Start from an arbitrary state. Also used by [`Self::reset`].
    pub fn with_initial_state(mut self, state: KinematicState) -> Self {
        self.state = state;
        self.initial_state = state;
        self
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Does nothing while the world is idle. An invalid `dt`, an invalid
    /// moment of inertia or a non-finite result leaves the state untouched.
    pub fn step(&mut self, dt: f32) -> Result<(), SimError> {
        if !dt.is_finite() || dt <= 0.0 {
            warn!("rejected step with dt={dt}");
            return Err(SimError::InvalidTimeStep { dt });
        }
        if !self.flags.started {
            return Ok(());
        }

        let mut next = self.state;
        let mut flags = self.flags;

        let forces = force_breakdown(&next, &self.env, &self.constants, &self.dynamics);
        integrate_linear(&mut next, forces.net(), self.constants.mass, dt);

        if let Some(limits) = &self.dynamics.yaw {
            // torque sees the post-integration velocity
            let lateral = force_breakdown(&next, &self.env, &self.constants, &self.dynamics);
            let torque = yaw_torque(&lateral, &self.env, &self.dynamics);
            let alpha = yaw_angular_acceleration(torque, self.env.moment_of_inertia_y, limits)?;
            trace!(
                "step {}: torque_y={torque} angular_acceleration_y={alpha} moment_of_inertia_y={}",
                self.steps + 1,
                self.env.moment_of_inertia_y
            );
            if !alpha.is_finite() {
                warn!("step {}: yaw torque overflowed; rolled back", self.steps + 1);
                return Err(SimError::NonFiniteState {
                    step: self.steps + 1,
                });
            }
            integrate_yaw(&mut next, alpha, dt);
        }

        let report = enforce(&mut next, &mut flags, &self.dynamics);

        if !next.is_finite() {
            warn!("step {} produced a non-finite state; rolled back", self.steps + 1);
            return Err(SimError::NonFiniteState {
                step: self.steps + 1,
            });
        }

        self.log_constraints(&report, &next, flags);
        self.state = next;
        self.flags = flags;
        self.elapsed += f64::from(dt);
        self.steps += 1;
        Ok(())
    }

    fn log_constraints(
        &self,
        report: &ConstraintReport,
        next: &KinematicState,
        flags: SimulationFlags,
    ) {
        if !report.any() {
            return;
        }
        let step = self.steps + 1;
        if report.heading_pinned {
            debug!("step {step}: heading pinned at {}", next.heading.y);
        }
        if report.yaw_rate_clamped {
            debug!("step {step}: yaw rate capped at {}", next.angular_velocity.y);
        }
        if let Some(incoming) = report.floor_bounce {
            debug!("step {step}: floor bounce, vy {incoming} -> {}", next.velocity.y);
            if flags.collided && !self.flags.collided {
                info!("vessel collided with the floor at step {step}");
            }
        }
    }

    // ── Read accessors ────────────────────────────────────────────────

    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    /// Yaw angle in radians.
    pub fn heading(&self) -> f32 {
        self.state.heading.y
    }

    pub fn heading_degrees(&self) -> f32 {
        self.state.heading.y.to_degrees()
    }

    /// Sail tip relative to the hull origin; depends only on the trim.
    pub fn sail_tip_position(&self) -> Vec3 {
        sail_tip_position(&self.env, &self.dynamics)
    }

    /// Sail tip in world space: the hull-relative tip turned by the heading.
    pub fn sail_tip_world_position(&self) -> Vec3 {
        self.state.position + Quat::from_rotation_y(self.heading()) * self.sail_tip_position()
    }

    pub fn collided(&self) -> bool {
        self.flags.collided
    }

    pub fn started(&self) -> bool {
        self.flags.started
    }

    pub fn flags(&self) -> SimulationFlags {
        self.flags
    }

    pub fn phase(&self) -> SimPhase {
        match (self.flags.started, self.flags.collided) {
            (false, _) => SimPhase::Idle,
            (true, false) => SimPhase::Running,
            (true, true) => SimPhase::Collided,
        }
    }

    pub fn state(&self) -> &KinematicState {
        &self.state
    }

    pub fn environment(&self) -> &EnvironmentParameters {
        &self.env
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    pub fn dynamics(&self) -> &DynamicsConfig {
        &self.dynamics
    }

    /// Simulated seconds since start or the last reset.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of steps that actually ran.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Named forces acting on the current state.
    pub fn forces(&self) -> ForceBreakdown {
        force_breakdown(&self.state, &self.env, &self.constants, &self.dynamics)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            step: self.steps,
            elapsed: self.elapsed,
            position: self.position(),
            heading: self.heading(),
            sail_tip: self.sail_tip_position(),
            collided: self.collided(),
        }
    }

    // ── Control surface ───────────────────────────────────────────────

    pub fn set_wind_speed(&mut self, source: WindSource, speed: f32) {
        self.env.set_wind_speed(source, speed);
    }

    /// Sail trim in degrees. Unbounded; UIs may choose to limit it.
    pub fn set_sail_angle_deg(&mut self, degrees: f32) {
        self.env.sail_angle_deg = degrees;
    }

    pub fn set_moment_of_inertia(&mut self, value: f32) -> Result<(), SimError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(SimError::InvalidMomentOfInertia { value });
        }
        self.env.moment_of_inertia_y = value;
        Ok(())
    }

    /// Replace every tunable at once.
    pub fn set_environment(&mut self, env: EnvironmentParameters) -> Result<(), SimError> {
        let errors = env.validate();
        if !errors.is_empty() {
            return Err(SimError::InvalidEnvironment(errors));
        }
        self.env = env;
        Ok(())
    }

    pub fn start(&mut self) {
        self.set_started(true);
    }

    pub fn set_started(&mut self, started: bool) {
        if started != self.flags.started {
            info!("simulation {}", if started { "started" } else { "paused" });
        }
        self.flags.started = started;
    }

    /// Return to the initial state: idle, not collided, clock at zero.
    /// Environment and constants are kept.
    pub fn reset(&mut self) {
        self.reset_to(self.initial_state);
    }

    /// Like [`Self::reset`], but from an explicit state.
    pub fn reset_to(&mut self, state: KinematicState) {
        info!("simulation reset");
        self.state = state;
        self.flags = SimulationFlags::default();
        self.elapsed = 0.0;
        self.steps = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::YawLimits;
    use crate::error::ConfigError;

    #[test]
    fn world_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SimulationWorld>();
    }

    #[test]
    fn new_world_is_idle_at_origin() {
        let world = SimulationWorld::default();
        assert_eq!(world.phase(), SimPhase::Idle);
        assert_eq!(world.position(), Vec3::ZERO);
        assert_eq!(world.steps(), 0);
    }

    #[test]
    fn idle_step_is_noop() {
        let mut world = SimulationWorld::default().with_initial_position(Vec3::new(1.0, 50.0, 2.0));
        world.set_sail_angle_deg(40.0);
        let before = *world.state();
        world.step(0.5).unwrap();
        assert_eq!(*world.state(), before);
        assert_eq!(world.steps(), 0);
        assert_eq!(world.elapsed(), 0.0);
    }

    #[test]
    fn invalid_dt_rejected_without_mutation() {
        let mut world = SimulationWorld::default().with_initial_position(Vec3::new(0.0, 50.0, 0.0));
        world.set_sail_angle_deg(30.0);
        world.start();
        let before = *world.state();
        for dt in [0.0, -0.1, f32::NAN, f32::INFINITY] {
            assert!(matches!(world.step(dt), Err(SimError::InvalidTimeStep { .. })));
        }
        assert_eq!(*world.state(), before);
    }

    #[test]
    fn constructor_rejects_bad_constants() {
        let constants = PhysicalConstants {
            mass: -1.0,
            ..Default::default()
        };
        let err = SimulationWorld::new(
            constants,
            DynamicsConfig::default(),
            EnvironmentParameters::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SimError::InvalidConstants(vec![ConfigError::NonPositiveMass(-1.0)])
        );
    }

    #[test]
    fn constructor_rejects_zero_inertia() {
        let env = EnvironmentParameters {
            moment_of_inertia_y: 0.0,
            ..Default::default()
        };
        let err = SimulationWorld::new(PhysicalConstants::default(), DynamicsConfig::default(), env)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidEnvironment(_)));
    }

    #[test]
    fn setters_validate_inertia() {
        let mut world = SimulationWorld::default();
        assert_eq!(
            world.set_moment_of_inertia(0.0),
            Err(SimError::InvalidMomentOfInertia { value: 0.0 })
        );
        assert_eq!(world.environment().moment_of_inertia_y, 1.0);
        world.set_moment_of_inertia(25.0).unwrap();
        assert_eq!(world.environment().moment_of_inertia_y, 25.0);
    }

    #[test]
    fn control_surface_writes_environment() {
        let mut world = SimulationWorld::default();
        world.set_wind_speed(WindSource::PosZ, 12.0);
        world.set_sail_angle_deg(-270.0);
        assert_eq!(world.environment().wind_pos_z, 12.0);
        assert_eq!(world.environment().sail_angle_deg, -270.0);
    }

    #[test]
    fn sail_tip_world_turns_with_heading() {
        let state = KinematicState {
            heading: Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            ..KinematicState::at(Vec3::new(5.0, 20.0, -5.0))
        };
        let world = SimulationWorld::default().with_initial_state(state);
        // hull-relative tip is unchanged; only the world tip turns
        assert_eq!(world.sail_tip_position(), Vec3::new(50.0, 100.0, 0.0));
        let tip = world.sail_tip_world_position();
        assert!((tip - Vec3::new(5.0, 120.0, -55.0)).length() < 1e-3, "{tip:?}");
    }

    #[test]
    fn overflowing_wind_is_not_blamed_on_inertia() {
        let env = EnvironmentParameters {
            wind_pos_z: 1e19,
            ..EnvironmentParameters::calm()
        };
        assert!(env.validate().is_empty());
        let mut world = SimulationWorld::new(
            PhysicalConstants::default(),
            DynamicsConfig::default(),
            env,
        )
        .unwrap()
        .with_initial_position(Vec3::new(0.0, 10.0, 0.0));
        world.start();
        let before = *world.state();
        assert_eq!(world.step(0.016), Err(SimError::NonFiniteState { step: 1 }));
        assert_eq!(*world.state(), before);
        assert_eq!(world.steps(), 0);
    }

    #[test]
    fn sail_tip_world_follows_hull() {
        let world = SimulationWorld::default().with_initial_position(Vec3::new(5.0, 20.0, -5.0));
        assert_eq!(world.sail_tip_position(), Vec3::new(50.0, 100.0, 0.0));
        assert_eq!(world.sail_tip_world_position(), Vec3::new(55.0, 120.0, -5.0));
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let start = Vec3::new(0.0, 40.0, 0.0);
        let mut world = SimulationWorld::default().with_initial_position(start);
        world.set_wind_speed(WindSource::PosX, 30.0);
        world.start();
        for _ in 0..10 {
            world.step(0.1).unwrap();
        }
        assert_ne!(world.position(), start);
        world.reset();
        assert_eq!(world.position(), start);
        assert_eq!(world.phase(), SimPhase::Idle);
        assert_eq!(world.steps(), 0);
        assert_eq!(world.environment().wind_pos_x, 30.0);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut world = SimulationWorld::default().with_initial_position(Vec3::new(0.0, 30.0, 0.0));
        world.start();
        world.step(0.25).unwrap();
        let snap = world.snapshot();
        assert_eq!(snap.step, 1);
        assert_eq!(snap.elapsed, 0.25);
        assert_eq!(snap.position, world.position());
        assert_eq!(snap.heading, world.heading());
        assert!(!snap.collided);
    }

    #[test]
    fn step_rejects_inertia_set_through_fields() {
        let mut world = SimulationWorld::default().with_initial_position(Vec3::new(0.0, 30.0, 0.0));
        // bypass setter validation the way a deserialized env could
        world.env.moment_of_inertia_y = 0.0;
        world.start();
        let before = *world.state();
        assert!(matches!(
            world.step(0.1),
            Err(SimError::InvalidMomentOfInertia { .. })
        ));
        assert_eq!(*world.state(), before);
    }

    #[test]
    fn no_yaw_means_heading_never_moves() {
        let dynamics = DynamicsConfig {
            yaw: None,
            ..Default::default()
        };
        let env = EnvironmentParameters {
            wind_pos_z: 50.0,
            ..Default::default()
        };
        let mut world = SimulationWorld::new(PhysicalConstants::default(), dynamics, env)
            .unwrap()
            .with_initial_position(Vec3::new(0.0, 100.0, 0.0));
        world.start();
        for _ in 0..20 {
            world.step(0.05).unwrap();
        }
        assert_eq!(world.heading(), 0.0);
        assert_eq!(world.state().angular_velocity, Vec3::ZERO);
    }

    #[test]
    fn yaw_limits_can_be_given_in_degrees() {
        let dynamics = DynamicsConfig {
            yaw: Some(YawLimits::default().with_max_heading_degrees(10.0)),
            ..Default::default()
        };
        let world = SimulationWorld::new(
            PhysicalConstants::default(),
            dynamics,
            EnvironmentParameters::default(),
        )
        .unwrap();
        let max = world.dynamics().yaw.map(|y| y.max_heading).unwrap();
        assert!((max - 10f32.to_radians()).abs() < 1e-7);
    }
}
