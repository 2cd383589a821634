//! Tunable environment: the "control panel" surface of the simulation.
//!
//! Four independent wind sources push on the hull from the four cardinal
//! horizontal directions. They are not components of one wind vector; each
//! is its own flow with its own speed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One of the four cardinal wind sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindSource {
    PosX,
    PosZ,
    NegX,
    NegZ,
}

impl WindSource {
    pub const ALL: [WindSource; 4] = [
        WindSource::PosX,
        WindSource::PosZ,
        WindSource::NegX,
        WindSource::NegZ,
    ];

    /// Signed unit vector the source pushes along.
    pub fn direction(self) -> Vec3 {
        match self {
            WindSource::PosX => Vec3::X,
            WindSource::PosZ => Vec3::Z,
            WindSource::NegX => Vec3::NEG_X,
            WindSource::NegZ => Vec3::NEG_Z,
        }
    }

    /// Component of `v` along this source's (unsigned) axis.
    pub fn axis_component(self, v: Vec3) -> f32 {
        match self {
            WindSource::PosX | WindSource::NegX => v.x,
            WindSource::PosZ | WindSource::NegZ => v.z,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WindSource::PosX => "wind_pos_x",
            WindSource::PosZ => "wind_pos_z",
            WindSource::NegX => "wind_neg_x",
            WindSource::NegZ => "wind_neg_z",
        }
    }
}

/// Externally tunable parameters. The physics routines only read these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentParameters {
    /// Wind speed of the +X source.
    pub wind_pos_x: f32,
    /// Wind speed of the +Z source.
    pub wind_pos_z: f32,
    /// Wind speed of the −X source.
    pub wind_neg_x: f32,
    /// Wind speed of the −Z source.
    pub wind_neg_z: f32,
    /// Sail trim in degrees, signed. Not range-limited by the core.
    pub sail_angle_deg: f32,
    /// Yaw moment of inertia.
    pub moment_of_inertia_y: f32,
}

impl Default for EnvironmentParameters {
    fn default() -> Self {
        Self {
            wind_pos_x: 1.0,
            wind_pos_z: 1.0,
            wind_neg_x: 1.0,
            wind_neg_z: 1.0,
            sail_angle_deg: 0.0,
            moment_of_inertia_y: 1.0,
        }
    }
}

impl EnvironmentParameters {
    /// All winds off, sail centered; inertia kept at its default.
    pub fn calm() -> Self {
        Self {
            wind_pos_x: 0.0,
            wind_pos_z: 0.0,
            wind_neg_x: 0.0,
            wind_neg_z: 0.0,
            ..Default::default()
        }
    }

    pub fn wind_speed(&self, source: WindSource) -> f32 {
        match source {
            WindSource::PosX => self.wind_pos_x,
            WindSource::PosZ => self.wind_pos_z,
            WindSource::NegX => self.wind_neg_x,
            WindSource::NegZ => self.wind_neg_z,
        }
    }

    pub fn set_wind_speed(&mut self, source: WindSource, speed: f32) {
        match source {
            WindSource::PosX => self.wind_pos_x = speed,
            WindSource::PosZ => self.wind_pos_z = speed,
            WindSource::NegX => self.wind_neg_x = speed,
            WindSource::NegZ => self.wind_neg_z = speed,
        }
    }

    /// Sail trim in radians.
    pub fn sail_angle_rad(&self) -> f32 {
        self.sail_angle_deg.to_radians()
    }

    /// Check every parameter; returns all problems found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for source in WindSource::ALL {
            let value = self.wind_speed(source);
            if !value.is_finite() {
                errors.push(ConfigError::NonFiniteParameter {
                    name: source.label(),
                    value,
                });
            }
        }
        if !self.sail_angle_deg.is_finite() {
            errors.push(ConfigError::NonFiniteParameter {
                name: "sail_angle_deg",
                value: self.sail_angle_deg,
            });
        }
        if !self.moment_of_inertia_y.is_finite() || self.moment_of_inertia_y <= 0.0 {
            errors.push(ConfigError::NonPositiveMomentOfInertia(
                self.moment_of_inertia_y,
            ));
        }

        errors
    }
}
