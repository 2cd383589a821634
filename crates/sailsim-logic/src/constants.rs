//! Physical constants of the vessel and the two fluids it sits between.
//!
//! These never change for the lifetime of a world. The defaults are tuned
//! for the demo basin; units are SI except where the scene scale leaks
//! through (areas are in "scene units").

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Immutable physical constants, set at world construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Gravitational acceleration (m/s²).
    pub gravity: f32,
    /// Shared drag coefficient for water drag and wind pressure.
    pub drag_coefficient: f32,
    /// Vessel mass (kg).
    pub mass: f32,
    /// Water density (kg/m³).
    pub water_density: f32,
    /// Air density (kg/m³).
    pub air_density: f32,
    /// Height of the hull below the waterline.
    pub submerged_height: f32,
    /// Sail reference area for thrust (and wind, in the sail-area variant).
    pub sail_area: f32,
    /// Waterplane area used for the displaced volume.
    pub submerged_area: f32,
    /// Frontal area for water drag (and wind, in the drag-area variant).
    pub drag_area: f32,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            drag_coefficient: 0.08,
            mass: 200.0,
            water_density: 1000.0,
            air_density: 1.2,
            submerged_height: 0.1,
            sail_area: 50.0,
            submerged_area: 2.0,
            drag_area: 0.1,
        }
    }
}

impl PhysicalConstants {
    /// Displaced water volume: waterplane area times submerged height.
    pub fn submerged_volume(&self) -> f32 {
        self.submerged_area * self.submerged_height
    }

    /// Check every constant; returns all problems found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !self.mass.is_finite() || self.mass <= 0.0 {
            errors.push(ConfigError::NonPositiveMass(self.mass));
        }

        let named = [
            ("gravity", self.gravity),
            ("drag_coefficient", self.drag_coefficient),
            ("water_density", self.water_density),
            ("air_density", self.air_density),
            ("submerged_height", self.submerged_height),
            ("sail_area", self.sail_area),
            ("submerged_area", self.submerged_area),
            ("drag_area", self.drag_area),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError::InvalidConstant { name, value });
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let errors = PhysicalConstants::default().validate();
        assert!(errors.is_empty(), "default constants should be valid: {errors:?}");
    }

    #[test]
    fn default_volume() {
        let c = PhysicalConstants::default();
        assert!((c.submerged_volume() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn zero_mass_rejected() {
        let c = PhysicalConstants {
            mass: 0.0,
            ..Default::default()
        };
        assert!(c.validate().contains(&ConfigError::NonPositiveMass(0.0)));
    }

    #[test]
    fn negative_density_rejected() {
        let c = PhysicalConstants {
            water_density: -1.0,
            ..Default::default()
        };
        assert!(c.validate().contains(&ConfigError::InvalidConstant {
            name: "water_density",
            value: -1.0
        }));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: PhysicalConstants = serde_json::from_str(r#"{ "mass": 150.0 }"#).unwrap();
        assert_eq!(c.mass, 150.0);
        assert_eq!(c.gravity, 9.8);
    }
}
