//! Model-variant switches.
//!
//! Earlier revisions of the boat model disagreed on a handful of details:
//! which area scales the wind pressure, how long the sail lever is, and
//! whether the yaw clamps or the floor bounce were active at all. Each of
//! those is a field here so one implementation can reproduce any of them.
//!
//! All angles are radians. The only degree entry points are the sail trim
//! (see [`crate::environment`]) and [`YawLimits::with_max_heading_degrees`].

use std::f32::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which constant scales the four wind-pressure forces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindReferenceArea {
    #[default]
    Sail,
    Drag,
}

/// Yaw dynamics limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YawLimits {
    /// Largest allowed |heading| (rad).
    pub max_heading: f32,
    /// Largest allowed |yaw rate| (rad/s).
    pub max_angular_velocity: f32,
    /// Ceiling on |yaw angular acceleration| (rad/s²).
    pub max_angular_acceleration: f32,
    /// |yaw angular acceleration| below this snaps to zero (rad/s²).
    pub angular_acceleration_deadband: f32,
}

impl Default for YawLimits {
    fn default() -> Self {
        Self {
            max_heading: FRAC_PI_4,
            max_angular_velocity: 1.0,
            max_angular_acceleration: 0.05,
            angular_acceleration_deadband: 0.01,
        }
    }
}

impl YawLimits {
    pub fn with_max_heading_degrees(mut self, degrees: f32) -> Self {
        self.max_heading = degrees.to_radians();
        self
    }

    pub fn validate(&self) -> Vec<ConfigError> {
        let named = [
            ("max_heading", self.max_heading),
            ("max_angular_velocity", self.max_angular_velocity),
            ("max_angular_acceleration", self.max_angular_acceleration),
            (
                "angular_acceleration_deadband",
                self.angular_acceleration_deadband,
            ),
        ];
        invalid_limits(&named)
    }
}

/// Response when the hull drops to the floor datum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloorResponse {
    /// Collision fires when `position.y <= floor_height`.
    pub floor_height: f32,
    /// Height the hull is reset to after a bounce.
    pub rest_height: f32,
    /// Vertical velocity is multiplied by `-restitution` on bounce.
    pub restitution: f32,
}

impl Default for FloorResponse {
    fn default() -> Self {
        Self {
            floor_height: 0.0,
            rest_height: 10.0,
            restitution: 0.5,
        }
    }
}

impl FloorResponse {
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = invalid_limits(&[
            ("rest_height", self.rest_height),
            ("restitution", self.restitution),
        ]);
        if !self.floor_height.is_finite() {
            errors.push(ConfigError::InvalidLimit {
                name: "floor_height",
                value: self.floor_height,
            });
        }
        errors
    }
}

/// Model-variant configuration for a world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DynamicsConfig {
    pub wind_reference_area: WindReferenceArea,
    /// Distance from the mast to the sail's centre of effort.
    pub sail_lever_radius: f32,
    /// Height of the sail tip above the hull origin.
    pub sail_mast_height: f32,
    /// `Some` enables yaw dynamics together with the heading and yaw-rate clamps.
    pub yaw: Option<YawLimits>,
    /// `Some` enables the floor-collision bounce.
    pub floor: Option<FloorResponse>,
}

impl Default for DynamicsConfig {
    fn default() -> Self {
        Self {
            wind_reference_area: WindReferenceArea::Sail,
            sail_lever_radius: 50.0,
            sail_mast_height: 100.0,
            yaw: Some(YawLimits::default()),
            floor: Some(FloorResponse::default()),
        }
    }
}

impl DynamicsConfig {
    /// Linear motion only: no yaw, no floor.
    pub fn linear_only() -> Self {
        Self {
            yaw: None,
            floor: None,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = invalid_limits(&[("sail_lever_radius", self.sail_lever_radius)]);
        if !self.sail_mast_height.is_finite() {
            errors.push(ConfigError::InvalidLimit {
                name: "sail_mast_height",
                value: self.sail_mast_height,
            });
        }
        if let Some(yaw) = &self.yaw {
            errors.extend(yaw.validate());
        }
        if let Some(floor) = &self.floor {
            errors.extend(floor.validate());
        }
        errors
    }
}

fn invalid_limits(named: &[(&'static str, f32)]) -> Vec<ConfigError> {
    named
        .iter()
        .filter(|(_, value)| !value.is_finite() || *value < 0.0)
        .map(|&(name, value)| ConfigError::InvalidLimit { name, value })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let errors = DynamicsConfig::default().validate();
        assert!(errors.is_empty(), "default config should be valid: {errors:?}");
    }

    #[test]
    fn heading_degrees_converted() {
        let yaw = YawLimits::default().with_max_heading_degrees(45.0);
        assert!((yaw.max_heading - FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn negative_lever_rejected() {
        let cfg = DynamicsConfig {
            sail_lever_radius: -20.0,
            ..Default::default()
        };
        assert!(cfg.validate().contains(&ConfigError::InvalidLimit {
            name: "sail_lever_radius",
            value: -20.0
        }));
    }

    #[test]
    fn nested_limits_validated() {
        let cfg = DynamicsConfig {
            floor: Some(FloorResponse {
                restitution: -0.5,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(cfg.validate().len(), 1);
    }

    #[test]
    fn disabled_branches_skip_validation() {
        let mut cfg = DynamicsConfig::linear_only();
        assert!(cfg.yaw.is_none() && cfg.floor.is_none());
        cfg.sail_lever_radius = 37.5;
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn variant_from_json() {
        let cfg: DynamicsConfig = serde_json::from_str(
            r#"{ "wind_reference_area": "Drag", "sail_lever_radius": 20.0, "floor": null }"#,
        )
        .unwrap();
        assert_eq!(cfg.wind_reference_area, WindReferenceArea::Drag);
        assert_eq!(cfg.sail_lever_radius, 20.0);
        assert!(cfg.floor.is_none());
        assert!(cfg.yaw.is_some());
    }
}
