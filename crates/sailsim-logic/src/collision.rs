//! Embedded boundary zones around the navigable water.
//!
//! Each zone is a sphere stretched per axis into an ellipsoid. The table is
//! a fixed constant: three shorelines enclosing the basin, two sandbars
//! crossing the channel, a reef and a shoal.
//!
//! The physics step never consults this table. Callers use it for
//! world-level events such as run-aground detection or channel-boundary
//! alerts.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// One ellipsoidal zone: a sphere of `radius` at `center`, scaled by `scale`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionVolume {
    pub name: String,
    pub center: Vec3,
    pub radius: f32,
    pub scale: Vec3,
}

impl CollisionVolume {
    pub fn new(name: impl Into<String>, center: Vec3, radius: f32, scale: Vec3) -> Self {
        Self {
            name: name.into(),
            center,
            radius,
            scale,
        }
    }

    /// Semi-axes of the ellipsoid.
    pub fn semi_axes(&self) -> Vec3 {
        self.scale * self.radius
    }

    /// Length of `p` in unit-sphere space: `< 1` inside, `1` on the surface.
    pub fn normalized_distance(&self, p: Vec3) -> f32 {
        ((p - self.center) / self.semi_axes()).length()
    }

    pub fn contains(&self, p: Vec3) -> bool {
        self.normalized_distance(p) <= 1.0
    }

    /// Signed distance from `p` to the surface, measured along the ray from
    /// the center through `p`. Negative inside.
    pub fn surface_distance(&self, p: Vec3) -> f32 {
        let offset = p - self.center;
        let k = self.normalized_distance(p);
        if k == 0.0 {
            // at the center: distance to the nearest surface point
            return -self.semi_axes().min_element();
        }
        offset.length() * (1.0 - 1.0 / k)
    }
}

/// Read-only table of boundary zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollisionVolumes {
    volumes: Vec<CollisionVolume>,
}

impl Default for CollisionVolumes {
    fn default() -> Self {
        Self::embedded()
    }
}

impl CollisionVolumes {
    /// The built-in zones of the sailing basin.
    pub fn embedded() -> Self {
        let zone = |name: &str, c: [f32; 3], r: f32, s: [f32; 3]| {
            CollisionVolume::new(name, Vec3::from_array(c), r, Vec3::from_array(s))
        };
        Self {
            volumes: vec![
                zone("north_shore", [0.0, 300.0, 3200.0], 800.0, [6.2, 1.0, 1.0]),
                zone("east_shore", [3400.0, 300.0, 0.0], 800.0, [1.0, 1.0, 6.8]),
                zone("west_shore", [-3400.0, 300.0, 0.0], 800.0, [1.0, 1.0, 6.8]),
                zone("north_sandbar", [0.0, 60.0, 1200.0], 320.0, [6.0, 1.0, 1.0]),
                zone("south_sandbar", [0.0, 60.0, -1200.0], 320.0, [6.0, 1.0, 1.0]),
                zone("west_reef", [-1400.0, -65.0, 0.0], 800.0, [1.0, 1.0, 1.0]),
                zone("central_shoal", [-300.0, -150.0, 230.0], 380.0, [1.0, 1.0, 1.0]),
            ],
        }
    }

    pub fn with_volumes(volumes: Vec<CollisionVolume>) -> Self {
        Self { volumes }
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CollisionVolume> {
        self.volumes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CollisionVolume> {
        self.volumes.iter()
    }

    /// Indices of every zone containing `p`, in table order.
    pub fn contains_point(&self, p: Vec3) -> Vec<usize> {
        self.volumes
            .iter()
            .enumerate()
            .filter(|(_, v)| v.contains(p))
            .map(|(i, _)| i)
            .collect()
    }

    /// Zone whose surface is closest to `p`, with the signed distance.
    pub fn nearest_volume(&self, p: Vec3) -> Option<(usize, f32)> {
        self.volumes
            .iter()
            .enumerate()
            .map(|(i, v)| (i, v.surface_distance(p)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}
