//! Defines physical material properties.

use serde::{Deserialize, Serialize};

/// Surface properties of a rigid body that affect contact response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Coefficient of restitution (bounciness). Range [0, 1].
    /// 0 = perfectly inelastic (no bounce), 1 = perfectly elastic.
    pub restitution: f64,
    /// Coulomb friction coefficient. Range [0, infinity).
    pub friction: f64,
}

impl Material {
    /// Creates a new material, clamping both coefficients into their valid ranges.
    pub fn new(restitution: f64, friction: f64) -> Self {
        Material {
            restitution: restitution.clamp(0.0, 1.0),
            friction: friction.max(0.0),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material {
            restitution: 0.2,
            friction: 0.6,
        }
    }
}
