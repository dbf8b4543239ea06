//! Tunables for the world driver and contact solver, plus declarative body
//! descriptions. Every struct deserializes from partial JSON; missing fields
//! take their defaults.

use serde::{Deserialize, Serialize};

use crate::common::Material;
use crate::error::PhysicsError;
use crate::math::vec2::Vec2;

/// Largest step the world will integrate in one call. Bigger frame times are
/// clamped to this to keep the explicit integrator stable.
pub const DEFAULT_MAX_TIME_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Sequential-impulse passes over all contacts per step.
    pub velocity_iterations: usize,
    /// Fraction of the remaining penetration removed per step (Baumgarte factor).
    pub position_correction_percent: f64,
    /// Penetration depth left uncorrected to avoid jitter.
    pub penetration_slop: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            velocity_iterations: 10,
            position_correction_percent: 0.2,
            penetration_slop: 0.01,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(0.0..=1.0).contains(&self.position_correction_percent) {
            return Err(PhysicsError::InvalidConfig(format!(
                "position_correction_percent must be within [0, 1], got {}",
                self.position_correction_percent
            )));
        }
        if !(self.penetration_slop >= 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "penetration_slop must be non-negative, got {}",
                self.penetration_slop
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Acceleration applied to every awake dynamic body (y points down).
    pub gravity: Vec2,
    pub max_time_step: f64,
    pub solver: SolverConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 9.8),
            max_time_step: DEFAULT_MAX_TIME_STEP,
            solver: SolverConfig::default(),
        }
    }
}

impl WorldConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, PhysicsError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.max_time_step > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "max_time_step must be positive, got {}",
                self.max_time_step
            )));
        }
        self.solver.validate()
    }
}

/// Declarative description of a rigid body. `mass == 0.0` makes it static.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyDef {
    pub mass: f64,
    pub inertia: f64,
    pub position: Vec2,
    pub angle: f64,
    pub velocity: Vec2,
    pub angular_velocity: f64,
    pub material: Material,
    pub linear_damping: f64,
    pub angular_damping: f64,
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            mass: 1.0,
            inertia: 1.0,
            position: Vec2::ZERO,
            angle: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            material: Material::default(),
            linear_damping: 0.98,
            angular_damping: 0.98,
        }
    }
}
