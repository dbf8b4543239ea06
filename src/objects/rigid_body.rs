use crate::common::Material;
use crate::config::BodyDef;
use crate::integration::integrator;
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;

use super::body_id::{BodyId, BodyIdGenerator};

/// Mass and inertia are floored to this so their inverses stay finite.
pub const MIN_MASS: f64 = 0.001;
pub const DEFAULT_DAMPING: f64 = 0.98;

#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub id: BodyId,

    // Primary state
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f64,            // radians
    pub angular_velocity: f64, // radians per second

    // Accumulators, cleared by every integration
    pub force: Vec2,
    pub torque: f64,

    pub material: Material,
    /// Multiplies velocity once per integration step.
    pub linear_damping: f64,
    /// Multiplies angular velocity once per integration step.
    pub angular_damping: f64,
    /// Sleeping bodies are held in place until a force or impulse wakes them.
    pub awake: bool,

    // Mass properties. Private so the static invariant cannot be broken.
    is_static: bool,
    mass: f64,
    inv_mass: f64,
    inertia: f64,
    inv_inertia: f64,
}

impl RigidBody {
    /// Creates a body at the origin.
    ///
    /// A mass of exactly `0.0` makes the body static: it never moves and has zero
    /// inverse mass and inertia. Any other non-positive or tiny mass/inertia is
    /// floored to `MIN_MASS`.
    pub fn new(mass: f64, inertia: f64, ids: &mut BodyIdGenerator) -> Self {
        let is_static = mass == 0.0;
        let mut body = Self {
            id: ids.next_id(),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angle: 0.0,
            angular_velocity: 0.0,
            force: Vec2::ZERO,
            torque: 0.0,
            material: Material::default(),
            linear_damping: DEFAULT_DAMPING,
            angular_damping: DEFAULT_DAMPING,
            awake: true,
            is_static,
            mass: 0.0,
            inv_mass: 0.0,
            inertia: 0.0,
            inv_inertia: 0.0,
        };
        body.set_mass(mass);
        body.set_inertia(inertia);
        body
    }

    /// Creates a body from a declarative description.
    pub fn from_def(def: &BodyDef, ids: &mut BodyIdGenerator) -> Self {
        let mut body = Self::new(def.mass, def.inertia, ids);
        body.position = def.position;
        body.angle = def.angle;
        body.material = def.material;
        body.linear_damping = def.linear_damping;
        body.angular_damping = def.angular_damping;
        if !body.is_static {
            body.velocity = def.velocity;
            body.angular_velocity = def.angular_velocity;
        }
        body
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        self.inv_mass
    }

    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    pub fn inv_inertia(&self) -> f64 {
        self.inv_inertia
    }

    /// Replaces the mass, re-applying the `MIN_MASS` floor.
    /// Static bodies keep a zero inverse mass.
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass.max(MIN_MASS);
        self.inv_mass = if self.is_static { 0.0 } else { 1.0 / self.mass };
    }

    /// Replaces the moment of inertia, re-applying the `MIN_MASS` floor.
    /// Static bodies keep a zero inverse inertia.
    pub fn set_inertia(&mut self, inertia: f64) {
        self.inertia = inertia.max(MIN_MASS);
        self.inv_inertia = if self.is_static { 0.0 } else { 1.0 / self.inertia };
    }

    /// Accumulates a force through the center of mass. Takes effect on the next
    /// integration.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.is_static {
            return;
        }
        self.force += force;
        self.awake = true;
    }

    /// Accumulates a force applied at a world-space point, which also produces torque.
    pub fn apply_force_at_point(&mut self, force: Vec2, point: Vec2) {
        if self.is_static {
            return;
        }
        self.force += force;
        self.torque += (point - self.position).cross(force);
        self.awake = true;
    }

    /// Instantly changes velocity by `impulse / mass`.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.is_static {
            return;
        }
        self.velocity += impulse * self.inv_mass;
        self.awake = true;
    }

    /// Instantly changes linear and angular velocity for an impulse applied at a
    /// world-space point.
    pub fn apply_impulse_at_point(&mut self, impulse: Vec2, point: Vec2) {
        if self.is_static {
            return;
        }
        self.velocity += impulse * self.inv_mass;
        self.angular_velocity += (point - self.position).cross(impulse) * self.inv_inertia;
        self.awake = true;
    }

    /// Velocity of the material point currently at `point` (world space).
    pub fn velocity_at_point(&self, point: Vec2) -> Vec2 {
        let r = point - self.position;
        self.velocity + r.perpendicular() * self.angular_velocity
    }

    /// Current placement of the body frame, for moving shape vertices into world space.
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.angle)
    }

    /// Advances the body by `dt` seconds. See [`integrator::integrate`].
    pub fn integrate(&mut self, dt: f64) {
        integrator::integrate(self, dt);
    }

    /// Puts the body to sleep and drops any motion and pending forces.
    pub fn sleep(&mut self) {
        self.awake = false;
        self.clear_motion();
    }

    pub fn wake(&mut self) {
        self.awake = true;
    }

    /// Zeroes velocity, angular velocity and the accumulators.
    pub(crate) fn clear_motion(&mut self) {
        self.velocity = Vec2::ZERO;
        self.angular_velocity = 0.0;
        self.clear_accumulators();
    }

    pub fn clear_accumulators(&mut self) {
        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }
}
