use crate::error::PhysicsError;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

/// Contact between two bodies plus the material and mass terms a solver needs.
///
/// Bodies are referenced by index into the caller's body slice; the descriptor
/// does not own them.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionInfo {
    pub body_a: usize,
    pub body_b: usize,
    /// Unit contact normal, pointing from body A towards body B.
    pub normal: Vec2,
    /// Penetration depth, non-negative.
    pub depth: f64,
    /// World-space contact points in generation order.
    pub contacts: Vec<Vec2>,

    // Filled in by `prepare`
    pub restitution: f64,
    pub friction: f64,
    pub inv_mass_sum: f64,
}

impl CollisionInfo {
    pub fn new(body_a: usize, body_b: usize, normal: Vec2, depth: f64) -> Self {
        Self {
            body_a,
            body_b,
            normal,
            depth,
            contacts: Vec::new(),
            restitution: 0.0,
            friction: 0.0,
            inv_mass_sum: 0.0,
        }
    }

    pub fn add_contact(&mut self, point: Vec2) {
        self.contacts.push(point);
    }

    /// Swaps the two bodies and reverses the normal so it still points from A to B.
    pub fn flip(&mut self) {
        std::mem::swap(&mut self.body_a, &mut self.body_b);
        self.normal.negate();
    }

    /// Looks up both bodies in `bodies` and derives the solver terms.
    /// Fails on an out-of-range index or a contact of a body with itself.
    pub fn prepare(&mut self, bodies: &[RigidBody]) -> Result<(), PhysicsError> {
        let len = bodies.len();
        if self.body_a == self.body_b && self.body_a < len {
            return Err(PhysicsError::SameBody(self.body_a));
        }
        let body_a = bodies
            .get(self.body_a)
            .ok_or(PhysicsError::BodyIndexOutOfRange { index: self.body_a, len })?;
        let body_b = bodies
            .get(self.body_b)
            .ok_or(PhysicsError::BodyIndexOutOfRange { index: self.body_b, len })?;
        self.prepare_with(body_a, body_b);
        Ok(())
    }

    /// Derives the solver terms from explicitly supplied bodies:
    /// the lower restitution, the geometric mean of the frictions, and the
    /// summed inverse mass.
    pub fn prepare_with(&mut self, body_a: &RigidBody, body_b: &RigidBody) {
        self.restitution = body_a.material.restitution.min(body_b.material.restitution);
        self.friction = (body_a.material.friction * body_b.material.friction).sqrt();
        self.inv_mass_sum = body_a.inv_mass() + body_b.inv_mass();
    }
}
