use crate::collision::{CollisionInfo, ContactSolver};
use crate::config::{BodyDef, WorldConfig};
use crate::error::PhysicsError;
use crate::objects::body_id::BodyIdGenerator;
use crate::objects::rigid_body::RigidBody;

/// Owns the bodies and drives one simulation step at a time.
///
/// Geometry is not tracked here: an external collision stage reports contacts
/// with [`PhysicsWorld::add_contact`] before each [`PhysicsWorld::step`].
#[derive(Debug, Clone, Default)]
pub struct PhysicsWorld {
    pub bodies: Vec<RigidBody>,
    pub config: WorldConfig,
    ids: BodyIdGenerator,
    // Pending contacts for the next step
    contacts: Vec<CollisionInfo>,
}

impl PhysicsWorld {
    pub fn new(config: WorldConfig) -> Self {
        Self {
            bodies: Vec::new(),
            config,
            ids: BodyIdGenerator::new(),
            contacts: Vec::new(),
        }
    }

    /// Creates a body at the origin and returns its index. A mass of 0 makes it static.
    pub fn create_body(&mut self, mass: f64, inertia: f64) -> usize {
        let body = RigidBody::new(mass, inertia, &mut self.ids);
        self.add_body(body)
    }

    pub fn create_body_from_def(&mut self, def: &BodyDef) -> usize {
        let body = RigidBody::from_def(def, &mut self.ids);
        self.add_body(body)
    }

    /// Adds an already built body and returns its index.
    pub fn add_body(&mut self, body: RigidBody) -> usize {
        let index = self.bodies.len();
        self.bodies.push(body);
        index
    }

    pub fn body(&self, index: usize) -> Option<&RigidBody> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut RigidBody> {
        self.bodies.get_mut(index)
    }

    /// Id generator used for bodies created through this world.
    pub fn ids_mut(&mut self) -> &mut BodyIdGenerator {
        &mut self.ids
    }

    /// Queues a contact for the next step.
    pub fn add_contact(&mut self, contact: CollisionInfo) -> Result<(), PhysicsError> {
        let len = self.bodies.len();
        for index in [contact.body_a, contact.body_b] {
            if index >= len {
                return Err(PhysicsError::BodyIndexOutOfRange { index, len });
            }
        }
        if contact.body_a == contact.body_b {
            return Err(PhysicsError::SameBody(contact.body_a));
        }
        self.contacts.push(contact);
        Ok(())
    }

    pub fn contacts(&self) -> &[CollisionInfo] {
        &self.contacts
    }

    /// Advances the simulation by `dt` seconds, clamped to `config.max_time_step`.
    ///
    /// Order: contact preparation, gravity on awake dynamic bodies, velocity
    /// solve, integration, position correction. Queued contacts are consumed
    /// even when the step fails, and a failed step leaves every body as it was.
    /// A non-positive `dt` does nothing.
    pub fn step(&mut self, dt: f64) -> Result<(), PhysicsError> {
        if !(dt > 0.0) {
            return Ok(());
        }
        let dt = if dt > self.config.max_time_step {
            tracing::debug!(dt, max = self.config.max_time_step, "clamping time step");
            self.config.max_time_step
        } else {
            dt
        };

        let mut contacts = std::mem::take(&mut self.contacts);

        // 1. Contacts. Bodies are untouched if any of them is stale.
        for contact in contacts.iter_mut() {
            contact.prepare(&self.bodies)?;
        }

        // 2. Gravity
        let gravity = self.config.gravity;
        for body in self.bodies.iter_mut() {
            if !body.is_static() && body.awake {
                let weight = gravity * body.mass();
                body.apply_force(weight);
            }
        }

        let solver = ContactSolver::new(self.config.solver);
        solver.solve_velocities(&mut self.bodies, &contacts)?;

        // 3. Integrate
        for body in self.bodies.iter_mut() {
            body.integrate(dt);
        }

        // 4. Positional correction (to prevent sinking)
        solver.correct_positions(&mut self.bodies, &contacts)?;

        tracing::debug!(
            dt,
            bodies = self.bodies.len(),
            contacts = contacts.len(),
            "world step"
        );
        Ok(())
    }
}
