use crate::objects::rigid_body::RigidBody;

/// Integrates the rigid body's state forward in time using semi-implicit Euler.
///
/// Static and sleeping bodies have their velocities and accumulators zeroed and
/// do not move. Otherwise velocity is updated from force first, damped, and only
/// then used to advance position; the angular half follows the same order.
/// Accumulators are always cleared.
pub fn integrate(body: &mut RigidBody, dt: f64) {
    if body.is_static() || !body.awake {
        body.clear_motion();
        return;
    }

    // --- Linear Motion --- //
    let linear_acceleration = body.force * body.inv_mass();
    body.velocity += linear_acceleration * dt;
    body.velocity *= body.linear_damping;
    body.position += body.velocity * dt;

    // --- Angular Motion --- //
    let angular_acceleration = body.torque * body.inv_inertia();
    body.angular_velocity += angular_acceleration * dt;
    body.angular_velocity *= body.angular_damping;
    body.angle += body.angular_velocity * dt;

    body.clear_accumulators();
}
