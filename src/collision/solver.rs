//! Sequential-impulse contact solver for prepared `CollisionInfo` records.
//!
//! Each contact point keeps an accumulated normal impulse (never negative) and an
//! accumulated friction impulse (bounded by `friction * normal impulse`). The
//! restitution target is taken from the approach speed before the first pass, so
//! every point ends with a separating speed of `-e * vn` however many points and
//! passes share the work. A single linear position correction pass follows.
//! Contacts must have been prepared.

use super::body_pair_mut;
use super::info::CollisionInfo;
use crate::config::SolverConfig;
use crate::error::PhysicsError;
use crate::math::utils::clamp;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;

#[derive(Debug, Clone, Copy, Default)]
pub struct ContactSolver {
    pub config: SolverConfig,
}

/// Per-point solver state, fixed for the duration of one velocity solve.
#[derive(Debug, Clone, Copy)]
struct PointState {
    point: Vec2,
    normal_mass: f64,
    tangent_mass: f64,
    /// Separating speed the normal impulse aims for.
    velocity_bias: f64,
    normal_impulse: f64,
    tangent_impulse: f64,
}

impl ContactSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Runs the configured number of impulse passes over all contacts.
    pub fn solve_velocities(
        &self,
        bodies: &mut [RigidBody],
        contacts: &[CollisionInfo],
    ) -> Result<(), PhysicsError> {
        let mut manifolds = Vec::with_capacity(contacts.len());
        for contact in contacts {
            // Both static, or never prepared.
            if contact.inv_mass_sum <= 0.0 {
                continue;
            }
            let (body_a, body_b) = body_pair_mut(bodies, contact.body_a, contact.body_b)?;
            manifolds.push((contact, pre_solve(contact, body_a, body_b)));
        }

        for _ in 0..self.config.velocity_iterations {
            for (contact, points) in manifolds.iter_mut() {
                let (body_a, body_b) = body_pair_mut(bodies, contact.body_a, contact.body_b)?;
                solve_points(*contact, points, body_a, body_b);
            }
        }

        for (contact, points) in &manifolds {
            tracing::trace!(
                body_a = contact.body_a,
                body_b = contact.body_b,
                points = points.len(),
                normal_impulse = points.iter().map(|p| p.normal_impulse).sum::<f64>(),
                "resolved contact"
            );
        }
        Ok(())
    }

    /// Pushes each pair apart along the normal by a fraction of the penetration
    /// beyond the slop, split by inverse mass.
    pub fn correct_positions(
        &self,
        bodies: &mut [RigidBody],
        contacts: &[CollisionInfo],
    ) -> Result<(), PhysicsError> {
        let percent = self.config.position_correction_percent;
        let slop = self.config.penetration_slop;

        for contact in contacts {
            if contact.inv_mass_sum <= 0.0 {
                continue;
            }
            let correction_magnitude = (contact.depth - slop).max(0.0);
            if correction_magnitude < 1e-9 {
                continue;
            }
            let (body_a, body_b) = body_pair_mut(bodies, contact.body_a, contact.body_b)?;
            let correction =
                contact.normal * (correction_magnitude / contact.inv_mass_sum * percent);
            body_a.position -= correction * body_a.inv_mass();
            body_b.position += correction * body_b.inv_mass();
        }
        Ok(())
    }
}

/// Effective mass terms and restitution targets from the pre-solve velocities.
fn pre_solve(contact: &CollisionInfo, body_a: &RigidBody, body_b: &RigidBody) -> Vec<PointState> {
    let normal = contact.normal;
    let tangent = normal.perpendicular();
    let midpoint = [(body_a.position + body_b.position) * 0.5];
    let points: &[Vec2] = if contact.contacts.is_empty() {
        &midpoint
    } else {
        &contact.contacts
    };

    let effective_mass = |r_a: Vec2, r_b: Vec2, axis: Vec2| {
        let ra_cross = r_a.cross(axis);
        let rb_cross = r_b.cross(axis);
        contact.inv_mass_sum
            + ra_cross * ra_cross * body_a.inv_inertia()
            + rb_cross * rb_cross * body_b.inv_inertia()
    };

    points
        .iter()
        .map(|&point| {
            let r_a = point - body_a.position;
            let r_b = point - body_b.position;
            let relative_velocity =
                body_b.velocity_at_point(point) - body_a.velocity_at_point(point);
            let velocity_along_normal = relative_velocity.dot(normal);
            let velocity_bias = if velocity_along_normal < 0.0 {
                -contact.restitution * velocity_along_normal
            } else {
                0.0
            };
            PointState {
                point,
                normal_mass: 1.0 / effective_mass(r_a, r_b, normal),
                tangent_mass: 1.0 / effective_mass(r_a, r_b, tangent),
                velocity_bias,
                normal_impulse: 0.0,
                tangent_impulse: 0.0,
            }
        })
        .collect()
}

/// One impulse pass over the points of a single manifold.
fn solve_points(
    contact: &CollisionInfo,
    points: &mut [PointState],
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
) {
    let normal = contact.normal;
    let tangent = normal.perpendicular();

    for state in points.iter_mut() {
        let point = state.point;

        // Normal impulse, accumulated total kept non-negative.
        let relative_velocity = body_b.velocity_at_point(point) - body_a.velocity_at_point(point);
        let velocity_along_normal = relative_velocity.dot(normal);
        let lambda = -state.normal_mass * (velocity_along_normal - state.velocity_bias);
        let accumulated = (state.normal_impulse + lambda).max(0.0);
        let lambda = accumulated - state.normal_impulse;
        state.normal_impulse = accumulated;
        if lambda != 0.0 {
            let impulse = normal * lambda;
            body_a.apply_impulse_at_point(-impulse, point);
            body_b.apply_impulse_at_point(impulse, point);
        }

        // Coulomb friction against the accumulated normal impulse.
        let relative_velocity = body_b.velocity_at_point(point) - body_a.velocity_at_point(point);
        let lambda_t = -state.tangent_mass * relative_velocity.dot(tangent);
        let max_friction = contact.friction * state.normal_impulse;
        let accumulated_t = clamp(state.tangent_impulse + lambda_t, -max_friction, max_friction);
        let lambda_t = accumulated_t - state.tangent_impulse;
        state.tangent_impulse = accumulated_t;
        if lambda_t != 0.0 {
            let friction_impulse = tangent * lambda_t;
            body_a.apply_impulse_at_point(-friction_impulse, point);
            body_b.apply_impulse_at_point(friction_impulse, point);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::BodyIdGenerator;
    use approx::assert_abs_diff_eq;
    const EPSILON: f64 = 1e-9;

    fn single_pass() -> ContactSolver {
        ContactSolver::new(SolverConfig {
            velocity_iterations: 1,
            ..SolverConfig::default()
        })
    }

    fn two_unit_bodies() -> Vec<RigidBody> {
        let mut ids = BodyIdGenerator::new();
        vec![RigidBody::new(1.0, 1.0, &mut ids), RigidBody::new(1.0, 1.0, &mut ids)]
    }

    #[test]
    fn test_head_on_impulse() {
        let mut bodies = two_unit_bodies();
        bodies[0].position = Vec2::new(-1.0, 0.0);
        bodies[1].position = Vec2::new(1.0, 0.0);
        bodies[0].velocity = Vec2::new(10.0, 0.0);
        bodies[1].velocity = Vec2::new(-10.0, 0.0);

        let mut contact = CollisionInfo::new(0, 1, Vec2::new(1.0, 0.0), 0.0);
        contact.add_contact(Vec2::ZERO);
        contact.prepare(&bodies).unwrap();

        // j = (1 + 0.2) * 20 / 2 = 12
        single_pass().solve_velocities(&mut bodies, &[contact]).unwrap();
        assert_abs_diff_eq!(bodies[0].velocity.x, -2.0, epsilon = EPSILON);
        assert_abs_diff_eq!(bodies[1].velocity.x, 2.0, epsilon = EPSILON);
        assert_abs_diff_eq!(bodies[0].angular_velocity, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(bodies[1].angular_velocity, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_more_iterations_do_not_reapply_to_separating_pair() {
        let mut bodies = two_unit_bodies();
        bodies[0].position = Vec2::new(-1.0, 0.0);
        bodies[1].position = Vec2::new(1.0, 0.0);
        bodies[0].velocity = Vec2::new(10.0, 0.0);
        bodies[1].velocity = Vec2::new(-10.0, 0.0);
        let mut contact = CollisionInfo::new(0, 1, Vec2::new(1.0, 0.0), 0.0);
        contact.add_contact(Vec2::ZERO);
        contact.prepare(&bodies).unwrap();

        ContactSolver::default().solve_velocities(&mut bodies, &[contact]).unwrap();
        assert_abs_diff_eq!(bodies[0].velocity.x, -2.0, epsilon = EPSILON);
        assert_abs_diff_eq!(bodies[1].velocity.x, 2.0, epsilon = EPSILON);
    }

    /// Relative normal velocity at every contact point of `contact`.
    fn normal_speeds(bodies: &[RigidBody], contact: &CollisionInfo) -> Vec<f64> {
        let (a, b) = (&bodies[contact.body_a], &bodies[contact.body_b]);
        contact
            .contacts
            .iter()
            .map(|&p| (b.velocity_at_point(p) - a.velocity_at_point(p)).dot(contact.normal))
            .collect()
    }

    #[test]
    fn test_two_point_manifold_keeps_restitution() {
        let mut bodies = two_unit_bodies();
        bodies[0].position = Vec2::new(-1.0, 0.0);
        bodies[1].position = Vec2::new(1.0, 0.0);
        bodies[0].velocity = Vec2::new(10.0, 0.0);
        bodies[1].velocity = Vec2::new(-10.0, 0.0);

        let mut contact = CollisionInfo::new(0, 1, Vec2::new(1.0, 0.0), 0.0);
        contact.add_contact(Vec2::new(0.0, 0.5));
        contact.add_contact(Vec2::new(0.0, -0.5));
        contact.prepare(&bodies).unwrap();

        let solver = ContactSolver::new(SolverConfig {
            velocity_iterations: 30,
            ..SolverConfig::default()
        });
        solver.solve_velocities(&mut bodies, &[contact.clone()]).unwrap();

        // approached at 20, so each point separates at 0.2 * 20
        for speed in normal_speeds(&bodies, &contact) {
            assert_abs_diff_eq!(speed, 4.0, epsilon = 1e-6);
        }
        assert_abs_diff_eq!(bodies[0].velocity.x, -2.0, epsilon = 1e-6);
        assert_abs_diff_eq!(bodies[1].velocity.x, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_face_to_face_boxes_rebound() {
        use crate::collision::sat::polygon_contact;
        use crate::math::transform::Transform;
        use crate::shapes::Polygon;

        let shape = Polygon::rectangle(1.0, 1.0);
        let mut ids = BodyIdGenerator::new();
        let inertia = shape.inertia_for_mass(1.0);
        let mut bodies = vec![
            RigidBody::new(1.0, inertia, &mut ids),
            RigidBody::new(1.0, inertia, &mut ids),
        ];
        bodies[1].position = Vec2::new(0.95, 0.0);
        bodies[0].velocity = Vec2::new(5.0, 0.0);
        bodies[1].velocity = Vec2::new(-5.0, 0.0);

        let verts_a = shape.world_vertices(&Transform::new(bodies[0].position, 0.0));
        let verts_b = shape.world_vertices(&Transform::new(bodies[1].position, 0.0));
        let mut contact = polygon_contact(0, &verts_a, 1, &verts_b).unwrap().unwrap();
        assert_eq!(contact.contacts.len(), 4);
        contact.prepare(&bodies).unwrap();

        let solver = ContactSolver::new(SolverConfig {
            velocity_iterations: 50,
            ..SolverConfig::default()
        });
        solver.solve_velocities(&mut bodies, &[contact.clone()]).unwrap();

        // e = 0.2 and an approach speed of 10
        assert_abs_diff_eq!(bodies[0].velocity.x, -1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(bodies[1].velocity.x, 1.0, epsilon = 1e-3);
        assert_abs_diff_eq!(bodies[0].velocity.x + bodies[1].velocity.x, 0.0, epsilon = EPSILON);
        for speed in normal_speeds(&bodies, &contact) {
            assert!(speed > 1.9, "point still approaching or too slow: {speed}");
        }
    }

    #[test]
    fn test_separating_bodies_untouched() {
        let mut bodies = two_unit_bodies();
        bodies[1].position = Vec2::new(2.0, 0.0);
        bodies[1].velocity = Vec2::new(1.0, 0.0);
        let mut contact = CollisionInfo::new(0, 1, Vec2::new(1.0, 0.0), 0.0);
        contact.add_contact(Vec2::new(1.0, 0.0));
        contact.prepare(&bodies).unwrap();

        single_pass().solve_velocities(&mut bodies, &[contact]).unwrap();
        assert_eq!(bodies[0].velocity, Vec2::ZERO);
        assert_eq!(bodies[1].velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_ball_on_static_ground_stops_and_friction_slows() {
        let mut ids = BodyIdGenerator::new();
        let mut ball = RigidBody::new(1.0, 1.0, &mut ids);
        ball.position = Vec2::new(0.0, -1.0);
        ball.velocity = Vec2::new(1.0, 5.0);
        ball.material.restitution = 0.0;
        let ground = RigidBody::new(0.0, 1.0, &mut ids);
        let mut bodies = vec![ball, ground];

        // ground is below the ball (y down), so the normal points +y from ball to ground
        let mut contact = CollisionInfo::new(0, 1, Vec2::new(0.0, 1.0), 0.05);
        contact.add_contact(Vec2::new(0.0, 0.0));
        contact.prepare(&bodies).unwrap();

        single_pass().solve_velocities(&mut bodies, &[contact]).unwrap();
        let ball = &bodies[0];
        assert!(ball.velocity.y.abs() < 1e-9, "normal velocity not removed: {:?}", ball.velocity);
        assert!(ball.velocity.x < 1.0, "friction did not slow the ball: {:?}", ball.velocity);
        assert!(ball.velocity.x >= 0.0, "friction reversed the motion: {:?}", ball.velocity);
        assert_eq!(bodies[1].velocity, Vec2::ZERO);
    }

    #[test]
    fn test_unprepared_or_static_pair_is_skipped() {
        let mut bodies = two_unit_bodies();
        bodies[0].velocity = Vec2::new(5.0, 0.0);
        let mut contact = CollisionInfo::new(0, 1, Vec2::new(1.0, 0.0), 0.5);
        contact.add_contact(Vec2::ZERO);
        // not prepared: inv_mass_sum is still zero
        single_pass().solve_velocities(&mut bodies, &[contact.clone()]).unwrap();
        single_pass().correct_positions(&mut bodies, &[contact]).unwrap();
        assert_eq!(bodies[0].velocity, Vec2::new(5.0, 0.0));
        assert_eq!(bodies[0].position, Vec2::ZERO);
    }

    #[test]
    fn test_bad_index_is_error() {
        let mut bodies = two_unit_bodies();
        let mut contact = CollisionInfo::new(0, 1, Vec2::new(1.0, 0.0), 0.5);
        contact.prepare(&bodies).unwrap();
        contact.body_b = 9;
        let err = single_pass().solve_velocities(&mut bodies, &[contact]).unwrap_err();
        assert!(matches!(err, PhysicsError::BodyIndexOutOfRange { index: 9, .. }));
    }

    #[test]
    fn test_positional_correction() {
        let mut bodies = two_unit_bodies();
        bodies[0].position = Vec2::new(-0.5, 0.0);
        bodies[1].position = Vec2::new(0.5, 0.0);
        let mut contact = CollisionInfo::new(0, 1, Vec2::new(1.0, 0.0), 1.0);
        contact.prepare(&bodies).unwrap();

        single_pass().correct_positions(&mut bodies, &[contact]).unwrap();

        // (1.0 - 0.01) / 2.0 * 0.2 = 0.099 per body
        assert_abs_diff_eq!(bodies[0].position.x, -0.599, epsilon = EPSILON);
        assert_abs_diff_eq!(bodies[1].position.x, 0.599, epsilon = EPSILON);
    }

    #[test]
    fn test_positional_correction_leaves_static_body() {
        let mut ids = BodyIdGenerator::new();
        let ground = RigidBody::new(0.0, 1.0, &mut ids);
        let mut box_body = RigidBody::new(1.0, 1.0, &mut ids);
        box_body.position = Vec2::new(0.0, -1.0);
        let mut bodies = vec![ground, box_body];
        // normal from ground (A) up to the box (B), y down
        let mut contact = CollisionInfo::new(0, 1, Vec2::new(0.0, -1.0), 0.21);
        contact.prepare(&bodies).unwrap();

        single_pass().correct_positions(&mut bodies, &[contact]).unwrap();
        assert_eq!(bodies[0].position, Vec2::ZERO);
        // (0.21 - 0.01) / 1 * 0.2 = 0.04 upwards
        assert_abs_diff_eq!(bodies[1].position.y, -1.04, epsilon = EPSILON);
    }
}
