use crate::error::PhysicsError;
use crate::objects::rigid_body::RigidBody;

pub mod info;
pub mod sat;
pub mod solver;

// Re-export key types
pub use info::CollisionInfo;
pub use sat::polygon_contact;
pub use solver::ContactSolver;

/// Mutable references to two distinct bodies of the same slice.
pub(crate) fn body_pair_mut(
    bodies: &mut [RigidBody],
    idx_a: usize,
    idx_b: usize,
) -> Result<(&mut RigidBody, &mut RigidBody), PhysicsError> {
    let len = bodies.len();
    for index in [idx_a, idx_b] {
        if index >= len {
            return Err(PhysicsError::BodyIndexOutOfRange { index, len });
        }
    }
    if idx_a == idx_b {
        return Err(PhysicsError::SameBody(idx_a));
    }

    // split_at_mut needs the smaller index first
    if idx_a < idx_b {
        let (head, tail) = bodies.split_at_mut(idx_b);
        Ok((&mut head[idx_a], &mut tail[0]))
    } else {
        let (head, tail) = bodies.split_at_mut(idx_a);
        Ok((&mut tail[0], &mut head[idx_b]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::BodyIdGenerator;

    fn three_bodies() -> Vec<RigidBody> {
        let mut ids = BodyIdGenerator::new();
        (0..3).map(|_| RigidBody::new(1.0, 1.0, &mut ids)).collect()
    }

    #[test]
    fn test_body_pair_mut_either_order() {
        let mut bodies = three_bodies();
        let (a, b) = body_pair_mut(&mut bodies, 2, 0).unwrap();
        assert_eq!(a.id.0, 2);
        assert_eq!(b.id.0, 0);
        let (a, b) = body_pair_mut(&mut bodies, 0, 1).unwrap();
        assert_eq!(a.id.0, 0);
        assert_eq!(b.id.0, 1);
    }

    #[test]
    fn test_body_pair_mut_rejects_bad_indices() {
        let mut bodies = three_bodies();
        assert!(matches!(
            body_pair_mut(&mut bodies, 1, 1),
            Err(PhysicsError::SameBody(1))
        ));
        assert!(matches!(
            body_pair_mut(&mut bodies, 0, 3),
            Err(PhysicsError::BodyIndexOutOfRange { index: 3, len: 3 })
        ));
    }
}
