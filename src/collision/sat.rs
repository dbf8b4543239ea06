//! Separating-axis contact generation for convex polygons given in world space.

use super::info::CollisionInfo;
use crate::error::PhysicsError;
use crate::math::utils::{overlap, project};
use crate::math::vec2::Vec2;

/// Axes shorter than this (squared) come from degenerate edges and are skipped.
const MIN_AXIS_LENGTH_SQ: f64 = 1e-12;

/// Unit normals of every edge of a closed polygon, in vertex order.
pub fn edge_normals(vertices: &[Vec2]) -> Vec<Vec2> {
    let n = vertices.len();
    let mut normals = Vec::with_capacity(n);
    for i in 0..n {
        let edge = vertices[(i + 1) % n] - vertices[i];
        if edge.length_squared() < MIN_AXIS_LENGTH_SQ {
            continue;
        }
        normals.push(edge.perpendicular().normalized());
    }
    normals
}

/// Whether `point` lies inside or on the boundary of a convex polygon of either winding.
pub fn contains_point(vertices: &[Vec2], point: Vec2) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut has_positive = false;
    let mut has_negative = false;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let side = (b - a).cross(point - a);
        if side > 0.0 {
            has_positive = true;
        } else if side < 0.0 {
            has_negative = true;
        }
        if has_positive && has_negative {
            return false;
        }
    }
    true
}

/// Tests two convex polygons for overlap.
///
/// Returns `Ok(None)` as soon as a separating axis is found. Otherwise the axis of
/// least overlap becomes the normal (oriented from A to B), its overlap the depth,
/// and every vertex of one polygon lying inside the other a contact point. When no
/// vertex is contained (edge-edge crossings) the vertex of B deepest along the
/// normal is used. The returned contact is not yet prepared.
pub fn polygon_contact(
    body_a: usize,
    vertices_a: &[Vec2],
    body_b: usize,
    vertices_b: &[Vec2],
) -> Result<Option<CollisionInfo>, PhysicsError> {
    if vertices_a.is_empty() || vertices_b.is_empty() {
        return Err(PhysicsError::EmptyVertexList);
    }

    let mut best: Option<(f64, Vec2)> = None;
    for axis in edge_normals(vertices_a).into_iter().chain(edge_normals(vertices_b)) {
        let pa = project(vertices_a, axis)?;
        let pb = project(vertices_b, axis)?;
        let o = overlap(pa.min, pa.max, pb.min, pb.max);
        if o.is_separated() {
            return Ok(None);
        }
        if best.map_or(true, |(depth, _)| o.overlap < depth) {
            // `sign` moves A out of B, so B lies the opposite way.
            best = Some((o.overlap, axis * -o.sign));
        }
    }

    let Some((depth, normal)) = best else {
        // Every edge was degenerate; there is no axis to separate along.
        return Ok(None);
    };

    let mut info = CollisionInfo::new(body_a, body_b, normal, depth);
    for &v in vertices_b {
        if contains_point(vertices_a, v) {
            info.add_contact(v);
        }
    }
    for &v in vertices_a {
        if contains_point(vertices_b, v) {
            info.add_contact(v);
        }
    }
    if info.contacts.is_empty() {
        let deepest = vertices_b
            .iter()
            .copied()
            .min_by(|p, q| p.dot(normal).total_cmp(&q.dot(normal)));
        if let Some(point) = deepest {
            info.add_contact(point);
        }
    }
    tracing::trace!(
        body_a,
        body_b,
        depth,
        contacts = info.contacts.len(),
        "polygon contact"
    );
    Ok(Some(info))
}
