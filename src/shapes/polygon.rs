use crate::collision::sat;
use crate::error::PhysicsError;
use crate::math::transform::Transform;
use crate::math::vec2::Vec2;

/// A convex polygon defined by its vertices in body-local space.
/// Either winding is accepted; the vertex order is kept as given.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    /// Creates a polygon, rejecting anything with fewer than 3 vertices.
    ///
    /// Convexity is not checked.
    pub fn new(vertices: Vec<Vec2>) -> Result<Self, PhysicsError> {
        if vertices.len() < 3 {
            return Err(PhysicsError::TooFewVertices(vertices.len()));
        }
        Ok(Polygon { vertices })
    }

    /// Axis-aligned box of the given size centred on the local origin.
    pub fn rectangle(width: f64, height: f64) -> Self {
        let hw = width * 0.5;
        let hh = height * 0.5;
        Polygon {
            vertices: vec![
                Vec2::new(-hw, -hh),
                Vec2::new(hw, -hh),
                Vec2::new(hw, hh),
                Vec2::new(-hw, hh),
            ],
        }
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Shoelace sum; positive for counter-clockwise order in a y-up frame.
    fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        let mut area = 0.0;
        for i in 0..n {
            area += self.vertices[i].cross(self.vertices[(i + 1) % n]);
        }
        area / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Centre of mass for uniform density. Degenerate (zero-area) polygons
    /// fall back to the vertex average.
    pub fn centroid(&self) -> Vec2 {
        let n = self.vertices.len();
        if n < 3 {
            return self.vertex_average();
        }
        let origin = self.vertices[0];
        let mut centroid = Vec2::ZERO;
        let mut signed_area_sum = 0.0;

        // fan triangulation from the first vertex
        for i in 1..(n - 1) {
            let v2 = self.vertices[i];
            let v3 = self.vertices[i + 1];
            let triangle_area = (v2 - origin).cross(v3 - origin) / 2.0;
            signed_area_sum += triangle_area;
            centroid += (origin + v2 + v3) / 3.0 * triangle_area;
        }

        if signed_area_sum.abs() < 1e-10 {
            self.vertex_average()
        } else {
            centroid / signed_area_sum
        }
    }

    fn vertex_average(&self) -> Vec2 {
        if self.vertices.is_empty() {
            return Vec2::ZERO;
        }
        let sum = self.vertices.iter().fold(Vec2::ZERO, |acc, &v| acc + v);
        sum / self.vertices.len() as f64
    }

    /// Moment of inertia about the centroid for a uniform body of `mass`.
    ///
    /// Returns 0 for zero-area polygons or non-positive mass; `RigidBody` then
    /// applies its own floor.
    pub fn inertia_for_mass(&self, mass: f64) -> f64 {
        let area = self.area();
        if area < 1e-10 || mass <= 0.0 {
            return 0.0;
        }
        let density = mass / area;

        let n = self.vertices.len();
        let mut sum = 0.0;
        for i in 0..n {
            let v1 = self.vertices[i];
            let v2 = self.vertices[(i + 1) % n];
            sum += v1.cross(v2) * (v1.length_squared() + v1.dot(v2) + v2.length_squared());
        }
        let inertia_origin = (sum / 12.0).abs() * density;

        // parallel axis theorem
        let d_squared = self.centroid().length_squared();
        (inertia_origin - mass * d_squared).max(0.0)
    }

    /// Vertices moved into world space by `transform`.
    pub fn world_vertices(&self, transform: &Transform) -> Vec<Vec2> {
        self.vertices.iter().map(|&v| transform.apply(v)).collect()
    }

    /// Unit edge normals in local space.
    pub fn edge_normals(&self) -> Vec<Vec2> {
        sat::edge_normals(&self.vertices)
    }
}
