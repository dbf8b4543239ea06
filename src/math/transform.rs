use super::mat22::Mat22;
use super::vec2::Vec2;

/// Placement of a body-local frame in the world: rotate by `angle`, then translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub angle: f64, // radians
}

impl Transform {
    pub fn new(position: Vec2, angle: f64) -> Self {
        Self { position, angle }
    }

    /// No translation, no rotation.
    pub fn identity() -> Self {
        Self::new(Vec2::ZERO, 0.0)
    }

    pub fn rotation(&self) -> Mat22 {
        Mat22::from_angle(self.angle)
    }

    /// Local point to world point.
    pub fn apply(&self, point: Vec2) -> Vec2 {
        self.rotation().mul_vec(point) + self.position
    }

    /// World point to local point. Uses the transpose of the rotation as its inverse.
    pub fn apply_inverse(&self, point: Vec2) -> Vec2 {
        self.rotation().transpose().mul_vec(point - self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
