use std::ops::Mul;

use super::vec2::Vec2;

/// A 2x2 matrix stored as two column vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat22 {
    pub c1: Vec2,
    pub c2: Vec2,
}

impl Mat22 {
    pub const IDENTITY: Mat22 = Mat22 {
        c1: Vec2 { x: 1.0, y: 0.0 },
        c2: Vec2 { x: 0.0, y: 1.0 },
    };

    pub fn new(c1: Vec2, c2: Vec2) -> Self {
        Self { c1, c2 }
    }

    pub fn from_components(c1x: f64, c1y: f64, c2x: f64, c2y: f64) -> Self {
        Self::new(Vec2::new(c1x, c1y), Vec2::new(c2x, c2y))
    }

    /// Counter-clockwise rotation by `angle` radians.
    pub fn from_angle(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_components(c, s, -s, c)
    }

    pub fn mul_vec(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.c1.x * v.x + self.c2.x * v.y,
            self.c1.y * v.x + self.c2.y * v.y,
        )
    }

    /// Swaps rows and columns. For a pure rotation this is the inverse.
    pub fn transpose(&self) -> Self {
        Self::from_components(self.c1.x, self.c2.x, self.c1.y, self.c2.y)
    }
}

impl Default for Mat22 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec2> for Mat22 {
    type Output = Vec2;

    fn mul(self, v: Vec2) -> Vec2 {
        self.mul_vec(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};
    const EPSILON: f64 = 1e-10;

    #[test]
    fn test_mat22_default_is_identity() {
        let m = Mat22::default();
        let v = Vec2::new(3.0, -7.0);
        assert_eq!(m.mul_vec(v), v);
    }

    #[test]
    fn test_mat22_column_mapping() {
        // Columns (1,2) and (3,4): x = 1*vx + 3*vy, y = 2*vx + 4*vy
        let m = Mat22::from_components(1.0, 2.0, 3.0, 4.0);
        let r = m * Vec2::new(5.0, 6.0);
        assert_eq!(r, Vec2::new(23.0, 34.0));
    }

    #[test]
    fn test_mat22_transpose() {
        let m = Mat22::from_components(1.0, 2.0, 3.0, 4.0);
        let t = m.transpose();
        assert_eq!(t, Mat22::from_components(1.0, 3.0, 2.0, 4.0));
        assert_eq!(t.transpose(), m);
        // original untouched
        assert_eq!(m.c1, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_mat22_rotation_matches_vec_rotate() {
        let v = Vec2::new(1.5, -0.5);
        for i in 0..16 {
            let theta = i as f64 * PI / 7.0 - PI;
            let by_matrix = Mat22::from_angle(theta).mul_vec(v);
            let by_vec = v.rotated(theta);
            assert_abs_diff_eq!(by_matrix.x, by_vec.x, epsilon = EPSILON);
            assert_abs_diff_eq!(by_matrix.y, by_vec.y, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_mat22_rotation_transpose_is_inverse() {
        let r = Mat22::from_angle(FRAC_PI_2 * 0.3);
        let v = Vec2::new(2.0, 9.0);
        let back = r.transpose().mul_vec(r.mul_vec(v));
        assert_abs_diff_eq!(back.x, v.x, epsilon = EPSILON);
        assert_abs_diff_eq!(back.y, v.y, epsilon = EPSILON);
    }
}
