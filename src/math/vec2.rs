use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Lengths at or below this are treated as zero by `normalize`.
pub const NORMALIZE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    /// Creates a new Vec2.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    /// Builds a vector pointing along `angle` (radians) with the given length.
    pub fn from_angle(angle: f64, magnitude: f64) -> Self {
        Self::new(angle.cos() * magnitude, angle.sin() * magnitude)
    }

    /// Unit vector pointing along `angle`.
    pub fn from_unit_angle(angle: f64) -> Self {
        Self::from_angle(angle, 1.0)
    }

    /// Overwrites both components.
    pub fn set(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Calculates the dot product of two vectors.
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Computes the 2D cross product (scalar). Equivalent to z-component of 3D cross product.
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Squared length. Useful for comparisons as it avoids a square root.
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Distance between two points, `|self - other|`.
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    pub fn distance_squared(self, other: Self) -> f64 {
        (self - other).length_squared()
    }

    /// Returns a vector perpendicular to this vector (90-degree counter-clockwise rotation).
    pub fn perpendicular(self) -> Self {
        Self::new(-self.y, self.x)
    }

    /// Returns the unit vector in the same direction.
    /// Vectors no longer than `NORMALIZE_EPSILON` become the zero vector.
    pub fn normalized(self) -> Self {
        let mut v = self;
        v.normalize();
        v
    }

    /// Normalizes in place. Vectors no longer than `NORMALIZE_EPSILON` become zero.
    pub fn normalize(&mut self) {
        let len = self.length();
        if len > NORMALIZE_EPSILON {
            self.divide(len);
        } else {
            self.set(0.0, 0.0);
        }
    }

    /// Returns a copy rotated counter-clockwise by `angle` radians.
    pub fn rotated(self, angle: f64) -> Self {
        let mut v = self;
        v.rotate(angle);
        v
    }

    /// Rotates in place counter-clockwise by `angle` radians.
    pub fn rotate(&mut self, angle: f64) {
        let (sin_a, cos_a) = angle.sin_cos();
        // Both components must come from the pre-rotation values.
        let x = self.x * cos_a - self.y * sin_a;
        let y = self.x * sin_a + self.y * cos_a;
        self.x = x;
        self.y = y;
    }

    /// Divides in place. Dividing by zero zeroes the vector and logs a warning.
    pub fn divide(&mut self, scalar: f64) {
        if scalar == 0.0 {
            tracing::warn!("division by 0 in Vec2::divide, result clamped to zero");
            self.set(0.0, 0.0);
            return;
        }
        self.x /= scalar;
        self.y /= scalar;
    }

    pub fn negate(&mut self) {
        self.x = -self.x;
        self.y = -self.y;
    }
}

// Implement Add trait
impl Add for Vec2 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

// Implement Sub trait
impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

// Vec2 * f64
impl Mul<f64> for Vec2 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

// f64 * Vec2
impl Mul<Vec2> for f64 {
    type Output = Vec2;

    fn mul(self, vec: Vec2) -> Vec2 {
        vec * self
    }
}

// Division by exactly zero yields the zero vector instead of infinities.
impl Div<f64> for Vec2 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        if rhs == 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<f64> for Vec2 {
    fn mul_assign(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
    }
}

impl DivAssign<f64> for Vec2 {
    fn div_assign(&mut self, scalar: f64) {
        self.divide(scalar);
    }
}
