//! Math utilities and types
//!
//! Provides the 2D vector type used by the collision code together with the
//! handful of operations the narrow phase is built from (rotation, edge axes,
//! scalar projection).

pub use nalgebra::{Vector2, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 4D vector type (RGBA colors for debug output)
pub type Vec4 = Vector4<f32>;

/// Extension trait for Vec2 with the operations used by collision tests
///
/// Every operation returns a new value; `Vec2` is treated as an immutable
/// value type. Division by zero follows IEEE semantics (infinity / NaN) and
/// is not guarded.
pub trait Vec2Ext {
    /// Component-wise addition
    fn add(&self, other: &Vec2) -> Vec2;

    /// Component-wise subtraction
    fn subtract(&self, other: &Vec2) -> Vec2;

    /// Component-wise multiplication
    fn multiply(&self, other: &Vec2) -> Vec2;

    /// Component-wise division
    fn divide(&self, other: &Vec2) -> Vec2;

    /// Rotate counter-clockwise about the origin
    fn rotate(&self, angle: f32) -> Vec2;

    /// Euclidean distance to another point
    fn distance(&self, other: &Vec2) -> f32;

    /// Perpendicular of the edge running from `self` to `other`
    ///
    /// Used as a candidate separating axis. The result is not normalized;
    /// a zero-length edge yields a zero axis.
    fn axis(&self, other: &Vec2) -> Vec2;

    /// Scalar projection of this point onto `axis`
    fn scalar_projection(&self, axis: &Vec2) -> f32;

    /// Extend a running `[min, max]` range by this point's projection onto `axis`
    fn project(&self, axis: &Vec2, min: f32, max: f32) -> (f32, f32);
}

impl Vec2Ext for Vec2 {
    fn add(&self, other: &Vec2) -> Vec2 {
        self + other
    }

    fn subtract(&self, other: &Vec2) -> Vec2 {
        self - other
    }

    fn multiply(&self, other: &Vec2) -> Vec2 {
        self.component_mul(other)
    }

    fn divide(&self, other: &Vec2) -> Vec2 {
        self.component_div(other)
    }

    fn rotate(&self, angle: f32) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        Vec2::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
        )
    }

    fn distance(&self, other: &Vec2) -> f32 {
        (self - other).magnitude()
    }

    fn axis(&self, other: &Vec2) -> Vec2 {
        let edge = self - other;
        Vec2::new(edge.y, -edge.x)
    }

    fn scalar_projection(&self, axis: &Vec2) -> f32 {
        axis.x * self.x + axis.y * self.y
    }

    fn project(&self, axis: &Vec2, min: f32, max: f32) -> (f32, f32) {
        let projection = self.scalar_projection(axis);
        (
            if projection < min { projection } else { min },
            if projection > max { projection } else { max },
        )
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_element_wise_operations() {
        let a = Vec2::new(2.0, 6.0);
        let b = Vec2::new(4.0, 3.0);

        assert_eq!(a.add(&b), Vec2::new(6.0, 9.0));
        assert_eq!(a.subtract(&b), Vec2::new(-2.0, 3.0));
        assert_eq!(a.multiply(&b), Vec2::new(8.0, 18.0));
        assert_eq!(a.divide(&b), Vec2::new(0.5, 2.0));
    }

    #[test]
    fn test_divide_by_zero_is_not_guarded() {
        let result = Vec2::new(1.0, 0.0).divide(&Vec2::new(0.0, 0.0));

        assert!(result.x.is_infinite());
        assert!(result.y.is_nan());
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let rotated = Vec2::new(1.0, 0.0).rotate(constants::HALF_PI);
        assert_relative_eq!(rotated, Vec2::new(0.0, 1.0), epsilon = EPSILON);

        let back = rotated.rotate(-constants::HALF_PI);
        assert_relative_eq!(back, Vec2::new(1.0, 0.0), epsilon = EPSILON);
    }

    #[test]
    fn test_distance() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(3.0, 4.0);
        assert_relative_eq!(a.distance(&b), 5.0, epsilon = EPSILON);
    }

    #[test]
    fn test_axis_is_perpendicular_to_edge() {
        let start = Vec2::new(1.0, 1.0);
        let end = Vec2::new(4.0, 2.0);
        let axis = start.axis(&end);

        assert_relative_eq!(axis.dot(&(end - start)), 0.0, epsilon = EPSILON);
        assert_eq!(axis, Vec2::new(-1.0, 3.0));
    }

    #[test]
    fn test_axis_of_degenerate_edge_is_zero() {
        let p = Vec2::new(2.0, -3.0);
        assert_eq!(p.axis(&p), Vec2::zeros());
    }

    #[test]
    fn test_project_extends_range() {
        let axis = Vec2::new(1.0, 0.0);

        assert_eq!(Vec2::new(5.0, 9.0).project(&axis, 0.0, 1.0), (0.0, 5.0));
        assert_eq!(Vec2::new(-2.0, 9.0).project(&axis, 0.0, 1.0), (-2.0, 1.0));
        assert_eq!(Vec2::new(0.5, 9.0).project(&axis, 0.0, 1.0), (0.0, 1.0));
    }

    #[test]
    fn test_utils() {
        assert_relative_eq!(utils::deg_to_rad(180.0), constants::PI, epsilon = EPSILON);
        assert_relative_eq!(utils::rad_to_deg(constants::HALF_PI), 90.0, epsilon = 1e-4);
        assert_eq!(utils::clamp(2.0, 0.0, 1.0), 1.0);
        assert_eq!(utils::clamp(-2.0, 0.0, 1.0), 0.0);
        assert_eq!(utils::lerp(2.0, 4.0, 0.5), 3.0);
    }
}
