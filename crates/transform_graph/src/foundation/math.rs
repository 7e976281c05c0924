//! Math utilities and types
//!
//! Provides the affine math used by the transform pipeline. Vector and matrix
//! primitives come from `nalgebra`; this module only adds the aliases and the
//! handful of operations the entity contract needs on top of them.

pub use nalgebra::{
    Vector3, Vector4,
    Matrix4,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D (homogeneous) vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Tolerance used when deciding whether a value is numerically zero
    pub const EPSILON: f32 = 0.000_001;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// True when a determinant is too close to zero for the matrix to be inverted
    pub fn is_singular(determinant: f32) -> bool {
        approx::abs_diff_eq!(determinant, 0.0, epsilon = constants::EPSILON)
    }
}

/// Extension trait for Mat4 with the constructors and transforms the
/// pipeline relies on
pub trait Mat4Ext {
    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Create a single rotation matrix from yaw (heading, about Y), pitch
    /// (elevation, about X) and roll (bank, about Z), applied as `Ry * Rx * Rz`
    fn from_ypr(yaw: f32, pitch: f32, roll: f32) -> Mat4;

    /// Transform `point` as a homogeneous point (w = 1) and return the full
    /// 4-component result without a perspective divide
    fn transform_homogeneous(&self, point: &Vec3) -> Vec4;
}

impl Mat4Ext for Mat4 {
    fn rotation_x(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::x_axis(), angle)
    }

    fn rotation_y(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::y_axis(), angle)
    }

    fn rotation_z(angle: f32) -> Mat4 {
        Mat4::from_axis_angle(&Vec3::z_axis(), angle)
    }

    fn from_ypr(yaw: f32, pitch: f32, roll: f32) -> Mat4 {
        Self::rotation_y(yaw) * Self::rotation_x(pitch) * Self::rotation_z(roll)
    }

    fn transform_homogeneous(&self, point: &Vec3) -> Vec4 {
        self * Vec4::new(point.x, point.y, point.z, 1.0)
    }
}
