//! Math utilities and types
//!
//! Provides the vector, matrix and quaternion aliases used across the editor,
//! plus OpenGL-convention matrix helpers (right-handed view space, clip depth
//! in [-1, 1]).

pub use nalgebra::{
    Vector3, Vector4,
    Matrix4,
    Quaternion,
    Unit,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Build a vector from a `[x, y, z]` array (scene file layout)
    pub fn vec3_from_array(values: [f32; 3]) -> Vec3 {
        Vec3::new(values[0], values[1], values[2])
    }

    /// Flatten a vector into a `[x, y, z]` array (scene file layout)
    pub fn vec3_to_array(value: &Vec3) -> [f32; 3] {
        [value.x, value.y, value.z]
    }
}

/// Extension trait for Mat4 with additional convenience methods
pub trait Mat4Ext {
    /// Create an OpenGL perspective projection matrix (`fov_y` in radians)
    ///
    /// A zero aspect ratio or coincident near and far planes are widened to
    /// [`f32::EPSILON`], so degenerate viewports give a finite matrix.
    fn perspective_gl(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a right-handed look-at view matrix
    fn look_at_gl(eye: Vec3, target: Vec3, up: Vec3) -> Mat4;

    /// Translation stored in the fourth column
    fn translation_part(&self) -> Vec3;

    /// One of the three basis columns (0 = X, 1 = Y, 2 = Z), unnormalized
    fn basis_axis(&self, index: usize) -> Vec3;

    /// Inverse, or identity when the matrix is singular
    fn inverse_or_identity(&self) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective_gl(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // P = [1/(a·tan(φ/2))  0            0               0            ]
        //     [0               1/tan(φ/2)   0               0            ]
        //     [0               0            -(f+n)/(f-n)    -2fn/(f-n)   ]
        //     [0               0            -1              0            ]
        let aspect = if aspect.abs() < f32::EPSILON { f32::EPSILON } else { aspect };
        let depth = if (far - near).abs() < f32::EPSILON { f32::EPSILON } else { far - near };
        let focal = 1.0 / (fov_y * 0.5).tan();

        Mat4::new(
            focal / aspect, 0.0, 0.0, 0.0,
            0.0, focal, 0.0, 0.0,
            0.0, 0.0, -(far + near) / depth, -2.0 * far * near / depth,
            0.0, 0.0, -1.0, 0.0,
        )
    }

    fn look_at_gl(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
        Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
    }

    fn translation_part(&self) -> Vec3 {
        Vec3::new(self[(0, 3)], self[(1, 3)], self[(2, 3)])
    }

    fn basis_axis(&self, index: usize) -> Vec3 {
        Vec3::new(self[(0, index)], self[(1, index)], self[(2, index)])
    }

    fn inverse_or_identity(&self) -> Mat4 {
        self.try_inverse().unwrap_or_else(Mat4::identity)
    }
}
