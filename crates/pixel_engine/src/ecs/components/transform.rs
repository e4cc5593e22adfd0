//! Transform component for the ECS system
//!
//! Pose state of an entity (position, orientation, scale) plus the cached
//! world matrix built from it. The quaternion is the only stored rotation;
//! Euler angles for the inspector are derived from it on demand.
//!
//! Every mutator rebuilds the cached matrix from the full field set in
//! translate → rotate → scale order. The matrix is never composed onto its
//! previous value.

use crate::ecs::Component;
use crate::foundation::math::{Mat4, Quat, Vec3};

/// Euler angles closer than this to ±90° pitch are treated as gimbal lock
const GIMBAL_THRESHOLD: f32 = 0.999_999;

/// ECS Transform component
#[derive(Debug, Clone, PartialEq)]
pub struct TransformComponent {
    position: Vec3,
    orientation: Quat,
    scale: Vec3,
    world: Mat4,
    revision: u64,
}

impl Component for TransformComponent {}

impl Default for TransformComponent {
    fn default() -> Self {
        Self::from_parts(Vec3::zeros(), Quat::identity(), Vec3::new(1.0, 1.0, 1.0))
    }
}

impl TransformComponent {
    /// Create identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self::default().with_position(position)
    }

    /// Create from full transform specification
    pub fn from_parts(position: Vec3, orientation: Quat, scale: Vec3) -> Self {
        Self {
            position,
            orientation,
            scale,
            world: compose(&position, &orientation, &scale),
            revision: 0,
        }
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.set_position(position);
        self
    }

    /// Builder pattern: Set rotation from per-axis angles (radians)
    pub fn with_rotation_angles(mut self, angles: Vec3) -> Self {
        self.set_rotation_on_all_axis(angles);
        self
    }

    /// Builder pattern: Set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.set_scale(scale);
        self
    }

    /// World space position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Rotation quaternion
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    /// Per-axis scale factors
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Cached `T * R * S` world matrix
    pub fn world_matrix(&self) -> &Mat4 {
        &self.world
    }

    /// Counter bumped by every pose mutation
    ///
    /// Consumers holding a derived copy of the pose (the picking proxy) compare
    /// this against the revision they last synchronized to.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Move the entity
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.touch();
    }

    /// Rescale the entity
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.touch();
    }

    /// Set the orientation directly
    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
        self.touch();
    }

    /// Set the orientation from per-axis angles in radians
    ///
    /// The quaternion is composed as `qx * qy * qz`, so the resulting
    /// rotation matrix is `Rx * Ry * Rz`.
    pub fn set_rotation_on_all_axis(&mut self, angles: Vec3) {
        let qx = Quat::from_axis_angle(&Vec3::x_axis(), angles.x);
        let qy = Quat::from_axis_angle(&Vec3::y_axis(), angles.y);
        let qz = Quat::from_axis_angle(&Vec3::z_axis(), angles.z);
        self.orientation = qx * qy * qz;
        self.touch();
    }

    /// Per-axis angles (radians) reproducing the current orientation
    ///
    /// Inverse of [`set_rotation_on_all_axis`](Self::set_rotation_on_all_axis)
    /// for pitch (Y) in the open interval (-90°, 90°). At gimbal lock the Z
    /// angle is folded into X.
    pub fn rotation_angles(&self) -> Vec3 {
        let r = self.orientation.to_rotation_matrix();
        let m = r.matrix();
        let sin_y = m[(0, 2)].clamp(-1.0, 1.0);
        let y = sin_y.asin();

        if sin_y.abs() < GIMBAL_THRESHOLD {
            let x = (-m[(1, 2)]).atan2(m[(2, 2)]);
            let z = (-m[(0, 1)]).atan2(m[(0, 0)]);
            Vec3::new(x, y, z)
        } else if sin_y > 0.0 {
            Vec3::new(m[(1, 0)].atan2(m[(1, 1)]), y, 0.0)
        } else {
            Vec3::new((-m[(1, 0)]).atan2(m[(1, 1)]), y, 0.0)
        }
    }

    /// Rebuild the cached world matrix from the current fields
    ///
    /// Calling this repeatedly without changing the fields yields a
    /// bit-identical matrix.
    pub fn apply(&mut self) {
        self.world = compose(&self.position, &self.orientation, &self.scale);
    }

    fn touch(&mut self) {
        self.apply();
        self.revision = self.revision.wrapping_add(1);
    }
}

fn compose(position: &Vec3, orientation: &Quat, scale: &Vec3) -> Mat4 {
    Mat4::new_translation(position) * orientation.to_homogeneous() * Mat4::new_nonuniform_scaling(scale)
}
