//! Rays and screen-to-world ray generation

use crate::foundation::math::{Mat4Ext, Vec3, Vec4};
use crate::render::Camera;

/// A ray for ray casting and picking
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (unit length)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Converts window pixels into world-space rays through a [`Camera`]
pub struct RayGenerator;

impl RayGenerator {
    /// Ray from the camera through pixel `(x, y)` of its viewport
    ///
    /// 1. `ndc = (2x/w - 1, -(2y/h - 1))`
    /// 2. `eye = P⁻¹ · (ndc, -1, 1)`, kept as the direction `(eye.x, eye.y, -1, 0)`
    /// 3. `world = V⁻¹ · eye_direction`
    /// 4. the ray starts at the camera position along `normalize(world.xyz)`
    ///
    /// Singular matrices are not detected; they are replaced by identity and
    /// the resulting direction is meaningless.
    #[allow(clippy::cast_precision_loss)]
    pub fn screen_to_world(x: f32, y: f32, camera: &Camera) -> Ray {
        let (width, height) = camera.viewport();
        let ndc_x = 2.0 * x / width as f32 - 1.0;
        let ndc_y = -(2.0 * y / height as f32 - 1.0);

        let clip = Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let eye = camera.projection_matrix().inverse_or_identity() * clip;
        let eye_direction = Vec4::new(eye.x, eye.y, -1.0, 0.0);

        let world = camera.view_matrix().inverse_or_identity() * eye_direction;

        Ray {
            origin: camera.position(),
            direction: world.xyz().normalize(),
        }
    }
}
