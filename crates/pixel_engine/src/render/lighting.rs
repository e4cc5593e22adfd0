//! Lighting parameters

use crate::foundation::math::Vec3;

/// Single directional light with Phong ambient/specular strengths
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Direction the light travels in (not necessarily normalized)
    pub direction: Vec3,
    /// Light color
    pub color: Vec3,
    /// Ambient strength
    pub ambient: f32,
    /// Specular strength
    pub specular: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.2, -1.0, -0.3),
            color: Vec3::new(1.0, 1.0, 1.0),
            ambient: 0.3,
            specular: 0.2,
        }
    }
}
