//! Renderable component for entities that can be drawn
//!
//! Besides what to draw, this component carries the entity's display name,
//! which is the key the editor uses for selection, lookup and persistence.

use crate::ecs::Component;
use crate::foundation::math::Vec3;
use crate::render::{ModelId, ShaderId};

/// Color given to freshly created entities
pub const DEFAULT_COLOR: [f32; 3] = [0.8, 0.8, 0.8];

/// Component for entities that can be rendered
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableComponent {
    /// Mesh to draw
    pub model: ModelId,

    /// Shader program to draw with
    pub shader: ShaderId,

    /// Entity name, unique by convention (not enforced)
    pub name: String,

    /// Object color
    pub color: Vec3,

    /// Whether this object is visible
    pub visible: bool,
}

impl RenderableComponent {
    /// Create a Phong-shaded renderable with the default color
    pub fn new(model: ModelId, name: impl Into<String>) -> Self {
        Self {
            model,
            shader: ShaderId::Phong,
            name: name.into(),
            color: Vec3::new(DEFAULT_COLOR[0], DEFAULT_COLOR[1], DEFAULT_COLOR[2]),
            visible: true,
        }
    }

    /// Check if this component should be rendered
    pub fn should_render(&self) -> bool {
        self.visible
    }
}

impl Component for RenderableComponent {}
