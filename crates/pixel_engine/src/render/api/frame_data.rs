//! Frame Rendering Data Structures
//!
//! The editor builds one [`RenderFrameData`] per frame and hands it to a
//! [`RenderBackend`](super::RenderBackend). Everything in here is plain data;
//! uploading it to the GPU is the backend's business.

use crate::ecs::Entity;
use crate::foundation::math::{Mat4, Vec3};
use crate::render::identifiers::{ModelId, ShaderId};
use crate::render::lighting::DirectionalLight;
use bytemuck::{Pod, Zeroable};

/// Colored line-list vertex, laid out for direct upload
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    /// World or model space position
    pub position: [f32; 3],
    /// Linear RGB color
    pub color: [f32; 3],
}

impl LineVertex {
    /// Create a vertex
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self {
            position: [position.x, position.y, position.z],
            color: [color.x, color.y, color.z],
        }
    }
}

/// A list of line segments sharing one model matrix and shader
#[derive(Debug, Clone, PartialEq)]
pub struct LineBatch {
    /// Shader program to draw with
    pub shader: ShaderId,
    /// Model matrix applied to every vertex
    pub model_matrix: Mat4,
    /// Two vertices per segment
    pub vertices: Vec<LineVertex>,
}

impl LineBatch {
    /// Number of line segments in the batch
    pub fn segment_count(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Vertex data as uploaded to a vertex buffer
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// One entity draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    /// Source entity
    pub entity: Entity,
    /// Mesh to draw
    pub model: ModelId,
    /// Shader program to draw with
    pub shader: ShaderId,
    /// Entity world matrix
    pub model_matrix: Mat4,
    /// Object color
    pub color: Vec3,
    /// Whether the entity is the current selection
    pub selected: bool,
}

/// Complete frame rendering data
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrameData {
    /// Camera view matrix
    pub view: Mat4,
    /// Camera projection matrix
    pub projection: Mat4,
    /// Camera position, used for specular highlights
    pub camera_position: Vec3,
    /// Framebuffer clear color
    pub clear_color: [f32; 4],
    /// Scene light
    pub light: DirectionalLight,
    /// Entity draws in scene order
    pub draws: Vec<DrawItem>,
    /// Ground grid, when enabled
    pub grid: Option<LineBatch>,
    /// Physics proxy wireframes, when enabled
    pub debug_lines: Option<LineBatch>,
    /// Overlay text lines, top to bottom
    pub overlay: Vec<String>,
}
