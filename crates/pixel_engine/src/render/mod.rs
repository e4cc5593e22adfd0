//! # Rendering System
//!
//! Renderer-agnostic side of drawing the editor scene: the camera, the
//! identifiers of built-in meshes and shaders, the per-frame data handed to a
//! backend, and the backend trait itself. Shader compilation, buffers and
//! framebuffers belong to the backend implementation.

pub mod api;
pub mod primitives;
pub mod identifiers;
pub mod lighting;
pub mod grid;

pub use api::{RenderBackend, HeadlessBackend, RenderFrameData, DrawItem, LineBatch, LineVertex, RenderError};
pub use primitives::{Camera, CameraMovement, CameraSettings};
pub use identifiers::{ModelId, ShaderId};
pub use lighting::DirectionalLight;
