//! Public rendering API
//!
//! Frame data produced by the editor and the backend trait that consumes it.

pub mod render_backend;
pub mod frame_data;

// Re-export commonly used types
pub use render_backend::{RenderBackend, HeadlessBackend, BackendResult, RenderError};
pub use frame_data::{RenderFrameData, DrawItem, LineBatch, LineVertex};
