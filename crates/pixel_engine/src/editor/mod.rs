//! Editor session
//!
//! [`EditorContext`] holds everything a running editor needs: camera, scene,
//! picking, selection, overlays and input state. The windowing layer forwards
//! raw events to it and renders whatever [`EditorContext::build_frame`]
//! returns.

mod commands;
mod context;
mod display;

pub use commands::EditorCommand;
pub use context::EditorContext;
pub use display::DisplayFlags;
