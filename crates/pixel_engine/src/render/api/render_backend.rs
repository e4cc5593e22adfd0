//! Backend abstraction traits for the rendering system
//!
//! GPU resource management lives outside this crate. A backend receives one
//! [`RenderFrameData`] per frame and turns it into draw calls.

use super::RenderFrameData;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

/// Errors reported by rendering backends
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// A rendering operation failed during execution
    #[error("Rendering failed: {0}")]
    RenderingFailed(String),
}

/// Main rendering backend trait
pub trait RenderBackend {
    /// Prepare for a new frame (clear, bind default targets)
    fn begin_frame(&mut self, frame: &RenderFrameData) -> BackendResult<()>;

    /// Record every draw in the frame
    fn submit(&mut self, frame: &RenderFrameData) -> BackendResult<()>;

    /// Finish the frame
    fn end_frame(&mut self) -> BackendResult<()>;

    /// Run the full begin/submit/end sequence
    fn render_frame(&mut self, frame: &RenderFrameData) -> BackendResult<()> {
        self.begin_frame(frame)?;
        self.submit(frame)?;
        self.end_frame()
    }
}

/// Backend that records what it was asked to draw without touching a GPU
///
/// Used when no graphics context is available and by tests.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    frames: u64,
    draw_calls: usize,
    line_segments: usize,
    uploaded_bytes: usize,
    in_frame: bool,
    last_overlay: Vec<String>,
}

impl HeadlessBackend {
    /// Create a backend with zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed frames
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Entity draws recorded by the last frame
    pub fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    /// Line segments (grid plus debug) recorded by the last frame
    pub fn line_segments(&self) -> usize {
        self.line_segments
    }

    /// Line vertex bytes uploaded by the last frame
    pub fn uploaded_bytes(&self) -> usize {
        self.uploaded_bytes
    }

    /// Overlay text of the last frame
    pub fn last_overlay(&self) -> &[String] {
        &self.last_overlay
    }
}

impl RenderBackend for HeadlessBackend {
    fn begin_frame(&mut self, _frame: &RenderFrameData) -> BackendResult<()> {
        if self.in_frame {
            return Err(RenderError::RenderingFailed("begin_frame called twice".to_string()));
        }
        self.in_frame = true;
        self.draw_calls = 0;
        self.line_segments = 0;
        self.uploaded_bytes = 0;
        Ok(())
    }

    fn submit(&mut self, frame: &RenderFrameData) -> BackendResult<()> {
        self.draw_calls += frame.draws.len();
        for batch in frame.grid.iter().chain(frame.debug_lines.iter()) {
            self.line_segments += batch.segment_count();
            self.uploaded_bytes += batch.as_bytes().len();
        }
        self.last_overlay.clone_from(&frame.overlay);
        Ok(())
    }

    fn end_frame(&mut self) -> BackendResult<()> {
        if !self.in_frame {
            return Err(RenderError::RenderingFailed("end_frame without begin_frame".to_string()));
        }
        self.in_frame = false;
        self.frames += 1;
        log::trace!(
            "Headless frame {} recorded {} draws and {} line bytes",
            self.frames,
            self.draw_calls,
            self.uploaded_bytes
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4, Vec3};
    use crate::render::api::{LineBatch, LineVertex};
    use crate::render::identifiers::ShaderId;
    use crate::render::lighting::DirectionalLight;

    fn frame_with_lines(segments: usize) -> RenderFrameData {
        let vertex = LineVertex::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        RenderFrameData {
            view: Mat4::identity(),
            projection: Mat4::identity(),
            camera_position: Vec3::zeros(),
            clear_color: [0.0, 0.0, 0.0, 1.0],
            light: DirectionalLight::default(),
            draws: Vec::new(),
            grid: Some(LineBatch {
                shader: ShaderId::Grid,
                model_matrix: Mat4::identity(),
                vertices: vec![vertex; segments * 2],
            }),
            debug_lines: None,
            overlay: vec!["FPS: 60".to_string()],
        }
    }

    #[test]
    fn test_uploaded_bytes_follow_vertex_layout() {
        let mut backend = HeadlessBackend::new();
        backend.render_frame(&frame_with_lines(3)).expect("frame renders");

        assert_eq!(backend.frames(), 1);
        assert_eq!(backend.line_segments(), 3);
        assert_eq!(backend.uploaded_bytes(), 3 * 2 * std::mem::size_of::<LineVertex>());
        assert_eq!(std::mem::size_of::<LineVertex>(), 24);
        assert_eq!(backend.last_overlay(), ["FPS: 60".to_string()]);
    }

    #[test]
    fn test_counters_reset_each_frame() {
        let mut backend = HeadlessBackend::new();
        backend.render_frame(&frame_with_lines(5)).expect("frame renders");
        backend.render_frame(&frame_with_lines(1)).expect("frame renders");
        assert_eq!(backend.frames(), 2);
        assert_eq!(backend.uploaded_bytes(), 2 * 24);
    }

    #[test]
    fn test_unbalanced_frame_calls_fail() {
        let mut backend = HeadlessBackend::new();
        assert!(backend.end_frame().is_err());
        let frame = frame_with_lines(0);
        backend.begin_frame(&frame).expect("first begin succeeds");
        assert!(backend.begin_frame(&frame).is_err());
    }
}
