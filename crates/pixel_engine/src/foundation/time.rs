//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (should be called once per frame) and return the delta in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Frame statistics sampled once per second for the FPS overlay
///
/// Frames are counted until a full second of frame time has accumulated; the
/// published `ms_per_frame`/`fps` pair only changes at that boundary so the
/// overlay text stays readable.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    accumulated: f32,
    frames: u32,
    ms_per_frame: f32,
    fps: f32,
}

impl FrameStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame of `delta_time` seconds
    pub fn record(&mut self, delta_time: f32) {
        self.accumulated += delta_time;
        self.frames += 1;

        if self.accumulated >= 1.0 {
            #[allow(clippy::cast_precision_loss)]
            let frames = self.frames as f32;
            self.ms_per_frame = self.accumulated * 1000.0 / frames;
            self.fps = frames / self.accumulated;
            log::trace!("{:.3} ms/frame ({:.1} FPS)", self.ms_per_frame, self.fps);
            self.accumulated = 0.0;
            self.frames = 0;
        }
    }

    /// Average milliseconds per frame over the last full second
    pub fn ms_per_frame(&self) -> f32 {
        self.ms_per_frame
    }

    /// Frames per second over the last full second
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Overlay line in the form `16.667 ms/frame (60.0 FPS)`
    pub fn overlay_text(&self) -> String {
        format!("{:.3} ms/frame ({:.1} FPS)", self.ms_per_frame, self.fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stats_publish_after_one_second() {
        let mut stats = FrameStats::new();
        for _ in 0..3 {
            stats.record(0.25);
        }
        assert_eq!(stats.fps(), 0.0);

        stats.record(0.25);
        assert_relative_eq!(stats.fps(), 4.0, epsilon = 1e-4);
        assert_relative_eq!(stats.ms_per_frame(), 250.0, epsilon = 1e-3);
        assert_eq!(stats.overlay_text(), "250.000 ms/frame (4.0 FPS)");
    }

    #[test]
    fn test_timer_counts_frames() {
        let mut timer = Timer::new();
        let dt = timer.tick();
        assert!(dt >= 0.0);
        assert_eq!(timer.frame_count(), 1);
        assert!(timer.total_time() >= dt);
    }
}
