use web_time::{Duration, Instant};

/// Seconds between debug FPS log lines.
const LOG_INTERVAL: Duration = Duration::from_secs(5);

/// Frame timing with FPS calculation and optional frame limiting
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Last time the FPS was logged
    last_log: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    pub fn new(target_fps: u32) -> Self {
        let now = Instant::now();
        Self {
            target_fps,
            min_frame_duration: min_frame_duration(target_fps),
            last_frame: now,
            last_log: now,
            smoothed_fps: 60.0, // Start with reasonable default
            smoothing: 0.05,
        }
    }

    /// Change the FPS target (0 = unlimited).
    pub fn set_target_fps(&mut self, target_fps: u32) {
        self.target_fps = target_fps;
        self.min_frame_duration = min_frame_duration(target_fps);
    }

    /// Call at the start of each frame. Returns true if enough time has
    /// passed to render.
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed.as_secs_f32());

        if now.duration_since(self.last_log) >= LOG_INTERVAL {
            log::debug!("{:.1} fps", self.smoothed_fps);
            self.last_log = now;
        }
    }

    /// Fold one frame duration (seconds) into the smoothed FPS.
    fn record(&mut self, frame_time: f32) {
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            // Exponential moving average for smooth display
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

fn min_frame_duration(target_fps: u32) -> Duration {
    if target_fps > 0 {
        Duration::from_secs_f64(1.0 / f64::from(target_fps))
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_renders() {
        assert!(FrameTiming::new(0).should_render());
    }

    #[test]
    fn capped_rate_sets_min_duration() {
        assert_eq!(min_frame_duration(50), Duration::from_millis(20));
        let mut timing = FrameTiming::new(0);
        timing.set_target_fps(1);
        assert!(!timing.should_render());
    }

    #[test]
    fn fps_moves_toward_frame_rate() {
        let mut timing = FrameTiming::new(0);
        for _ in 0..500 {
            timing.record(1.0 / 120.0);
        }
        assert!((timing.fps() - 120.0).abs() < 1.0);
    }

    #[test]
    fn zero_length_frames_are_ignored() {
        let mut timing = FrameTiming::new(0);
        timing.record(0.0);
        assert_eq!(timing.fps(), 60.0);
    }
}
