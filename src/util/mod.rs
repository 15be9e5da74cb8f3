//! Small shared utilities.

/// Frame pacing and smoothed FPS.
pub mod frame_timing;

pub use frame_timing::FrameTiming;
