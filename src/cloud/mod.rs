//! CPU-side state of the particle cloud.
//!
//! The point layout is generated here once per count change; the frame clock
//! and material constants are the only other inputs the GPU stage reads.

/// Frame clock driving the noise animation.
pub mod clock;
/// Golden-angle spiral point layout with random shell jitter.
pub mod distribution;
/// Fixed colors and blend configuration of the point sprites.
pub mod material;

pub use clock::FrameClock;
pub use distribution::PointSet;
pub use material::CloudMaterial;
