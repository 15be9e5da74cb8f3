//! Per-vertex stage: noise displacement and color-mix factor.

use glam::Vec3;

use super::noise::simplex3;
use crate::cloud::FrameClock;

/// Spatial frequency of the radial noise field.
pub const RADIAL_FREQUENCY: f32 = 1.2;
/// Speed at which the radial field drifts along +Z, per second.
pub const RADIAL_DRIFT: f32 = 0.08;
/// Length of the radial term at full noise.
pub const RADIAL_AMPLITUDE: f32 = 0.4;

/// Per-axis offsets decorrelating the three turbulence samples.
pub const TURBULENCE_OFFSETS: [f32; 3] = [0.0, 23.4, 87.1];
/// Speed at which the turbulence field drifts along the diagonal, per second.
pub const TURBULENCE_DRIFT: f32 = 0.05;
/// Per-axis turbulence scale.
pub const TURBULENCE_AMPLITUDE: f32 = 0.12;

/// Upper bound on the length of [`displacement`], assuming unit noise.
pub const MAX_DISPLACEMENT: f32 =
    RADIAL_AMPLITUDE + TURBULENCE_AMPLITUDE * 1.732_050_8;

/// A point after the vertex stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacedVertex {
    /// World-space position after displacement.
    pub position: Vec3,
    /// Cool-to-warm blend factor in `[0, 1]`.
    pub mix: f32,
}

/// Offset added to `position` at `time`: a radial push along the point's
/// direction from the origin plus a small three-axis turbulence.
#[must_use]
pub fn displacement(position: Vec3, time: f32) -> Vec3 {
    let n = simplex3(
        position * RADIAL_FREQUENCY + Vec3::new(0.0, 0.0, time * RADIAL_DRIFT),
    );
    let radial = position.normalize_or_zero() * n * RADIAL_AMPLITUDE;

    let drift = time * TURBULENCE_DRIFT;
    let [ox, oy, oz] = TURBULENCE_OFFSETS;
    let turbulence = Vec3::new(
        simplex3(position + (ox + drift)),
        simplex3(position + (oy + drift)),
        simplex3(position + (oz + drift)),
    );

    radial + turbulence * TURBULENCE_AMPLITUDE
}

/// Color-mix factor for a displaced position: world X mapped from
/// `[-1, 1]` to `[0, 1]` and clamped.
#[must_use]
pub fn color_mix(displaced: Vec3) -> f32 {
    (0.5 + 0.5 * displaced.x).clamp(0.0, 1.0)
}

/// Run the whole vertex stage for one point at the clock's current time.
#[must_use]
pub fn displace(position: Vec3, clock: &FrameClock) -> DisplacedVertex {
    let displaced = position + displacement(position, clock.time());
    DisplacedVertex {
        position: displaced,
        mix: color_mix(displaced),
    }
}
