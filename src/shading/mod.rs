//! CPU reference of the per-vertex and per-pixel shading math.
//!
//! `assets/shaders/raster/particle_cloud.wgsl` is what actually runs; the
//! functions here compute the same quantities with the same constants so the
//! behavior can be checked without a GPU, and so the engine can reason about
//! how far the animated cloud can reach.

/// Per-vertex noise displacement and color-mix factor.
pub mod displacement;
/// 3D simplex noise.
pub mod noise;
/// Point sprite size and circular falloff.
pub mod sprite;

pub use displacement::{color_mix, displace, displacement, DisplacedVertex};
pub use noise::simplex3;
pub use sprite::{point_size, shade_fragment, sprite_alpha};
