//! Render passes.
//!
//! The particle cloud is the only pass: instanced point sprites blended
//! additively onto the cleared surface.

/// Point-sprite pipeline, buffers and draw.
pub mod particle_cloud;
pub(crate) mod pipeline_util;

pub use particle_cloud::{CloudUniform, ParticleCloudRenderer};
