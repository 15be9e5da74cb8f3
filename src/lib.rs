// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Test code may unwrap and panic freely
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! Animated GPU particle cloud built on wgpu.
//!
//! Glowcloud renders a few tens of thousands of point sprites laid out on a
//! spherical shell, pushes them around with 3D simplex noise every frame and
//! shades each sprite as a soft additive dot whose color drifts from cool
//! blue to warm orange across the cloud.
//!
//! # Key entry points
//!
//! - [`cloud::PointSet`] - the golden-angle spiral point layout
//! - [`cloud::FrameClock`] - the per-frame time scalar fed to the shader
//! - [`engine::ParticleCloudEngine`] - GPU resources and the frame loop body
//! - [`options::Options`] - TOML-backed configuration (count, camera,
//!   display)
//! - [`shading`] - CPU reference of the displacement and sprite math the
//!   WGSL shader runs
//!
//! # Architecture
//!
//! The point layout is generated once on the CPU and uploaded as two
//! per-instance vertex buffers (position, scale). Everything that moves is
//! computed on the GPU from those static buffers plus a single time uniform,
//! so a frame costs one uniform write and one instanced draw.

pub mod camera;
pub mod cloud;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod options;
pub mod renderer;
pub mod shading;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::ParticleCloudEngine;
pub use error::CloudError;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
