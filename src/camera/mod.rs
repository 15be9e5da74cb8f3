//! Camera system for orbiting the particle cloud.
//!
//! Provides a damped orbit camera with optional zoom and pan, its GPU
//! uniform, and platform-agnostic input events.

/// Orbit camera controller managing rotation, pan, zoom, and GPU resources.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Platform-agnostic input events and their winit translation.
pub mod input;
/// Pointer state machine producing camera commands.
pub mod processor;

pub use controller::{CameraController, OrbitState};
pub use input::{InputEvent, MouseButton};
pub use processor::{CameraCommand, InputProcessor};
