//! Input handling for ParticleCloudEngine

use super::ParticleCloudEngine;
use crate::camera::{input::InputEvent, processor::CameraCommand};

impl ParticleCloudEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Left-drag orbits the camera, shift+left-drag or right-drag pans when
    /// pan is enabled, and scrolling zooms when zoom is enabled.
    pub fn handle_input(&mut self, event: InputEvent) {
        let Some(command) = self.input.handle_event(event) else {
            return;
        };
        match command {
            CameraCommand::Rotate { delta } => self.camera_controller.rotate(delta),
            CameraCommand::Pan { delta } => self.camera_controller.pan(delta),
            CameraCommand::Zoom { delta } => self.camera_controller.zoom(delta),
        }
    }

    /// Release any held drag without waiting for the button-up event.
    pub fn release_mouse_state(&mut self) {
        self.input.release_mouse_state();
    }
}
