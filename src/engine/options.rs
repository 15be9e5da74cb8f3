//! Options methods for ParticleCloudEngine

use super::ParticleCloudEngine;
use crate::options::Options;

impl ParticleCloudEngine {
    /// The options the engine currently runs with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options and apply all changes to subsystems.
    pub fn set_options(&mut self, new: Options) {
        let count = new.cloud.effective_count();
        self.options = new;
        self.apply_options();
        self.set_count(count);
    }

    /// Push current camera and display values to the controller, the clear
    /// color and the frame limiter.
    fn apply_options(&mut self) {
        self.camera_controller.set_options(&self.options.camera);
        self.clear_color = self.options.display.clear_color();
        self.frame_timing
            .set_target_fps(self.options.display.target_fps);
    }
}
