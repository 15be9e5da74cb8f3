use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(inline)]
#[serde(default)]
/// Camera projection and orbit-control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Initial distance from the eye to the orbit target.
    pub distance: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Rotation sensitivity multiplier.
    pub rotate_speed: f32,
    /// Whether the scroll wheel changes the orbit distance.
    pub enable_zoom: bool,
    /// Whether dragging with shift held moves the orbit target.
    pub enable_pan: bool,
    /// Zoom sensitivity multiplier.
    pub zoom_speed: f32,
    /// Pan sensitivity multiplier.
    pub pan_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            distance: 6.0,
            znear: 0.1,
            zfar: 100.0,
            rotate_speed: 1.0,
            enable_zoom: false,
            enable_pan: false,
            zoom_speed: 0.1,
            pan_speed: 0.5,
        }
    }
}
