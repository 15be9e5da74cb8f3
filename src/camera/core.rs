use glam::{Mat4, Vec3};

use crate::shading::sprite::sprite_pixel_ratio;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view and projection matrices plus the
/// viewport the sprite pass sizes its quads against.
pub struct CameraUniform {
    /// World-to-view matrix.
    pub view: [[f32; 4]; 4],
    /// View-to-clip matrix.
    pub projection: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Viewport size in physical pixels.
    pub viewport: [f32; 2],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Physical pixels per sprite pixel.
    pub pixel_ratio: f32,
}

impl Camera {
    /// Build the world-to-view matrix.
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Build the projection matrix.
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Combined view-projection matrix.
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity matrices.
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            viewport: [1.0, 1.0],
            fovy: 45.0,
            pixel_ratio: 1.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view = camera.build_view().to_cols_array_2d();
        self.projection = camera.build_projection().to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.aspect = camera.aspect;
        self.fovy = camera.fovy;
    }

    /// Size sprites for a display with `scale_factor`.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.pixel_ratio = sprite_pixel_ratio(scale_factor);
    }

    /// Record the viewport size in physical pixels.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport = [width.max(1) as f32, height.max(1) as f32];
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    fn camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, 6.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.5,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    #[test]
    fn uniform_layout_matches_wgsl() {
        assert_eq!(size_of::<CameraUniform>(), 160);
    }

    #[test]
    fn target_lies_on_negative_view_z() {
        let view = camera().build_view();
        let p = view * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((p.z + 6.0).abs() < 1e-5);
        assert!(p.x.abs() < 1e-5 && p.y.abs() < 1e-5);
    }

    #[test]
    fn target_projects_inside_depth_range() {
        let clip = camera().build_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth));
    }

    #[test]
    fn update_copies_camera_state() {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera());
        assert_eq!(uniform.position, [0.0, 0.0, 6.0]);
        assert_eq!(uniform.aspect, 1.5);
        assert_eq!(uniform.view, camera().build_view().to_cols_array_2d());
    }

    #[test]
    fn high_density_displays_enlarge_sprites() {
        let mut uniform = CameraUniform::new();
        assert_eq!(uniform.pixel_ratio, 1.0);
        uniform.set_scale_factor(2.0);
        assert_eq!(uniform.pixel_ratio, 1.0);
        uniform.set_scale_factor(3.0);
        assert!((uniform.pixel_ratio - 1.5).abs() < 1e-6);
    }

    #[test]
    fn viewport_never_zero() {
        let mut uniform = CameraUniform::new();
        uniform.set_viewport(0, 720);
        assert_eq!(uniform.viewport, [1.0, 720.0]);
    }
}
