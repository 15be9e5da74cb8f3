use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use wgpu::util::DeviceExt;

use crate::{
    camera::core::{Camera, CameraUniform},
    gpu::render_context::RenderContext,
    options::CameraOptions,
};

/// Keeps the polar angle off the poles so `look_at` has a defined up.
const POLAR_EPSILON: f32 = 1e-6;
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 500.0;

/// Orbit state around a target point, in spherical coordinates.
///
/// Azimuth is measured around +Y from +Z, polar from +Y. Drag input
/// accumulates into a pending delta that [`OrbitState::update`] applies a
/// fraction of each frame while damping is on.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitState {
    /// Point the camera orbits and looks at.
    pub target: Vec3,
    /// Eye-to-target distance.
    pub distance: f32,
    azimuth: f32,
    polar: f32,
    pending: Vec2,

    /// Rotation sensitivity. 1.0 turns a full circle per viewport height
    /// of horizontal drag.
    pub rotate_speed: f32,
    /// Whether [`OrbitState::zoom`] has any effect.
    pub enable_zoom: bool,
    /// Whether [`OrbitState::pan`] has any effect.
    pub enable_pan: bool,
    /// Zoom sensitivity per scroll line.
    pub zoom_speed: f32,
    /// Pan sensitivity multiplier.
    pub pan_speed: f32,
    /// Whether rotation eases out over several frames.
    pub enable_damping: bool,
    /// Fraction of the pending rotation applied per frame when damping.
    pub damping_factor: f32,
}

impl OrbitState {
    /// Orbit looking at the origin from `+Z` at the configured distance.
    pub fn new(options: &CameraOptions) -> Self {
        Self {
            target: Vec3::ZERO,
            distance: options.distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            azimuth: 0.0,
            polar: PI / 2.0,
            pending: Vec2::ZERO,
            rotate_speed: options.rotate_speed,
            enable_zoom: options.enable_zoom,
            enable_pan: options.enable_pan,
            zoom_speed: options.zoom_speed,
            pan_speed: options.pan_speed,
            enable_damping: true,
            damping_factor: 0.05,
        }
    }

    /// Queue a rotation from a pointer drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let scale = TAU * self.rotate_speed / viewport_height.max(1.0);
        self.pending -= delta * scale;
    }

    /// Scale the orbit distance by a scroll amount in lines. No-op when zoom
    /// is disabled.
    pub fn zoom(&mut self, scroll: f32) {
        if !self.enable_zoom {
            return;
        }
        self.distance = (self.distance * (1.0 - scroll * self.zoom_speed))
            .clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Move the target in the view plane by a pointer drag of `delta`
    /// pixels. No-op when pan is disabled.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32, fovy_degrees: f32) {
        if !self.enable_pan {
            return;
        }
        let world_per_pixel = 2.0
            * self.distance
            * (fovy_degrees.to_radians() / 2.0).tan()
            / viewport_height.max(1.0);
        let forward = (self.target - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        self.target += (right * -delta.x + up * delta.y)
            * world_per_pixel
            * self.pan_speed;
    }

    /// Apply pending rotation. Returns `true` while the orbit is still
    /// moving.
    pub fn update(&mut self) -> bool {
        if self.pending == Vec2::ZERO {
            return false;
        }
        let step = if self.enable_damping {
            self.pending * self.damping_factor
        } else {
            self.pending
        };
        self.azimuth = (self.azimuth + step.x).rem_euclid(TAU);
        self.polar = (self.polar + step.y)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.pending -= step;
        if self.pending.length_squared() < 1e-10 {
            self.pending = Vec2::ZERO;
        }
        true
    }

    /// Eye position in world space.
    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + Vec3::new(
                sin_polar * sin_azimuth,
                cos_polar,
                sin_polar * cos_azimuth,
            ) * self.distance
    }

    /// Azimuth angle in radians, in `[0, 2π)`.
    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// Polar angle in radians, in `(0, π)`.
    pub fn polar(&self) -> f32 {
        self.polar
    }
}

/// Near and far planes that keep a sphere of `radius` around the target in
/// view from `distance`, never tighter than the configured planes.
pub fn clip_planes_for(
    distance: f32,
    radius: f32,
    options: &CameraOptions,
) -> (f32, f32) {
    let znear = options.znear.max(1e-3);
    let zfar = options.zfar.max(distance + radius * 2.0);
    (znear, zfar)
}

/// Orbit camera owning the GPU uniform and bind group.
pub struct CameraController {
    /// Spherical orbit state driven by input.
    pub orbit: OrbitState,
    /// Current camera, rebuilt from `orbit` each update.
    pub camera: Camera,
    /// CPU copy of the uniform last written to `buffer`.
    pub uniform: CameraUniform,
    /// Camera uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for the camera uniform (group 0).
    pub layout: wgpu::BindGroupLayout,
    /// Bind group over `buffer`.
    pub bind_group: wgpu::BindGroup,
    options: CameraOptions,
    frame_radius: f32,
}

impl CameraController {
    /// Create the camera and its GPU resources from `options`.
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let orbit = OrbitState::new(options);
        let (width, height) = context.size();

        let camera = Camera {
            eye: orbit.eye(),
            target: orbit.target,
            up: Vec3::Y,
            aspect: width as f32 / height.max(1) as f32,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);
        uniform.set_viewport(width, height);

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context.device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("Camera Bind Group"),
            });

        Self {
            orbit,
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
            options: options.clone(),
            frame_radius: 0.0,
        }
    }

    /// Replace the control settings, keeping the current orbit position.
    pub fn set_options(&mut self, options: &CameraOptions) {
        self.orbit.rotate_speed = options.rotate_speed;
        self.orbit.enable_zoom = options.enable_zoom;
        self.orbit.enable_pan = options.enable_pan;
        self.orbit.zoom_speed = options.zoom_speed;
        self.orbit.pan_speed = options.pan_speed;
        self.camera.fovy = options.fovy;
        self.options = options.clone();
        self.sync_camera();
    }

    /// Track a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.camera.aspect = width as f32 / height as f32;
        self.uniform.set_viewport(width, height);
    }

    /// Size sprites for a display with `scale_factor`.
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.uniform.set_scale_factor(scale_factor);
    }

    /// Fit the clip planes to a cloud whose points stay within `radius` of
    /// the target.
    pub fn frame_radius(&mut self, radius: f32) {
        self.frame_radius = radius.max(0.0);
        self.sync_camera();
    }

    /// Rotate by a pointer drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.orbit.rotate(delta, self.uniform.viewport[1]);
    }

    /// Pan by a pointer drag of `delta` pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.orbit
            .pan(delta, self.uniform.viewport[1], self.camera.fovy);
        self.sync_camera();
    }

    /// Zoom by a scroll amount in lines.
    pub fn zoom(&mut self, scroll: f32) {
        self.orbit.zoom(scroll);
        self.sync_camera();
    }

    /// Advance orbit damping by one frame.
    pub fn update(&mut self) {
        if self.orbit.update() {
            self.sync_camera();
        }
    }

    /// Write the current camera state to the uniform buffer.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }

    fn sync_camera(&mut self) {
        self.camera.eye = self.orbit.eye();
        self.camera.target = self.orbit.target;
        let (znear, zfar) = clip_planes_for(
            self.orbit.distance,
            self.frame_radius,
            &self.options,
        );
        self.camera.znear = znear;
        self.camera.zfar = zfar;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orbit() -> OrbitState {
        OrbitState::new(&CameraOptions::default())
    }

    #[test]
    fn starts_on_positive_z() {
        let eye = orbit().eye();
        assert!(eye.abs_diff_eq(Vec3::new(0.0, 0.0, 6.0), 1e-5));
    }

    #[test]
    fn zoom_disabled_is_noop() {
        let mut o = orbit();
        o.zoom(3.0);
        assert_eq!(o.distance, 6.0);
    }

    #[test]
    fn zoom_enabled_changes_distance() {
        let mut o = orbit();
        o.enable_zoom = true;
        o.zoom(1.0);
        assert!((o.distance - 5.4).abs() < 1e-5);
    }

    #[test]
    fn pan_disabled_is_noop() {
        let mut o = orbit();
        o.pan(Vec2::new(40.0, -10.0), 720.0, 45.0);
        assert_eq!(o.target, Vec3::ZERO);
    }

    #[test]
    fn pan_enabled_moves_target_in_view_plane() {
        let mut o = orbit();
        o.enable_pan = true;
        o.pan(Vec2::new(40.0, 0.0), 720.0, 45.0);
        assert!(o.target.x < 0.0);
        assert!(o.target.z.abs() < 1e-5);
    }

    #[test]
    fn rotation_preserves_distance() {
        let mut o = orbit();
        o.rotate(Vec2::new(120.0, 45.0), 720.0);
        for _ in 0..200 {
            let _ = o.update();
            assert!(((o.eye() - o.target).length() - 6.0).abs() < 1e-4);
        }
    }

    #[test]
    fn undamped_rotation_applies_at_once() {
        let mut o = orbit();
        o.enable_damping = false;
        o.rotate(Vec2::new(-180.0, 0.0), 720.0);
        assert!(o.update());
        // a quarter viewport height at speed 1 is a quarter turn
        assert!((o.azimuth() - TAU / 4.0).abs() < 1e-5);
        assert!(!o.update());
    }

    #[test]
    fn damped_rotation_converges_to_full_delta() {
        let mut o = orbit();
        o.rotate(Vec2::new(-180.0, 0.0), 720.0);
        let mut frames = 0;
        while o.update() {
            frames += 1;
            assert!(frames < 10_000);
        }
        assert!(frames > 1);
        assert!((o.azimuth() - TAU / 4.0).abs() < 1e-3);
    }

    #[test]
    fn polar_angle_stays_off_the_poles() {
        let mut o = orbit();
        o.enable_damping = false;
        o.rotate(Vec2::new(0.0, 10_000.0), 720.0);
        let _ = o.update();
        assert!(o.polar() > 0.0);
        assert!(o.eye().is_finite());
        o.rotate(Vec2::new(0.0, -100_000.0), 720.0);
        let _ = o.update();
        assert!(o.polar() < PI);
    }

    #[test]
    fn clip_planes_cover_cloud() {
        let options = CameraOptions::default();
        let (near, far) = clip_planes_for(6.0, 3.0, &options);
        assert_eq!(near, 0.1);
        assert_eq!(far, 100.0);
        let (_, far) = clip_planes_for(400.0, 3.0, &options);
        assert!(far >= 406.0);
    }
}
