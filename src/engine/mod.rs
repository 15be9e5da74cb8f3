//! The particle cloud engine: GPU context, camera, point buffers and the
//! per-frame clock behind one owner.
//!
//! A host (the bundled viewer, or any winit/wgpu application) creates the
//! engine once for a window surface, then calls [`ParticleCloudEngine::update`]
//! and [`ParticleCloudEngine::render`] every frame.

mod input;
mod options;

use crate::{
    camera::{controller::CameraController, processor::InputProcessor},
    cloud::{CloudMaterial, FrameClock, PointSet},
    error::CloudError,
    gpu::{render_context::RenderContext, shader_composer::ShaderComposer},
    options::{limit_count, CloudOptions, Options},
    renderer::ParticleCloudRenderer,
    shading::displacement::MAX_DISPLACEMENT,
    util::frame_timing::FrameTiming,
};

/// Radius around the origin that every displaced point stays within.
#[must_use]
pub fn cloud_extent(points: &PointSet) -> f32 {
    if points.is_empty() {
        return 0.0;
    }
    points.bounding_radius() + MAX_DISPLACEMENT
}

/// Owns every GPU resource of the particle cloud and the time that drives
/// its animation.
pub struct ParticleCloudEngine {
    context: RenderContext,
    camera_controller: CameraController,
    renderer: ParticleCloudRenderer,
    material: CloudMaterial,
    points: PointSet,
    clock: FrameClock,
    options: Options,
    clear_color: wgpu::Color,
    frame_timing: FrameTiming,
    input: InputProcessor,
}

impl ParticleCloudEngine {
    /// Create an engine with default options and
    /// [`CloudOptions::ENGINE_DEFAULT_COUNT`] points.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Gpu`] if no usable device or surface is
    /// available and [`CloudError::Shader`] if the particle shader fails to
    /// compose.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
    ) -> Result<Self, CloudError> {
        let mut options = Options::default();
        options.cloud.count = CloudOptions::ENGINE_DEFAULT_COUNT;
        Self::new_with_options(window, size, options).await
    }

    /// Create an engine configured by `options`.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Gpu`] if no usable device or surface is
    /// available and [`CloudError::Shader`] if the particle shader fails to
    /// compose.
    pub async fn new_with_options(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, CloudError> {
        let context = RenderContext::new(window, size).await?;
        let mut shader_composer = ShaderComposer::new()?;
        let material = CloudMaterial::GLOW;

        let mut camera_controller =
            CameraController::new(&context, &options.camera);
        let mut renderer = ParticleCloudRenderer::new(
            &context,
            &camera_controller.layout,
            &material,
            &mut shader_composer,
        )?;

        let points = PointSet::generate(options.cloud.effective_count());
        renderer.upload(&context.device, &context.queue, &points);
        camera_controller.frame_radius(cloud_extent(&points));

        log::info!(
            "particle cloud ready: {} points, extent {:.2}",
            points.len(),
            cloud_extent(&points)
        );

        Ok(Self {
            context,
            camera_controller,
            renderer,
            material,
            points,
            clock: FrameClock::new(),
            clear_color: options.display.clear_color(),
            frame_timing: FrameTiming::new(options.display.target_fps),
            options,
            input: InputProcessor::new(),
        })
    }

    /// Regenerate the cloud with `count` points, capped at
    /// [`MAX_COUNT`](crate::options::MAX_COUNT). Setting the current count
    /// keeps the existing layout.
    pub fn set_count(&mut self, count: usize) {
        let count = limit_count(count);
        if count == self.points.len() {
            return;
        }
        self.points = PointSet::generate(count);
        self.renderer
            .upload(&self.context.device, &self.context.queue, &self.points);
        self.camera_controller
            .frame_radius(cloud_extent(&self.points));
        self.options.cloud.count = i64::try_from(count).unwrap_or(i64::MAX);
        log::info!("particle count set to {count}");
    }

    /// Number of points in the cloud.
    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// The current point layout.
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// The animation clock.
    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// The material the cloud is drawn with.
    pub fn material(&self) -> &CloudMaterial {
        &self.material
    }

    /// The orbit camera.
    pub fn camera(&self) -> &CameraController {
        &self.camera_controller
    }

    /// Smoothed frames per second.
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Advance the animation by `dt` seconds and step camera damping.
    pub fn update(&mut self, dt: f32) {
        self.clock.advance(dt);
        self.camera_controller.update();
    }

    /// Draw one frame: publish camera and time, then clear and draw the
    /// sprites.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next swapchain texture cannot
    /// be acquired. Callers reconfigure via [`Self::resize`] on `Lost` or
    /// `Outdated`.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        self.camera_controller.update_gpu(&self.context.queue);
        self.renderer.update(&self.context.queue, &self.clock);

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();

        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Particle Cloud Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(self.clear_color),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });
            self.renderer
                .draw(&mut pass, &self.camera_controller.bind_group);
        }

        self.context.submit(encoder);
        frame.present();
        self.frame_timing.end_frame();

        Ok(())
    }

    /// Track the window's scale factor (physical pixels per logical pixel).
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.camera_controller.set_scale_factor(scale_factor);
    }

    /// Reconfigure the surface and camera for a new window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.context.resize(width, height);
            self.camera_controller.resize(width, height);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn empty_cloud_has_no_extent() {
        assert_eq!(cloud_extent(&PointSet::default()), 0.0);
    }

    #[test]
    fn extent_covers_displaced_points() {
        let mut rng = StdRng::seed_from_u64(11);
        let points = PointSet::generate_with(2_000, &mut rng);
        let extent = cloud_extent(&points);
        assert!(extent <= 2.2 + MAX_DISPLACEMENT + 1e-4);

        let mut clock = FrameClock::new();
        for _ in 0..3 {
            for (position, _) in points.iter() {
                let v = crate::shading::displace(position, &clock);
                assert!(v.position.length() <= extent + 1e-4);
            }
            clock.advance(7.3);
        }
    }
}
