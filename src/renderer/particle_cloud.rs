//! Point-sprite pass for the particle cloud.
//!
//! Each point is one instance of a 6-vertex quad. Positions and scales are
//! two per-instance vertex buffers; the vertex stage displaces the point
//! with noise, projects it and expands the quad to the sprite size.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::{
    cloud::{CloudMaterial, FrameClock, PointSet},
    gpu::{
        dynamic_buffer::TypedBuffer,
        render_context::RenderContext,
        shader_composer::{ShaderComposer, ShaderError},
    },
    renderer::pipeline_util,
};

const SHADER_SOURCE: &str =
    include_str!("../../assets/shaders/raster/particle_cloud.wgsl");
const SHADER_PATH: &str = "raster/particle_cloud.wgsl";

/// Two triangles per sprite.
const VERTICES_PER_SPRITE: u32 = 6;

const POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x3];
const SCALE_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![1 => Float32];

/// Per-frame uniform of the cloud pass (group 1). Matches `CloudUniform` in
/// `particle_cloud.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CloudUniform {
    /// Cool color, RGB + unused.
    pub cool: [f32; 4],
    /// Warm color, RGB + unused.
    pub warm: [f32; 4],
    /// Animation time in seconds.
    pub time: f32,
    pub(crate) _pad: [f32; 3],
}

impl CloudUniform {
    /// Uniform for `material` at `time`.
    pub fn new(material: &CloudMaterial, time: f32) -> Self {
        let [cr, cg, cb] = material.cool;
        let [wr, wg, wb] = material.warm;
        Self {
            cool: [cr, cg, cb, 1.0],
            warm: [wr, wg, wb, 1.0],
            time,
            _pad: [0.0; 3],
        }
    }
}

/// Pipeline, point buffers and uniform of the particle cloud.
pub struct ParticleCloudRenderer {
    pipeline: wgpu::RenderPipeline,
    positions: TypedBuffer<[f32; 3]>,
    scales: TypedBuffer<f32>,
    uniform: CloudUniform,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    point_count: u32,
}

impl ParticleCloudRenderer {
    /// Build the pipeline against the camera layout (group 0).
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError`] if the particle shader fails to compose.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        material: &CloudMaterial,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, ShaderError> {
        let device = &context.device;

        // Placeholder element so the buffers are never zero-sized.
        let positions = TypedBuffer::new_with_data(
            device,
            "Cloud Position Buffer",
            &[[0.0f32; 3]],
            wgpu::BufferUsages::VERTEX,
        );
        let scales = TypedBuffer::new_with_data(
            device,
            "Cloud Scale Buffer",
            &[0.0f32],
            wgpu::BufferUsages::VERTEX,
        );

        let uniform = CloudUniform::new(material, 0.0);
        let uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Cloud Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Cloud Bind Group Layout"),
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
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("Cloud Bind Group"),
        });

        let pipeline = Self::create_pipeline(
            context,
            camera_layout,
            &bind_group_layout,
            material,
            shader_composer,
        )?;

        Ok(Self {
            pipeline,
            positions,
            scales,
            uniform,
            uniform_buffer,
            bind_group,
            point_count: 0,
        })
    }

    fn create_pipeline(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        cloud_layout: &wgpu::BindGroupLayout,
        material: &CloudMaterial,
        shader_composer: &mut ShaderComposer,
    ) -> Result<wgpu::RenderPipeline, ShaderError> {
        let shader = shader_composer.compose(
            &context.device,
            "Particle Cloud Shader",
            SHADER_SOURCE,
            SHADER_PATH,
        )?;

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Particle Cloud Pipeline Layout"),
                bind_group_layouts: &[camera_layout, cloud_layout],
                push_constant_ranges: &[],
            },
        );

        let vertex_buffers = [
            wgpu::VertexBufferLayout {
                array_stride: size_of::<[f32; 3]>()
                    as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &POSITION_ATTRIBUTES,
            },
            wgpu::VertexBufferLayout {
                array_stride: size_of::<f32>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &SCALE_ATTRIBUTES,
            },
        ];

        Ok(context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("Particle Cloud Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &vertex_buffers,
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::surface_color_targets(
                        context.format(),
                        material,
                    ),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            }))
    }

    /// Replace the point buffers with `points`.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        points: &PointSet,
    ) {
        let reallocated = self.positions.write(device, queue, points.positions())
            | self.scales.write(device, queue, points.scales());
        if reallocated {
            log::debug!(
                "cloud buffers reallocated for {} points (capacity {})",
                points.len(),
                self.positions.capacity()
            );
        }
        self.point_count = u32::try_from(points.len()).unwrap_or(u32::MAX);
    }

    /// Publish the clock's time for this frame.
    pub fn update(&mut self, queue: &wgpu::Queue, clock: &FrameClock) {
        self.uniform.time = clock.time();
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Number of sprites drawn per frame.
    pub fn point_count(&self) -> u32 {
        self.point_count
    }

    /// Record the sprite draw. Does nothing for an empty cloud.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.point_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.positions.buffer().slice(..));
        render_pass.set_vertex_buffer(1, self.scales.buffer().slice(..));
        render_pass.draw(0..VERTICES_PER_SPRITE, 0..self.point_count);
    }
}
