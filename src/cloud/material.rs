use glam::Vec3;

/// Additive blending: `src·srcAlpha + dst`, for both color and alpha.
///
/// Overlapping sprites brighten instead of occluding each other.
pub const ADDITIVE_BLEND: wgpu::BlendState = wgpu::BlendState {
    color: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
    alpha: wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::One,
        operation: wgpu::BlendOperation::Add,
    },
};

/// Shading constants of the point sprites. Fixed for the lifetime of the
/// process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudMaterial {
    /// Color at mix factor 0 (negative X side of the cloud).
    pub cool: [f32; 3],
    /// Color at mix factor 1 (positive X side of the cloud).
    pub warm: [f32; 3],
    /// Blend state of the color target.
    pub blend: wgpu::BlendState,
    /// Whether sprites write depth. Always off: the cloud is a glow, not a
    /// surface.
    pub depth_write: bool,
}

impl CloudMaterial {
    /// The one material the cloud is drawn with.
    pub const GLOW: Self = Self {
        cool: [0.24, 0.52, 1.0],
        warm: [0.98, 0.48, 0.25],
        blend: ADDITIVE_BLEND,
        depth_write: false,
    };

    /// Linear blend from `cool` to `warm`. `t` is expected in `[0, 1]`.
    #[must_use]
    pub fn mix_color(&self, t: f32) -> Vec3 {
        Vec3::from_array(self.cool).lerp(Vec3::from_array(self.warm), t)
    }
}

impl Default for CloudMaterial {
    fn default() -> Self {
        Self::GLOW
    }
}
