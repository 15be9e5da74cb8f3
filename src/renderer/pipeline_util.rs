use crate::cloud::CloudMaterial;

/// Single color target writing straight to the surface with the material's
/// blend state.
pub fn surface_color_targets(
    format: wgpu::TextureFormat,
    material: &CloudMaterial,
) -> [Option<wgpu::ColorTargetState>; 1] {
    [Some(wgpu::ColorTargetState {
        format,
        blend: Some(material.blend),
        write_mask: wgpu::ColorWrites::ALL,
    })]
}
