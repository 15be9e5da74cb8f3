//! Per-pixel stage: sprite size, circular falloff and final color.

use glam::{Vec2, Vec4};

use crate::cloud::CloudMaterial;

/// Base sprite size in pixels per unit of scale.
pub const SIZE_PER_SCALE: f32 = 2.0;
/// View distance at which a sprite is drawn at its base size times 300.
pub const SIZE_ATTENUATION: f32 = 300.0;
/// Squared sprite-local radius at which the falloff reaches zero.
pub const FALLOFF_EDGE_SQ: f32 = 0.25;
/// Highest device pixel ratio sprites are sized for. Denser displays draw
/// them proportionally larger.
pub const MAX_PIXEL_RATIO: f64 = 2.0;

/// GLSL-style `smoothstep`. `edge0 > edge1` gives a falling curve.
#[must_use]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Sprite size in pixels for a point of `scale` at view-space depth
/// `view_z` (negative in front of the camera).
///
/// Size falls off inversely with distance. Points on or behind the camera
/// plane get zero size.
#[must_use]
pub fn point_size(scale: f32, view_z: f32) -> f32 {
    if view_z >= 0.0 {
        return 0.0;
    }
    scale * SIZE_PER_SCALE * (SIZE_ATTENUATION / -view_z)
}

/// Physical pixels per sprite pixel on a display with `scale_factor`.
///
/// Sprite sizes are authored for a render target at the display's pixel
/// ratio clamped to `1..=MAX_PIXEL_RATIO`. Outside that range the sprite
/// keeps its logical size instead of its pixel size.
#[must_use]
pub fn sprite_pixel_ratio(scale_factor: f64) -> f32 {
    if !(scale_factor.is_finite() && scale_factor > 0.0) {
        return 1.0;
    }
    (scale_factor / scale_factor.clamp(1.0, MAX_PIXEL_RATIO)) as f32
}

/// Half-extent in NDC of a sprite `size_px` pixels across on a
/// `viewport`-sized target.
#[must_use]
pub fn ndc_half_extent(size_px: f32, viewport: Vec2) -> Vec2 {
    Vec2::splat(size_px) / viewport.max(Vec2::ONE)
}

/// Soft circular falloff at sprite-local `coord` in `[0, 1]²`: 1 at the
/// center, 0 at and beyond radius 0.5.
#[must_use]
pub fn falloff(coord: Vec2) -> f32 {
    let uv = coord - 0.5;
    smoothstep(FALLOFF_EDGE_SQ, 0.0, uv.dot(uv))
}

/// Fragment alpha: the falloff applied twice (core brightness times glow).
#[must_use]
pub fn sprite_alpha(coord: Vec2) -> f32 {
    let f = falloff(coord);
    f * f
}

/// Straight-alpha RGBA of one sprite pixel before additive blending.
#[must_use]
pub fn shade_fragment(material: &CloudMaterial, coord: Vec2, mix: f32) -> Vec4 {
    material.mix_color(mix).extend(sprite_alpha(coord))
}
