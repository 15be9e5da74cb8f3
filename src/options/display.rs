use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default clear color, `#0c0c10`.
const DEFAULT_BACKGROUND: &str = "#0c0c10";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(inline)]
#[serde(default)]
/// Window background and frame pacing.
pub struct DisplayOptions {
    /// Background color as a `#rrggbb` hex string.
    pub background: String,
    /// Frame rate cap. 0 means unlimited.
    pub target_fps: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND.to_owned(),
            target_fps: 0,
        }
    }
}

impl DisplayOptions {
    /// Background as RGB floats in `[0, 1]`. Unparseable strings log a
    /// warning and fall back to `#0c0c10`.
    #[must_use]
    pub fn background_rgb(&self) -> [f32; 3] {
        parse_hex_color(&self.background).unwrap_or_else(|| {
            log::warn!(
                "invalid background color {:?}, using {DEFAULT_BACKGROUND}",
                self.background
            );
            [12.0 / 255.0, 12.0 / 255.0, 16.0 / 255.0]
        })
    }

    /// Background as a render-pass clear color.
    #[must_use]
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b] = self.background_rgb();
        wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        }
    }
}

/// Parse `#rrggbb` (leading `#` optional) into RGB floats in `[0, 1]`.
#[must_use]
pub fn parse_hex_color(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|v| f32::from(v) / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?])
}
