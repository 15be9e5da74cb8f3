use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(inline)]
#[serde(default)]
/// Particle cloud parameters.
pub struct CloudOptions {
    /// Number of points. Signed so hand-edited files with a negative value
    /// still parse; see [`CloudOptions::effective_count`].
    #[schemars(range(min = 0, max = 1_000_000))]
    pub count: i64,
}

impl CloudOptions {
    /// Count used when an engine is built without options.
    pub const ENGINE_DEFAULT_COUNT: i64 = 15_000;

    /// The point count to generate, clamped to `0..=MAX_COUNT`.
    #[must_use]
    pub fn effective_count(&self) -> usize {
        clamp_count(self.count)
    }
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self { count: 20_000 }
    }
}

/// Largest point count the engine generates. Both attribute buffers stay
/// far below wgpu's default `max_buffer_size` at this size.
pub const MAX_COUNT: usize = 1_000_000;

/// Convert a user-supplied count to a point count in `0..=MAX_COUNT`.
#[must_use]
pub fn clamp_count(count: i64) -> usize {
    if count < 0 {
        log::warn!("particle count {count} is negative, using 0");
        return 0;
    }
    limit_count(usize::try_from(count).unwrap_or(usize::MAX))
}

/// Cap a point count at [`MAX_COUNT`].
#[must_use]
pub fn limit_count(count: usize) -> usize {
    if count > MAX_COUNT {
        log::warn!("particle count {count} exceeds {MAX_COUNT}, using {MAX_COUNT}");
        return MAX_COUNT;
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn huge_counts_clamp_to_max() {
        let opts = CloudOptions { count: i64::MAX };
        assert_eq!(opts.effective_count(), MAX_COUNT);
        assert_eq!(limit_count(usize::MAX), MAX_COUNT);
    }

    #[test]
    fn counts_in_range_pass_through() {
        assert_eq!(clamp_count(0), 0);
        assert_eq!(clamp_count(20_000), 20_000);
        assert_eq!(clamp_count(MAX_COUNT as i64), MAX_COUNT);
        assert_eq!(clamp_count(-1), 0);
    }

    #[test]
    fn max_count_buffers_fit_default_limits() {
        let max = wgpu::Limits::default().max_buffer_size;
        let positions = (MAX_COUNT * size_of::<[f32; 3]>()) as u64;
        assert!(2 * positions <= max);
    }
}
