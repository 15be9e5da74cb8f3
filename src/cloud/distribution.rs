//! Quasi-uniform point layout on a spherical shell.
//!
//! Directions come from a golden-angle (Fibonacci) spiral: latitude steps
//! linearly from the north pole to the south pole while the azimuth advances
//! by the golden angle, which never lines up with itself. Each point then
//! gets a random radius inside a thin shell and a random sprite scale.

use glam::{DVec3, Vec3};
use rand::Rng;

/// Golden angle in radians, `π·(3 − √5)`.
pub const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Nominal shell radius before jitter.
pub const NOMINAL_RADIUS: f64 = 2.2;

/// Smallest radius factor applied to [`NOMINAL_RADIUS`].
const RADIUS_FACTOR_MIN: f64 = 0.7;
/// Width of the random radius factor range.
const RADIUS_FACTOR_SPAN: f64 = 0.3;

/// Largest radius a stored point gets. Rounding a radius just under
/// [`NOMINAL_RADIUS`] to `f32` would otherwise land on the bound itself.
const MAX_STORED_RADIUS: f64 = 2.199_99;

/// Smallest sprite scale.
pub const SCALE_MIN: f32 = 0.5;
/// Exclusive upper bound of the sprite scale.
pub const SCALE_MAX: f32 = 2.0;

/// Unit direction of spiral point `index` out of `count`.
///
/// Latitude is `y = 1 − 2·index/count`, so index 0 sits on the north pole
/// and the last point stops one step short of the south pole.
#[must_use]
pub fn spiral_direction(index: usize, count: usize) -> DVec3 {
    let t = index as f64 / count as f64;
    let y = 1.0 - 2.0 * t;
    let r = (1.0 - y * y).max(0.0).sqrt();
    let phi = index as f64 * GOLDEN_ANGLE;
    DVec3::new(r * phi.cos(), y, r * phi.sin())
}

/// Shell radius for a uniform sample `u` in `[0, 1)`.
#[must_use]
pub fn shell_radius(u: f64) -> f64 {
    NOMINAL_RADIUS * (RADIUS_FACTOR_MIN + RADIUS_FACTOR_SPAN * u)
}

/// Sprite scale for a uniform sample `u` in `[0, 1)`.
#[must_use]
pub fn sprite_scale(u: f32) -> f32 {
    SCALE_MIN + (SCALE_MAX - SCALE_MIN) * u
}

/// Fixed-size set of cloud points, stored as the two vertex attribute
/// streams the renderer uploads.
///
/// Positions and scales are never mutated after generation; animation is
/// applied on the GPU.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    positions: Vec<[f32; 3]>,
    scales: Vec<f32>,
}

impl PointSet {
    /// Generate `count` points using the thread-local RNG.
    ///
    /// Two calls with the same count give the same angular layout but
    /// different radii and scales.
    #[must_use]
    pub fn generate(count: usize) -> Self {
        Self::generate_with(count, &mut rand::rng())
    }

    /// Generate `count` points drawing radius and scale from `rng`.
    ///
    /// A count of zero yields an empty set.
    pub fn generate_with<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut scales = Vec::with_capacity(count);

        for i in 0..count {
            let radius = shell_radius(rng.random::<f64>()).min(MAX_STORED_RADIUS);
            let position = (spiral_direction(i, count) * radius).as_vec3();
            positions.push(position.to_array());
            scales.push(sprite_scale(rng.random::<f32>()));
        }

        Self { positions, scales }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the set holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Initial point positions.
    #[must_use]
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Per-point sprite scales, parallel to [`positions`](Self::positions).
    #[must_use]
    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    /// Iterate `(position, scale)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Vec3, f32)> + '_ {
        self.positions
            .iter()
            .zip(&self.scales)
            .map(|(p, &s)| (Vec3::from_array(*p), s))
    }

    /// Largest distance of any point from the origin (0 when empty).
    #[must_use]
    pub fn bounding_radius(&self) -> f32 {
        self.positions
            .iter()
            .map(|p| Vec3::from_array(*p).length())
            .fold(0.0f32, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{PI, TAU};

    use rand::rngs::StdRng;
    use rand::RngCore;
    use rand::SeedableRng;

    use super::*;

    fn seeded(count: usize, seed: u64) -> PointSet {
        PointSet::generate_with(count, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn golden_angle_matches_closed_form() {
        let expected = PI * (3.0 - 5f64.sqrt());
        assert!((GOLDEN_ANGLE - expected).abs() < 1e-12);
    }

    #[test]
    fn produces_exactly_count_points() {
        for count in [1, 2, 4, 17, 1000, 20_000] {
            let points = seeded(count, 7);
            assert_eq!(points.len(), count);
            assert_eq!(points.positions().len(), count);
            assert_eq!(points.scales().len(), count);
        }
    }

    #[test]
    fn zero_count_is_empty() {
        let points = PointSet::generate(0);
        assert!(points.is_empty());
        assert_eq!(points.bounding_radius(), 0.0);
        assert_eq!(points.iter().count(), 0);
    }

    #[test]
    fn scales_stay_in_range() {
        let points = seeded(10_000, 3);
        for &s in points.scales() {
            assert!((SCALE_MIN..SCALE_MAX).contains(&s), "scale {s}");
        }
        assert!(sprite_scale(0.0) == SCALE_MIN);
        assert!(sprite_scale(0.999_999_9) < SCALE_MAX);
    }

    #[test]
    fn radii_stay_inside_shell() {
        let points = seeded(10_000, 11);
        for (p, _) in points.iter() {
            let r = p.length();
            assert!(r >= 1.54 - 1e-4 && r < 2.2, "radius {r}");
        }
        assert!((shell_radius(0.0) - 1.54).abs() < 1e-12);
        assert!(shell_radius(0.999_999) < 2.2);
    }

    /// RNG that always returns its largest value.
    struct MaxRng;

    impl RngCore for MaxRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }

        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }

        fn fill_bytes(&mut self, dst: &mut [u8]) {
            dst.fill(u8::MAX);
        }
    }

    #[test]
    fn largest_draw_stays_below_outer_radius() {
        let points = PointSet::generate_with(500, &mut MaxRng);
        for (p, s) in points.iter() {
            assert!(p.length() < 2.2, "radius {}", p.length());
            assert!(s < SCALE_MAX, "scale {s}");
        }
    }

    #[test]
    fn latitudes_are_evenly_spaced() {
        let count = 64;
        let step = 2.0 / count as f64;
        for i in 1..count {
            let prev = spiral_direction(i - 1, count).y;
            let cur = spiral_direction(i, count).y;
            assert!((prev - cur - step).abs() < 1e-12);
        }
    }

    #[test]
    fn azimuths_advance_by_golden_angle() {
        let count = 50;
        // Skip the pole, where the azimuth is undefined.
        for i in 2..count {
            let a = spiral_direction(i - 1, count);
            let b = spiral_direction(i, count);
            let delta = (b.z.atan2(b.x) - a.z.atan2(a.x)).rem_euclid(TAU);
            assert!(
                (delta - GOLDEN_ANGLE.rem_euclid(TAU)).abs() < 1e-9,
                "step {i}: {delta}"
            );
        }
    }

    #[test]
    fn directions_are_unit_length() {
        for i in 0..100 {
            assert!((spiral_direction(i, 100).length() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn single_point_sits_on_vertical_axis() {
        let points = seeded(1, 42);
        let (p, _) = points.iter().next().unwrap();
        assert!(p.x.abs() < 1e-6);
        assert!(p.z.abs() < 1e-6);
        assert!(p.y >= 1.54 - 1e-4 && p.y <= 2.2 + 1e-4);
    }

    #[test]
    fn four_points_follow_spiral() {
        let points = seeded(4, 5);
        let expected_y = [1.0, 0.5, 0.0, -0.5];
        for (i, (p, _)) in points.iter().enumerate() {
            let radius = p.length();
            let dir = p / radius;
            assert!((f64::from(dir.y) - expected_y[i]).abs() < 1e-5);
            if i > 0 {
                let phi = i as f64 * GOLDEN_ANGLE;
                let r = (1.0 - expected_y[i] * expected_y[i]).sqrt();
                assert!((f64::from(dir.x) - r * phi.cos()).abs() < 1e-5);
                assert!((f64::from(dir.z) - r * phi.sin()).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn same_seed_is_reproducible() {
        assert_eq!(seeded(256, 9), seeded(256, 9));
        assert_ne!(seeded(256, 9), seeded(256, 10));
    }

    #[test]
    fn repeated_generation_is_statistically_similar() {
        let mean_radius = |points: &PointSet| {
            points.iter().map(|(p, _)| p.length()).sum::<f32>()
                / points.len() as f32
        };
        let a = seeded(20_000, 1);
        let b = seeded(20_000, 2);
        assert_eq!(a.len(), b.len());
        // Uniform factor in [0.7, 1.0) gives a mean radius of 2.2 * 0.85.
        assert!((mean_radius(&a) - 1.87).abs() < 0.01);
        assert!((mean_radius(&a) - mean_radius(&b)).abs() < 0.01);
    }
}
