//! 3D simplex noise over the skewed tetrahedral lattice.
//!
//! Permutations use the `(34x² + x) mod 289` polynomial instead of a lookup
//! table and gradients are picked from a 7×7 ring projected onto an
//! octahedron, so the whole function is branch-free arithmetic. The WGSL
//! module `glowcloud::noise` is a line-for-line twin of this one.
//!
//! Corner kernels have a squared radius of 0.5, the largest that keeps every
//! contribution inside its own simplex; anything wider leaks across cell
//! faces and the sum jumps when the lattice cell changes.

use glam::{Vec3, Vec3Swizzles, Vec4, Vec4Swizzles};

/// Skew factors `(1/6, 1/3)`.
const SKEW_UNSKEW: (f32, f32) = (1.0 / 6.0, 1.0 / 3.0);

/// `1/7`, the gradient ring step.
const RING_STEP: f32 = 1.0 / 7.0;

/// Squared radius of each corner's kernel.
const KERNEL_RADIUS_SQ: f32 = 0.5;

/// Output scale bringing the kernel sum to roughly `[-1, 1]`.
const OUTPUT_SCALE: f32 = 105.0;

fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn mod289_4(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn permute(x: Vec4) -> Vec4 {
    mod289_4((x * 34.0 + 1.0) * x)
}

fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - 0.853_734_7 * r
}

fn step4(edge: Vec4, x: Vec4) -> Vec4 {
    Vec4::select(x.cmpge(edge), Vec4::ONE, Vec4::ZERO)
}

/// Simplex noise at `v`, continuous everywhere and roughly in `[-1, 1]`.
#[must_use]
pub fn simplex3(v: Vec3) -> f32 {
    let (cx, cy) = SKEW_UNSKEW;

    // Lattice cell and the first corner offset.
    let cell = (v + Vec3::splat(v.dot(Vec3::splat(cy)))).floor();
    let x0 = v - cell + Vec3::splat(cell.dot(Vec3::splat(cx)));

    // Which of the six tetrahedra we are in. The last comparison is strict
    // so that equal components still produce a consistent ordering.
    let g = Vec3::new(
        f32::from(u8::from(x0.x >= x0.y)),
        f32::from(u8::from(x0.y >= x0.z)),
        f32::from(u8::from(x0.z > x0.x)),
    );
    let l = Vec3::ONE - g;
    let i1 = g.min(l.zxy());
    let i2 = g.max(l.zxy());

    let x1 = x0 - i1 + cx;
    let x2 = x0 - i2 + cy;
    let x3 = x0 - 0.5;

    let cell = mod289_3(cell);
    let p = permute(
        permute(
            permute(Vec4::splat(cell.z) + Vec4::new(0.0, i1.z, i2.z, 1.0))
                + Vec4::splat(cell.y)
                + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + Vec4::splat(cell.x)
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    // Gradients: 7x7 points over a square, mapped onto an octahedron.
    let ns = Vec3::new(2.0 * RING_STEP, 0.5 * RING_STEP - 1.0, RING_STEP);
    let j = p - 49.0 * (p * ns.z * ns.z).floor();
    let xf = (j * ns.z).floor();
    let yf = (j - 7.0 * xf).floor();

    let x = xf * ns.x + ns.y;
    let y = yf * ns.x + ns.y;
    let h = Vec4::ONE - x.abs() - y.abs();

    let b0 = Vec4::new(x.x, x.y, y.x, y.y);
    let b1 = Vec4::new(x.z, x.w, y.z, y.w);
    let s0 = b0.floor() * 2.0 + 1.0;
    let s1 = b1.floor() * 2.0 + 1.0;
    let sh = -step4(h, Vec4::ZERO);

    let a0 = b0.xzyw() + s0.xzyw() * sh.xxyy();
    let a1 = b1.xzyw() + s1.xzyw() * sh.zzww();

    let g0 = Vec3::new(a0.x, a0.y, h.x);
    let g1 = Vec3::new(a0.z, a0.w, h.y);
    let g2 = Vec3::new(a1.x, a1.y, h.z);
    let g3 = Vec3::new(a1.z, a1.w, h.w);

    let norm = taylor_inv_sqrt(Vec4::new(
        g0.length_squared(),
        g1.length_squared(),
        g2.length_squared(),
        g3.length_squared(),
    ));
    let g0 = g0 * norm.x;
    let g1 = g1 * norm.y;
    let g2 = g2 * norm.z;
    let g3 = g3 * norm.w;

    // Radial falloff of each corner's contribution.
    let m = (Vec4::splat(KERNEL_RADIUS_SQ)
        - Vec4::new(
            x0.length_squared(),
            x1.length_squared(),
            x2.length_squared(),
            x3.length_squared(),
        ))
    .max(Vec4::ZERO);
    let m = m * m;

    OUTPUT_SCALE
        * (m * m).dot(Vec4::new(g0.dot(x0), g1.dot(x1), g2.dot(x2), g3.dot(x3)))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn random_point(rng: &mut StdRng, extent: f32) -> Vec3 {
        Vec3::new(
            rng.random_range(-extent..extent),
            rng.random_range(-extent..extent),
            rng.random_range(-extent..extent),
        )
    }

    #[test]
    fn output_is_bounded() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20_000 {
            let n = simplex3(random_point(&mut rng, 50.0));
            assert!(n.is_finite());
            assert!(n.abs() <= 1.05, "noise {n}");
        }
    }

    #[test]
    fn output_spans_both_signs() {
        let mut rng = StdRng::seed_from_u64(2);
        let samples: Vec<f32> =
            (0..5_000).map(|_| simplex3(random_point(&mut rng, 10.0))).collect();
        let max = samples.iter().copied().fold(f32::MIN, f32::max);
        let min = samples.iter().copied().fold(f32::MAX, f32::min);
        assert!(max > 0.5, "max {max}");
        assert!(min < -0.5, "min {min}");
    }

    #[test]
    fn continuous_across_lattice_boundaries() {
        // Walk a diagonal line that crosses many integer planes.
        let dir = Vec3::new(1.0, 0.7, 0.3).normalize();
        let step = 1e-3;
        let mut prev = simplex3(Vec3::ZERO);
        for i in 1..8_000 {
            let cur = simplex3(dir * (i as f32 * step));
            assert!((cur - prev).abs() < 0.02, "jump at step {i}");
            prev = cur;
        }
    }

    #[test]
    fn continuous_exactly_at_integer_coordinates() {
        for k in -3..=3 {
            let p = Vec3::new(k as f32, 0.25, -0.75);
            let e = Vec3::new(1e-4, 0.0, 0.0);
            assert!((simplex3(p - e) - simplex3(p + e)).abs() < 1e-2);
        }
    }

    #[test]
    fn zero_on_lattice_points() {
        // Points with all components equal to a multiple of 0.5 map onto the
        // skewed lattice.
        for p in [Vec3::ZERO, Vec3::ONE, Vec3::splat(-1.5)] {
            assert!(simplex3(p).abs() < 1e-6);
        }
    }

    #[test]
    fn continuous_on_the_diagonal() {
        let p = Vec3::splat(2.5);
        let q = p + Vec3::new(1e-4, 0.0, -1e-4);
        assert!((simplex3(p) - simplex3(q)).abs() < 1e-2);
    }

    #[test]
    fn deterministic() {
        let p = Vec3::new(0.3, -1.7, 4.2);
        assert_eq!(simplex3(p), simplex3(p));
    }

    #[test]
    fn not_constant() {
        let a = simplex3(Vec3::new(0.1, 0.2, 0.3));
        let b = simplex3(Vec3::new(5.1, -2.2, 0.9));
        assert!((a - b).abs() > 1e-4);
    }
}
