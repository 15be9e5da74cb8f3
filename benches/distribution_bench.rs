use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec3;
use glowcloud::cloud::{FrameClock, PointSet};
use glowcloud::shading::{displace, simplex3};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn noise_benchmark(c: &mut Criterion) {
    let p = Vec3::new(0.3, -1.7, 2.9);
    c.bench_function("simplex3", |b| b.iter(|| black_box(simplex3(black_box(p)))));
}

fn generation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_generation");

    for count in [1_000, 15_000, 20_000, 100_000].iter() {
        group.bench_function(format!("{count}_points"), |b| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| black_box(PointSet::generate_with(*count, &mut rng)))
        });
    }
    group.finish();
}

fn displacement_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let points = PointSet::generate_with(20_000, &mut rng);
    let mut clock = FrameClock::new();
    clock.advance(12.5);

    c.bench_function("displace_20000_points", |b| {
        b.iter(|| {
            points
                .iter()
                .map(|(position, _)| displace(position, &clock).mix)
                .sum::<f32>()
        })
    });
}

criterion_group!(
    benches,
    noise_benchmark,
    generation_benchmark,
    displacement_benchmark
);
criterion_main!(benches);
