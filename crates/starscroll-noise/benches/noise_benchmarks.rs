use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::Vec3;
use starscroll_noise::simplex3;

fn bench_simplex3_single(c: &mut Criterion) {
    let p = black_box(Vec3::new(12.34, -5.67, 0.89));
    c.bench_function("simplex3_single", |bencher| {
        bencher.iter(|| black_box(simplex3(p)))
    });
}

fn bench_simplex3_texel_row(c: &mut Criterion) {
    // One row of a 256-wide equirectangular bake.
    c.bench_function("simplex3_row_256", |bencher| {
        bencher.iter(|| {
            let mut acc = 0.0;
            for x in 0..256 {
                let u = x as f32 / 256.0;
                acc += simplex3(Vec3::new(u * 6.0, 0.5 * 12.0, 0.1));
            }
            black_box(acc)
        })
    });
}

criterion_group!(benches, bench_simplex3_single, bench_simplex3_texel_row);
criterion_main!(benches);
