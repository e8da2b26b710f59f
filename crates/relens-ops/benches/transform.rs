//! Benchmarks for the transform loop.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use relens_core::{ImageViewR, ImageViewW, Storage};
use relens_geom::{CoordParams, Ptlens, Vignetting};
use relens_ops::{Interpolation, Transform};

const SIZE: usize = 512;

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    group.throughput(Throughput::Elements((SIZE * SIZE) as u64));

    let src: Vec<u8> = (0..SIZE * SIZE * 3).map(|i| (i % 251) as u8).collect();

    for (name, interpolation) in [
        ("nearest", Interpolation::Nearest),
        ("bilinear", Interpolation::Bilinear),
        ("lanczos3", Interpolation::Lanczos(3)),
    ] {
        group.bench_with_input(
            BenchmarkId::new("barrel_vignette", name),
            &interpolation,
            |b, &interpolation| {
                let mut dst = vec![0u8; SIZE * SIZE * 3];
                b.iter(|| {
                    let reader = ImageViewR::new(&src, SIZE, SIZE, Storage::Rgb8Inter).unwrap();
                    let writer =
                        ImageViewW::new(&mut dst, SIZE, SIZE, Storage::Rgb8Inter).unwrap();
                    let mut transform = Transform::new(reader, writer, interpolation).unwrap();
                    let coord = CoordParams::default();
                    transform
                        .subpixel_queue
                        .add_model(Ptlens::new(0.0, 0.05, 0.0, coord));
                    transform
                        .colour_queue
                        .add_model(Vignetting::new(0.3, 0.0, 0.0, coord));
                    transform.run().unwrap();
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_transform);
criterion_main!(benches);
