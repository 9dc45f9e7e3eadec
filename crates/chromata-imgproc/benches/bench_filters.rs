use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array3;

use chromata_imgproc::filter::{gaussian, gaussian_into, BorderMode, GaussianOptions};

fn bench_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gaussian");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        for sigma in [0.5f64, 1.0, 2.0, 4.0].iter() {
            group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

            let parameter_string = format!("{}x{}x{}", width, height, sigma);

            // input image
            let image_f32 = Array3::<f32>::zeros((*height, *width, 3));
            let image_u8 = Array3::<u8>::zeros((*height, *width, 3));

            // output image
            let output_f32 = Array3::<f32>::zeros((*height, *width, 3));

            let options = GaussianOptions::default().with_channel_axis(-1isize);

            group.bench_with_input(
                BenchmarkId::new("gaussian_f32", &parameter_string),
                &image_f32,
                |b, i| b.iter(|| black_box(gaussian(i, *sigma, &options))),
            );

            group.bench_with_input(
                BenchmarkId::new("gaussian_u8", &parameter_string),
                &image_u8,
                |b, i| b.iter(|| black_box(gaussian(i, *sigma, &options))),
            );

            group.bench_with_input(
                BenchmarkId::new("gaussian_into_f32", &parameter_string),
                &(&image_f32, &output_f32),
                |b, i| {
                    let (src, mut dst) = (i.0, i.1.clone());
                    b.iter(|| black_box(gaussian_into(src, *sigma, &mut dst, &options)))
                },
            );

            let reflect = options.clone().with_mode(BorderMode::Reflect);
            group.bench_with_input(
                BenchmarkId::new("gaussian_reflect_f32", &parameter_string),
                &image_f32,
                |b, i| b.iter(|| black_box(gaussian(i, *sigma, &reflect))),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_filters);
criterion_main!(benches);
