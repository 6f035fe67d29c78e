// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use iced_identify::classifier::mobilenet;
use image_rs::{DynamicImage, RgbImage};
use std::hint::black_box;

fn synthetic_photo(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image_rs::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    DynamicImage::ImageRgb8(img)
}

fn preprocess_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocess");

    // Typical camera resolution, downscaled to the model's 224x224 input.
    let large = synthetic_photo(1920, 1080);
    group.bench_function("preprocess_1080p", |b| {
        b.iter(|| {
            let _ = black_box(mobilenet::preprocess_image(black_box(&large)).unwrap());
        });
    });

    // Already at model size, so only normalization and layout remain.
    let small = synthetic_photo(224, 224);
    group.bench_function("preprocess_224", |b| {
        b.iter(|| {
            let _ = black_box(mobilenet::preprocess_image(black_box(&small)).unwrap());
        });
    });

    group.finish();
}

criterion_group!(benches, preprocess_benchmark);
criterion_main!(benches);
