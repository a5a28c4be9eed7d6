// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the two numeric transforms in bildwerk-imaging.
// Both run on synthetic gradient images at realistic demo resolutions.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use bildwerk_core::TargetResolution;
use bildwerk_imaging::{blend_images, reduce_to_gray};

/// A horizontal gradient test image; cheap to build, non-uniform enough
/// that the resize filters do real work.
fn gradient(width: u32, height: u32) -> DynamicImage {
    let img = RgbImage::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(1)) as u8;
        let g = (y * 255 / height.max(1)) as u8;
        Rgb([r, g, 128])
    });
    DynamicImage::ImageRgb8(img)
}

/// Benchmark a full dissolve step (two resizes + lerp) at the default
/// 800-wide display target.
fn bench_blend(c: &mut Criterion) {
    let a = gradient(1024, 768);
    let b = gradient(640, 480);
    let target = TargetResolution::clamped_width(800, 600, 800).unwrap();

    c.bench_function("blend_images (800x600)", |bench| {
        bench.iter(|| {
            let out = blend_images(black_box(&a), black_box(&b), target, 0.37).unwrap();
            black_box(out);
        });
    });
}

/// Benchmark the grayscale reduction at the 500-cell export cap.
fn bench_reduce_to_gray(c: &mut Criterion) {
    let img = gradient(1024, 768);
    let target = TargetResolution::clamped(500, 500, 500).unwrap();

    c.bench_function("reduce_to_gray (500x500)", |bench| {
        bench.iter(|| {
            let reduction = reduce_to_gray(black_box(&img), target).unwrap();
            black_box(reduction.matrix);
        });
    });
}

criterion_group!(benches, bench_blend, bench_reduce_to_gray);
criterion_main!(benches);
