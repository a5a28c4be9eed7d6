// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pixel-block grayscale reducer.
//
// Downsample with nearest-neighbor (hard block edges are the point of the
// demo), average the three channels per pixel, then re-expand to the source
// size for display. The exported matrix always uses the downsampled
// resolution.

use image::{DynamicImage, Rgb, RgbImage, imageops::FilterType};
use tracing::{info, instrument};

use bildwerk_core::error::Result;
use bildwerk_core::{GrayMatrix, TargetResolution};

/// Result of a grayscale reduction: the exportable matrix plus a preview
/// re-expanded to the source dimensions.
#[derive(Debug, Clone)]
pub struct GrayReduction {
    pub matrix: GrayMatrix,
    pub preview: DynamicImage,
}

/// Reduce `image` to a gray intensity matrix at `target` resolution.
///
/// The preview is the matrix replicated into three identical channels and
/// upscaled back to the source size with nearest-neighbor, so each cell of
/// the matrix shows as one visible block.
#[instrument(skip(image), fields(src_w = image.width(), src_h = image.height(), target = %target))]
pub fn reduce_to_gray(image: &DynamicImage, target: TargetResolution) -> Result<GrayReduction> {
    let (src_w, src_h) = (image.width(), image.height());

    let small = image
        .resize_exact(target.width, target.height, FilterType::Nearest)
        .to_rgb8();

    let data: Vec<u8> = small
        .pixels()
        .map(|px| {
            let [r, g, b] = px.0;
            channel_mean(r, g, b)
        })
        .collect();
    let matrix = GrayMatrix::from_raw(target.width, target.height, data)?;

    let gray_small = RgbImage::from_fn(target.width, target.height, |x, y| {
        let v = matrix.get(x, y);
        Rgb([v, v, v])
    });
    let preview =
        DynamicImage::ImageRgb8(gray_small).resize_exact(src_w, src_h, FilterType::Nearest);

    info!(
        target = %target,
        cells = matrix.as_raw().len(),
        "grayscale reduction computed"
    );

    Ok(GrayReduction { matrix, preview })
}

/// Mean of the three channels, rounded to the nearest integer.
///
/// A three-way integer mean has fractional part 0, 1/3, or 2/3 — never
/// exactly one half — so `round` needs no tie-break policy here.
fn channel_mean(r: u8, g: u8, b: u8) -> u8 {
    ((u16::from(r) + u16::from(g) + u16::from(b)) as f32 / 3.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(width: u32, height: u32) -> TargetResolution {
        TargetResolution::clamped(width, height, 500).unwrap()
    }

    #[test]
    fn channel_mean_known_values() {
        assert_eq!(channel_mean(10, 20, 30), 20);
        assert_eq!(channel_mean(0, 0, 0), 0);
        assert_eq!(channel_mean(255, 255, 255), 255);
        // 1/3 rounds down, 2/3 rounds up.
        assert_eq!(channel_mean(0, 0, 1), 0);
        assert_eq!(channel_mean(0, 1, 1), 1);
    }

    #[test]
    fn uniform_input_fills_matrix_with_its_mean() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 48, Rgb([128, 128, 128])));
        for (w, h) in [(1, 1), (10, 7), (64, 48), (500, 500)] {
            let reduction = reduce_to_gray(&img, target(w, h)).unwrap();
            assert!(reduction.matrix.as_raw().iter().all(|&v| v == 128));
        }
    }

    #[test]
    fn matrix_dimensions_match_target_not_source() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(123, 77, Rgb([1, 2, 3])));
        let reduction = reduce_to_gray(&img, target(32, 24)).unwrap();
        assert_eq!(reduction.matrix.width(), 32);
        assert_eq!(reduction.matrix.height(), 24);
        assert_eq!(reduction.matrix.rows().count(), 24);
        assert!(reduction.matrix.rows().all(|row| row.len() == 32));
    }

    #[test]
    fn preview_is_upscaled_to_source_dimensions() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(123, 77, Rgb([90, 90, 90])));
        let reduction = reduce_to_gray(&img, target(10, 10)).unwrap();
        assert_eq!(reduction.preview.width(), 123);
        assert_eq!(reduction.preview.height(), 77);
    }

    #[test]
    fn preview_channels_are_identical() {
        let mut src = RgbImage::from_pixel(8, 8, Rgb([200, 10, 60]));
        src.put_pixel(0, 0, Rgb([13, 77, 240]));
        let reduction = reduce_to_gray(&DynamicImage::ImageRgb8(src), target(4, 4)).unwrap();
        for px in reduction.preview.to_rgb8().pixels() {
            let [r, g, b] = px.0;
            assert_eq!(r, g);
            assert_eq!(g, b);
        }
    }

    #[test]
    fn downsample_picks_block_values_not_averages() {
        // Left half black, right half white; a 2x1 nearest-neighbor
        // downsample must keep pure black and pure white cells, with no
        // blur between them.
        let src = RgbImage::from_fn(8, 4, |x, _| {
            if x < 4 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
        });
        let reduction = reduce_to_gray(&DynamicImage::ImageRgb8(src), target(2, 1)).unwrap();
        assert_eq!(reduction.matrix.get(0, 0), 0);
        assert_eq!(reduction.matrix.get(1, 0), 255);
    }
}
