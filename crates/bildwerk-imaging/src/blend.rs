// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cross-dissolve blend engine.
//
// Both sources are stretched to the same target box (no letterboxing),
// normalized to [0, 1] floats, and combined per channel as
// `a * (1 - alpha) + b * alpha`.

use image::{DynamicImage, RgbImage, imageops::FilterType};
use tracing::{info, instrument};

use bildwerk_core::TargetResolution;
use bildwerk_core::error::{BildwerkError, Result};

/// An RGB image as interleaved floats in [0.0, 1.0].
///
/// The working representation of the blend engine: one `f32` per channel,
/// row-major, `data.len() == width * height * 3`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRgb {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl NormalizedRgb {
    /// Stretch `image` to the target box and normalize to [0, 1].
    ///
    /// Aspect ratios are not preserved; two differently-shaped sources end
    /// up the same size and can be combined elementwise.
    #[instrument(skip(image), fields(src_w = image.width(), src_h = image.height(), target = %target))]
    pub fn from_image(image: &DynamicImage, target: TargetResolution) -> Self {
        let rgb = image
            .resize_exact(target.width, target.height, FilterType::Lanczos3)
            .to_rgb8();
        let data = rgb.as_raw().iter().map(|&v| f32::from(v) / 255.0).collect();
        Self {
            width: target.width,
            height: target.height,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Borrow the interleaved channel values.
    pub fn as_raw(&self) -> &[f32] {
        &self.data
    }

    /// Convert back to an 8-bit RGB image (scale, round, clamp).
    pub fn to_image(&self) -> RgbImage {
        let bytes: Vec<u8> = self
            .data
            .iter()
            .map(|&v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
            .collect();
        RgbImage::from_raw(self.width, self.height, bytes)
            .expect("normalized buffer length matches its dimensions")
    }
}

/// Linearly interpolate two equal-sized normalized images.
///
/// `alpha` is the weight of `b`: 0.0 reproduces `a`, 1.0 reproduces `b`.
pub fn blend(a: &NormalizedRgb, b: &NormalizedRgb, alpha: f32) -> Result<NormalizedRgb> {
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(BildwerkError::InvalidMixRatio(alpha));
    }
    if a.width != b.width || a.height != b.height {
        return Err(BildwerkError::DimensionMismatch {
            left_width: a.width,
            left_height: a.height,
            right_width: b.width,
            right_height: b.height,
        });
    }

    let data = a
        .data
        .iter()
        .zip(&b.data)
        .map(|(&x, &y)| x * (1.0 - alpha) + y * alpha)
        .collect();

    Ok(NormalizedRgb {
        width: a.width,
        height: a.height,
        data,
    })
}

/// Full dissolve step: resize both sources to `target` and blend at `alpha`.
#[instrument(skip(a, b), fields(target = %target, alpha))]
pub fn blend_images(
    a: &DynamicImage,
    b: &DynamicImage,
    target: TargetResolution,
    alpha: f32,
) -> Result<RgbImage> {
    let left = NormalizedRgb::from_image(a, target);
    let right = NormalizedRgb::from_image(b, target);
    let blended = blend(&left, &right, alpha)?;
    info!(target = %target, alpha, "blend computed");
    Ok(blended.to_image())
}
