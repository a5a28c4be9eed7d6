// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — the decode cache plus the compute and export
// helpers the pages call.
//
// The cache is wrapped in `Arc<Mutex<>>` so the struct clones cheaply into
// closures and async blocks; contention is nil because everything runs on
// the single UI thread.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use base64::Engine;
use image::DynamicImage;
use tracing::info;

use bildwerk_core::error::Result;
use bildwerk_core::{GrayMatrix, TargetResolution};
use bildwerk_export::{export_filename, write_workbook};
use bildwerk_imaging::grayscale::GrayReduction;
use bildwerk_imaging::{DecodedCache, blend_images, reduce_to_gray, to_png_bytes};

/// Decoded uploads the cache will hold before evicting; the demos keep at
/// most three images live.
const CACHE_CAPACITY: usize = 8;

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    cache: Arc<Mutex<DecodedCache>>,
}

impl AppServices {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(Mutex::new(DecodedCache::new(CACHE_CAPACITY))),
        }
    }

    // -- Decoding ------------------------------------------------------------

    /// Decode upload bytes through the content-hash cache.
    pub fn decode_cached(&self, bytes: &[u8]) -> Result<Arc<DynamicImage>> {
        self.cache
            .lock()
            .expect("decode cache lock poisoned")
            .get_or_decode(bytes)
    }

    /// Width and height of an uploaded image (decoding it if necessary).
    pub fn image_dimensions(&self, bytes: &[u8]) -> Result<(u32, u32)> {
        let img = self.decode_cached(bytes)?;
        Ok((img.width(), img.height()))
    }

    // -- Dissolve ------------------------------------------------------------

    /// One dissolve redraw: blend both sources at `alpha` and return the
    /// result as a `data:` URL ready for an `img` element.
    pub fn blend_data_url(
        &self,
        a_bytes: &[u8],
        b_bytes: &[u8],
        target: TargetResolution,
        alpha: f32,
    ) -> Result<String> {
        let a = self.decode_cached(a_bytes)?;
        let b = self.decode_cached(b_bytes)?;
        let blended = blend_images(&a, &b, target, alpha)?;
        png_data_url(&DynamicImage::ImageRgb8(blended))
    }

    // -- Grayscale -----------------------------------------------------------

    /// Run the grayscale reduction on an uploaded image.
    pub fn reduce_cached(&self, bytes: &[u8], target: TargetResolution) -> Result<GrayReduction> {
        let img = self.decode_cached(bytes)?;
        reduce_to_gray(&img, target)
    }

    /// Serialize the matrix and write it to a user-chosen path.
    ///
    /// Returns `Ok(None)` when the user cancels the save dialog.
    pub fn save_workbook(&self, matrix: &GrayMatrix) -> Result<Option<PathBuf>> {
        let bytes = write_workbook(matrix)?;

        let Some(path) = rfd::FileDialog::new()
            .set_file_name(export_filename(matrix))
            .add_filter("Spreadsheet", &["xlsx"])
            .save_file()
        else {
            return Ok(None);
        };

        std::fs::write(&path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "workbook saved");
        Ok(Some(path))
    }
}

impl Default for AppServices {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode an image as PNG and wrap it in a `data:` URL.
pub fn png_data_url(image: &DynamicImage) -> Result<String> {
    let png = to_png_bytes(image)?;
    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bildwerk_core::BildwerkError;
    use image::{Rgb, RgbImage};

    fn png_fixture(shade: u8) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(6, 4, Rgb([shade, shade, shade])));
        to_png_bytes(&img).unwrap()
    }

    #[test]
    fn blend_data_url_is_a_png_url() {
        let svc = AppServices::new();
        let target = TargetResolution::clamped_width(6, 4, 800).unwrap();
        let url = svc
            .blend_data_url(&png_fixture(0), &png_fixture(255), target, 0.5)
            .unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn dimensions_come_from_the_decoded_image() {
        let svc = AppServices::new();
        assert_eq!(svc.image_dimensions(&png_fixture(9)).unwrap(), (6, 4));
    }

    #[test]
    fn corrupt_upload_surfaces_a_decode_error() {
        let svc = AppServices::new();
        let err = svc.image_dimensions(b"junk").unwrap_err();
        assert!(matches!(err, BildwerkError::Decode(_)));
    }
}
