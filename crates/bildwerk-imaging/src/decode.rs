// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Decoding and encoding helpers shared by both demos.

use image::{DynamicImage, ImageFormat};
use tracing::{debug, instrument};

use bildwerk_core::error::{BildwerkError, Result};

/// Decode an uploaded image from raw encoded bytes (PNG, JPEG, etc.).
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_image(data: &[u8]) -> Result<DynamicImage> {
    let img = image::load_from_memory(data)
        .map_err(|err| BildwerkError::Decode(format!("failed to decode image: {}", err)))?;
    debug!(
        width = img.width(),
        height = img.height(),
        "Image decoded from bytes"
    );
    Ok(img)
}

/// Encode an image as PNG bytes (the display path feeds these to the UI).
pub fn to_png_bytes(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| BildwerkError::Encode(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn png_round_trip_preserves_dimensions() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(7, 5, Rgb([10, 20, 30])));
        let bytes = to_png_bytes(&img).unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!(decoded.width(), 7);
        assert_eq!(decoded.height(), 5);
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode_image(b"not an image").unwrap_err();
        assert!(matches!(err, BildwerkError::Decode(_)));
    }
}
