// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// bildwerk-imaging — the numeric core of the Bildwerk demos.
//
// Provides image decoding and PNG encoding helpers, the cross-dissolve blend
// engine (normalized float buffers, linear interpolation), the pixel-block
// grayscale reducer, and a content-hash cache for decoded uploads.

pub mod blend;
pub mod cache;
pub mod decode;
pub mod grayscale;

// Re-export the primary entry points so callers can use
// `bildwerk_imaging::blend_images` etc.
pub use blend::{NormalizedRgb, blend, blend_images};
pub use cache::DecodedCache;
pub use decode::{decode_image, to_png_bytes};
pub use grayscale::{GrayReduction, reduce_to_gray};
