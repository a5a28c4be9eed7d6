// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Bildwerk.

use thiserror::Error;

/// Top-level error type for all Bildwerk operations.
#[derive(Debug, Error)]
pub enum BildwerkError {
    // -- Image errors --
    #[error("image decoding failed: {0}")]
    Decode(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    // -- Transform errors --
    #[error("invalid target resolution {width}x{height}: both axes must be at least 1")]
    InvalidResolution { width: u32, height: u32 },

    #[error("image dimensions do not match: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    #[error("mix ratio {0} is outside [0, 1]")]
    InvalidMixRatio(f32),

    #[error("matrix data length {len} does not match {width}x{height}")]
    MatrixShape { width: u32, height: u32, len: usize },

    // -- Export errors --
    #[error("spreadsheet export failed: {0}")]
    Export(String),

    // -- I/O --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BildwerkError>;
