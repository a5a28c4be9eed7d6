// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

/// Numeric policy knobs for the two demos.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Widest blend target the dissolve demo will compute (display cost bound).
    pub blend_max_width: u32,
    /// Per-axis cap on the grayscale target resolution; also bounds the
    /// exported workbook cell count.
    pub gray_max_pixels: u32,
    /// Mix-ratio increment applied on each animation frame.
    pub animation_step: f32,
    /// Delay between animation frames, in milliseconds.
    pub animation_frame_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            blend_max_width: 800,
            gray_max_pixels: 500,
            animation_step: 0.02,
            animation_frame_ms: 100,
        }
    }
}
