// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Bildwerk classroom demos.

use serde::{Deserialize, Serialize};

use crate::error::{BildwerkError, Result};

/// Session state of the dissolve animation.
///
/// `alpha` is the mix ratio in [0, 1]; `running` is the only cancellation
/// mechanism for the animation task. Invariant: `alpha` never leaves [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendState {
    /// Current mix ratio (weight of the second image).
    pub alpha: f32,
    /// Whether the animation task should keep stepping.
    pub running: bool,
}

impl BlendState {
    pub fn new() -> Self {
        Self {
            alpha: 0.0,
            running: false,
        }
    }

    /// Set the mix ratio directly (manual slider). Clamps to [0, 1] and
    /// stops playback — manual control and the animation never fight.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = if alpha.is_finite() {
            alpha.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.running = false;
    }

    /// Flip play/pause. Resuming from a finished animation rewinds to 0.
    pub fn toggle_playback(&mut self) {
        self.running = !self.running;
        if self.running && self.alpha >= 1.0 {
            self.alpha = 0.0;
        }
    }

    /// Take one discrete animation step of the given size.
    ///
    /// Clamps at 1.0 and clears `running` when the end is reached. Returns
    /// whether the animation should continue; stepping while paused is a
    /// no-op returning `false`.
    pub fn advance(&mut self, step: f32) -> bool {
        if !self.running {
            return false;
        }
        self.alpha += step;
        if self.alpha >= 1.0 {
            self.alpha = 1.0;
            self.running = false;
        }
        self.running
    }
}

impl Default for BlendState {
    fn default() -> Self {
        Self::new()
    }
}

/// A validated downsample target.
///
/// Constructed only through the clamping constructors, so a held value is
/// always at least 1x1 and within the feature's cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetResolution {
    pub width: u32,
    pub height: u32,
}

impl TargetResolution {
    /// Validate a target where both axes share one cap (grayscale demo).
    ///
    /// Axes of 0 are rejected; axes above `cap` are clamped to it.
    pub fn clamped(width: u32, height: u32, cap: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BildwerkError::InvalidResolution { width, height });
        }
        Ok(Self {
            width: width.min(cap),
            height: height.min(cap),
        })
    }

    /// Validate a target where only the width is capped (dissolve demo —
    /// the height follows the chosen aspect freely).
    pub fn clamped_width(width: u32, height: u32, width_cap: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(BildwerkError::InvalidResolution { width, height });
        }
        Ok(Self {
            width: width.min(width_cap),
            height,
        })
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl std::fmt::Display for TargetResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Row-major grid of averaged pixel intensities at the downsampled
/// resolution. This is the payload of the spreadsheet export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrayMatrix {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayMatrix {
    /// Wrap a row-major intensity buffer, checking the shape.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if data.len() != (width as usize) * (height as usize) {
            return Err(BildwerkError::MatrixShape {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Intensity at (x, y). Panics on out-of-bounds, like slice indexing.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Iterate rows top to bottom, each `width` cells wide.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.width as usize)
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_steps_and_clamps_at_one() {
        let mut state = BlendState::new();
        state.running = true;

        // Binary-exact step: four steps of 0.25 land exactly on 1.0, and
        // running must clear on the step that reaches it, not after.
        for n in 1..4 {
            assert!(state.advance(0.25), "step {n} should keep running");
            assert!(state.alpha < 1.0);
        }
        assert!(!state.advance(0.25));
        assert_eq!(state.alpha, 1.0);
        assert!(!state.running);
    }

    #[test]
    fn default_step_terminates_on_exactly_one() {
        let mut state = BlendState::new();
        state.running = true;

        let mut steps = 1;
        while state.advance(0.02) {
            steps += 1;
            assert!(steps < 100, "animation failed to terminate");
        }
        assert_eq!(state.alpha, 1.0);
        assert!(!state.running);
        // 0.02 is not binary-exact; accumulation crosses 1.0 after 50
        // steps give or take one ulp's worth of drift.
        assert!((49..=51).contains(&steps), "took {steps} steps");
    }

    #[test]
    fn advance_overshoot_clamps() {
        let mut state = BlendState {
            alpha: 0.95,
            running: true,
        };
        assert!(!state.advance(0.5));
        assert_eq!(state.alpha, 1.0);
        assert!(!state.running);
    }

    #[test]
    fn advance_while_paused_is_noop() {
        let mut state = BlendState {
            alpha: 0.4,
            running: false,
        };
        assert!(!state.advance(0.02));
        assert_eq!(state.alpha, 0.4);
    }

    #[test]
    fn toggle_from_finished_rewinds() {
        let mut state = BlendState {
            alpha: 1.0,
            running: false,
        };
        state.toggle_playback();
        assert!(state.running);
        assert_eq!(state.alpha, 0.0);
    }

    #[test]
    fn toggle_mid_animation_pauses_in_place() {
        let mut state = BlendState {
            alpha: 0.3,
            running: true,
        };
        state.toggle_playback();
        assert!(!state.running);
        assert_eq!(state.alpha, 0.3);
    }

    #[test]
    fn set_alpha_clamps_and_stops() {
        let mut state = BlendState {
            alpha: 0.2,
            running: true,
        };
        state.set_alpha(1.7);
        assert_eq!(state.alpha, 1.0);
        assert!(!state.running);

        state.set_alpha(-0.5);
        assert_eq!(state.alpha, 0.0);
    }

    #[test]
    fn resolution_clamps_above_cap() {
        let res = TargetResolution::clamped(501, 10, 500).unwrap();
        assert_eq!(res.width, 500);
        assert_eq!(res.height, 10);
    }

    #[test]
    fn resolution_rejects_zero_axis() {
        assert!(TargetResolution::clamped(0, 10, 500).is_err());
        assert!(TargetResolution::clamped(10, 0, 500).is_err());
        assert!(TargetResolution::clamped_width(0, 10, 800).is_err());
    }

    #[test]
    fn width_only_clamp_leaves_height_alone() {
        let res = TargetResolution::clamped_width(900, 1200, 800).unwrap();
        assert_eq!(res.width, 800);
        assert_eq!(res.height, 1200);
    }

    #[test]
    fn matrix_shape_is_checked() {
        assert!(GrayMatrix::from_raw(3, 2, vec![0; 6]).is_ok());
        assert!(GrayMatrix::from_raw(3, 2, vec![0; 5]).is_err());
    }

    #[test]
    fn matrix_rows_and_get_agree() {
        let matrix = GrayMatrix::from_raw(3, 2, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(matrix.get(0, 0), 1);
        assert_eq!(matrix.get(2, 1), 6);

        let rows: Vec<&[u8]> = matrix.rows().collect();
        assert_eq!(rows, vec![&[1u8, 2, 3][..], &[4u8, 5, 6][..]]);
    }
}
