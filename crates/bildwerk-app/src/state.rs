// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — reactive signals for the Dioxus UI.

use bildwerk_core::{AppConfig, BlendState};

/// One uploaded image file, kept as the raw encoded bytes. Decoding goes
/// through the shared cache so re-renders stay cheap.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSlot {
    /// Original filename, for captions and MIME guessing.
    pub name: String,
    /// Encoded file bytes as picked from disk.
    pub bytes: Vec<u8>,
}

impl UploadSlot {
    /// `data:` URL serving the file bytes as-is to an `img` element.
    pub fn data_url(&self) -> String {
        use base64::Engine;

        let mime = if self.name.to_ascii_lowercase().ends_with(".png") {
            "image/png"
        } else {
            "image/jpeg"
        };
        format!(
            "data:{};base64,{}",
            mime,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// Shared state accessible to all pages via `use_context`.
///
/// Everything here is session-transient; navigating between pages keeps the
/// uploads and the dissolve position, closing the app forgets them.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Numeric policy knobs (resolution caps, animation step/delay).
    pub config: AppConfig,
    /// Dissolve position and playback flag.
    pub blend: BlendState,
    /// The two dissolve sources.
    pub dissolve_sources: [Option<UploadSlot>; 2],
    /// The grayscale demo source.
    pub gray_source: Option<UploadSlot>,
    /// Status message for user feedback.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            blend: BlendState::new(),
            dissolve_sources: [None, None],
            gray_source: None,
            status_message: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
