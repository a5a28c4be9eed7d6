// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

pub mod dissolve;
pub mod grayscale;
pub mod home;

use bildwerk_core::error::Result;

/// Open a native image-file dialog; `Ok(None)` means the user cancelled.
pub(crate) fn pick_image_file() -> Result<Option<(String, Vec<u8>)>> {
    let Some(path) = rfd::FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg"])
        .pick_file()
    else {
        return Ok(None);
    };
    let bytes = std::fs::read(&path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".into());
    Ok(Some((name, bytes)))
}
