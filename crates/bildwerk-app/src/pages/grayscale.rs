// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Grayscale page — pixelate an image, average the channels, export the
// numbers as a spreadsheet.

use dioxus::prelude::*;

use bildwerk_core::TargetResolution;

use crate::pages::dissolve::NumberField;
use crate::services::app_services::{AppServices, png_data_url};
use crate::state::{AppState, UploadSlot};

#[component]
pub fn Grayscale() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut target_w = use_signal(|| 0u32);
    let mut target_h = use_signal(|| 0u32);
    let mut status_msg = use_signal(|| Option::<String>::None);

    // Preview URL + exportable matrix, recomputed when the source or the
    // target resolution changes.
    let svc_reduce = svc.clone();
    let reduction = use_memo(move || {
        let st = state.read();
        let source = st.gray_source.as_ref()?;
        let width = *target_w.read();
        let height = *target_h.read();
        if width == 0 || height == 0 {
            return None;
        }
        let target = match TargetResolution::clamped(width, height, st.config.gray_max_pixels) {
            Ok(t) => t,
            Err(e) => return Some(Err(e.to_string())),
        };
        let result = svc_reduce
            .reduce_cached(&source.bytes, target)
            .and_then(|r| Ok((png_data_url(&r.preview)?, r.matrix)))
            .map_err(|e| e.to_string());
        Some(result)
    });

    let gray_cap = state.read().config.gray_max_pixels;
    let source_loaded = state.read().gray_source.is_some();
    let original_dims = state
        .read()
        .gray_source
        .as_ref()
        .and_then(|s| svc.image_dimensions(&s.bytes).ok());

    let on_pick = {
        let svc = svc.clone();
        move |_: MouseEvent| match super::pick_image_file() {
            Ok(Some((name, bytes))) => match svc.image_dimensions(&bytes) {
                Ok((w, h)) => {
                    target_w.set(w.min(gray_cap));
                    target_h.set(h.min(gray_cap));
                    tracing::info!(file = %name, width = w, height = h, "grayscale source loaded");
                    state.write().gray_source = Some(UploadSlot { name, bytes });
                    status_msg.set(None);
                }
                Err(e) => status_msg.set(Some(format!("Could not decode {name}: {e}"))),
            },
            Ok(None) => {}
            Err(e) => status_msg.set(Some(format!("Error: {e}"))),
        }
    };

    rsx! {
        div {
            h1 { "Grayscale" }
            p { style: "color: #666;",
                "Pixelate to a coarse grid, average R, G and B per cell, and download the grid as a spreadsheet."
            }

            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: 2px dashed #007aff; color: #007aff; background: white; font-size: 14px; margin: 16px 0;",
                onclick: on_pick,
                "Load image"
                if let Some(ref slot) = state.read().gray_source {
                    span { style: "display: block; color: #888; font-size: 12px; margin-top: 4px;",
                        "{slot.name}"
                    }
                }
            }

            if !source_loaded {
                p { style: "text-align: center; color: #888; margin: 48px 0;",
                    "Load a PNG or JPEG above to see it as numbers."
                }
            } else {
                div { style: "display: grid; grid-template-columns: 1fr 2fr 2fr; gap: 16px;",

                    // -- Controls column --
                    div {
                        h3 { "Resolution" }
                        div { style: "display: flex; gap: 8px;",
                            NumberField {
                                label: "Width",
                                value: *target_w.read(),
                                min: 1,
                                max: gray_cap,
                                onchange: move |v| target_w.set(v),
                            }
                            NumberField {
                                label: "Height",
                                value: *target_h.read(),
                                min: 1,
                                max: gray_cap,
                                onchange: move |v| target_h.set(v),
                            }
                        }

                        hr { style: "margin: 16px 0; border: none; border-top: 1px solid #e0e0e0;" }

                        button {
                            style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #34c759; color: white; font-size: 14px;",
                            disabled: !matches!(&*reduction.read(), Some(Ok(_))),
                            onclick: {
                                let svc = svc.clone();
                                move |_| {
                                    let matrix = match &*reduction.read() {
                                        Some(Ok((_, matrix))) => matrix.clone(),
                                        _ => return,
                                    };
                                    match svc.save_workbook(&matrix) {
                                        Ok(Some(path)) => {
                                            status_msg.set(Some(format!(
                                                "Saved {} to {}",
                                                bildwerk_export::export_filename(&matrix),
                                                path.display()
                                            )));
                                        }
                                        Ok(None) => {
                                            status_msg.set(Some("Export cancelled.".into()));
                                        }
                                        Err(e) => {
                                            tracing::error!(error = %e, "workbook export failed");
                                            status_msg.set(Some(format!("Export failed: {e}")));
                                        }
                                    }
                                }
                            },
                            "Download pixel data (.xlsx)"
                        }
                        p { style: "color: #888; font-size: 12px; text-align: right;",
                            "Up to {gray_cap} px per axis."
                        }
                    }

                    // -- Original column --
                    div {
                        h3 { "Original" }
                        if let Some(ref slot) = state.read().gray_source {
                            {
                                let url = slot.data_url();
                                let caption = match original_dims {
                                    Some((w, h)) => format!("{w}x{h} px"),
                                    None => slot.name.clone(),
                                };
                                rsx! {
                                    img {
                                        style: "width: 100%; border-radius: 8px;",
                                        src: "{url}",
                                    }
                                    p { style: "color: #888; font-size: 13px; text-align: center;",
                                        "{caption}"
                                    }
                                }
                            }
                        }
                    }

                    // -- Result column --
                    div {
                        h3 { "Gray filter" }
                        {
                            match &*reduction.read() {
                                Some(Ok((url, matrix))) => {
                                    let caption = format!("{}x{} px", matrix.width(), matrix.height());
                                    rsx! {
                                        img {
                                            style: "width: 100%; border-radius: 8px; image-rendering: pixelated;",
                                            src: "{url}",
                                        }
                                        p { style: "color: #888; font-size: 13px; text-align: center;",
                                            "{caption}"
                                        }
                                    }
                                }
                                Some(Err(e)) => rsx! {
                                    p { style: "color: #c62828;", "Reduction failed: {e}" }
                                },
                                None => rsx! {
                                    p { style: "color: #888;", "Choose a target resolution." }
                                },
                            }
                        }
                    }
                }
            }

            // Status
            if let Some(ref msg) = *status_msg.read() {
                p { style: "margin-top: 8px; color: #666; font-size: 14px; text-align: center;",
                    "{msg}"
                }
            }
        }
    }
}
