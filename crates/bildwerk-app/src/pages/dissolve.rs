// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dissolve page — cross-fade two images, manually or on a timer.
//
// The animation is one cooperative async task: sleep a frame, take one
// `BlendState::advance` step, let the memo below redraw the result panel.
// The `running` flag is the only cancellation mechanism; the task re-checks
// it (inside `advance`) before every step.

use dioxus::prelude::*;

use bildwerk_core::TargetResolution;

use crate::pages::pick_image_file;
use crate::services::app_services::AppServices;
use crate::state::{AppState, UploadSlot};

#[component]
pub fn Dissolve() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut target_w = use_signal(|| 0u32);
    let mut target_h = use_signal(|| 0u32);
    let mut auto_mode = use_signal(|| false);
    let mut status_msg = use_signal(|| Option::<String>::None);
    // True while a stepping task is alive; a pause/resume inside one frame
    // delay must not stack a second task on top of the first.
    let mut anim_task_live = use_signal(|| false);

    // Recomputes whenever the sources, the target box, or alpha change —
    // each animation step lands here and redraws only the result panel.
    let svc_blend = svc.clone();
    let blended = use_memo(move || {
        let st = state.read();
        let (Some(a), Some(b)) = (
            st.dissolve_sources[0].as_ref(),
            st.dissolve_sources[1].as_ref(),
        ) else {
            return None;
        };
        let width = *target_w.read();
        let height = *target_h.read();
        if width == 0 || height == 0 {
            return None;
        }
        let target = match TargetResolution::clamped_width(width, height, st.config.blend_max_width)
        {
            Ok(t) => t,
            Err(e) => return Some(Err(e.to_string())),
        };
        Some(
            svc_blend
                .blend_data_url(&a.bytes, &b.bytes, target, st.blend.alpha)
                .map_err(|e| e.to_string()),
        )
    });

    // One picker closure per upload slot; slot 0 also derives the default
    // target box from its dimensions (width capped, height proportional).
    let pick = |idx: usize| {
        let svc = svc.clone();
        move |_: MouseEvent| match pick_image_file() {
            Ok(Some((name, bytes))) => match svc.image_dimensions(&bytes) {
                Ok((w, h)) => {
                    if idx == 0 {
                        let cap = state.read().config.blend_max_width;
                        let default_w = w.min(cap);
                        let default_h =
                            ((u64::from(h) * u64::from(default_w) / u64::from(w)).max(1)) as u32;
                        target_w.set(default_w);
                        target_h.set(default_h);
                    }
                    tracing::info!(file = %name, width = w, height = h, slot = idx, "dissolve source loaded");
                    state.write().dissolve_sources[idx] = Some(UploadSlot { name, bytes });
                    status_msg.set(None);
                }
                Err(e) => status_msg.set(Some(format!("Could not decode {name}: {e}"))),
            },
            Ok(None) => {}
            Err(e) => status_msg.set(Some(format!("Error: {e}"))),
        }
    };
    let pick_first = pick(0);
    let pick_second = pick(1);

    let both_loaded = state
        .read()
        .dissolve_sources
        .iter()
        .all(Option::is_some);
    let blend_cap = state.read().config.blend_max_width;

    rsx! {
        div {
            h1 { "Dissolve" }
            p { style: "color: #666;",
                "Every output pixel is a weighted average: a·(1−α) + b·α."
            }

            // Upload slots
            div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px; margin: 16px 0;",
                SourceButton {
                    label: "First image",
                    filename: state.read().dissolve_sources[0].as_ref().map(|s| s.name.clone()),
                    onpick: pick_first,
                }
                SourceButton {
                    label: "Second image",
                    filename: state.read().dissolve_sources[1].as_ref().map(|s| s.name.clone()),
                    onpick: pick_second,
                }
            }

            if !both_loaded {
                p { style: "text-align: center; color: #888; margin: 48px 0;",
                    "Load two images above to start the dissolve."
                }
            } else {
                div { style: "display: grid; grid-template-columns: 1fr 2fr 1fr; gap: 16px;",

                    // -- Controls column --
                    div {
                        h3 { "Settings" }
                        p { style: "color: #888; font-size: 13px;", "Target resolution" }
                        div { style: "display: flex; gap: 8px;",
                            NumberField {
                                label: "Width",
                                value: *target_w.read(),
                                min: 10,
                                max: blend_cap,
                                onchange: move |v| target_w.set(v),
                            }
                            NumberField {
                                label: "Height",
                                value: *target_h.read(),
                                min: 10,
                                max: 10_000,
                                onchange: move |v| target_h.set(v),
                            }
                        }

                        label { style: "display: flex; align-items: center; gap: 8px; margin: 16px 0 8px 0;",
                            input {
                                r#type: "checkbox",
                                checked: *auto_mode.read(),
                                onchange: move |evt| {
                                    auto_mode.set(evt.checked());
                                    if !evt.checked() {
                                        // Switching to manual always pauses.
                                        state.write().blend.running = false;
                                    }
                                },
                            }
                            "Animate"
                        }

                        if *auto_mode.read() {
                            button {
                                style: "width: 100%; padding: 10px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white;",
                                onclick: move |_| {
                                    let started = {
                                        let mut st = state.write();
                                        st.blend.toggle_playback();
                                        st.blend.running
                                    };
                                    if started && !*anim_task_live.read() {
                                        let (step, delay) = {
                                            let st = state.read();
                                            (st.config.animation_step, st.config.animation_frame_ms)
                                        };
                                        tracing::info!(step, delay_ms = delay, "dissolve animation started");
                                        anim_task_live.set(true);
                                        spawn(async move {
                                            loop {
                                                tokio::time::sleep(
                                                    std::time::Duration::from_millis(delay),
                                                )
                                                .await;
                                                if !state.write().blend.advance(step) {
                                                    break;
                                                }
                                            }
                                            anim_task_live.set(false);
                                            tracing::debug!("dissolve animation stopped");
                                        });
                                    }
                                },
                                "Play / Pause"
                            }
                            {
                                let st = state.read();
                                let label = if st.blend.running {
                                    format!("Playing: α = {:.2}", st.blend.alpha)
                                } else {
                                    format!("Paused at α = {:.2}", st.blend.alpha)
                                };
                                let color = if st.blend.running { "#34c759" } else { "#888" };
                                rsx! {
                                    p { style: "color: {color}; font-size: 14px;", "{label}" }
                                }
                            }
                        } else {
                            {
                                let alpha = state.read().blend.alpha;
                                let alpha_label = format!("{alpha:.2}");
                                let percent = (alpha * 100.0).round() as i32;
                                rsx! {
                                    label { style: "display: block; font-size: 13px; color: #888;",
                                        "Weight α = {alpha_label}"
                                    }
                                    input {
                                        r#type: "range",
                                        style: "width: 100%;",
                                        min: "0",
                                        max: "100",
                                        step: "1",
                                        value: "{percent}",
                                        oninput: move |evt| {
                                            if let Ok(v) = evt.value().parse::<f32>() {
                                                state.write().blend.set_alpha(v / 100.0);
                                            }
                                        },
                                    }
                                }
                            }
                        }
                    }

                    // -- Result column --
                    div {
                        h3 { "Result" }
                        {
                            match &*blended.read() {
                                Some(Ok(url)) => rsx! {
                                    img {
                                        style: "width: 100%; border-radius: 8px;",
                                        src: "{url}",
                                    }
                                },
                                Some(Err(e)) => rsx! {
                                    p { style: "color: #c62828;", "Blend failed: {e}" }
                                },
                                None => rsx! {
                                    p { style: "color: #888;", "Choose a target resolution." }
                                },
                            }
                        }
                    }

                    // -- Sources column --
                    div {
                        h3 { "Sources" }
                        for slot in state.read().dissolve_sources.iter().flatten() {
                            {
                                let url = slot.data_url();
                                let name = slot.name.clone();
                                rsx! {
                                    img {
                                        style: "width: 100%; border-radius: 8px; margin-bottom: 8px;",
                                        src: "{url}",
                                        title: "{name}",
                                    }
                                }
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

#[component]
fn SourceButton(
    label: &'static str,
    filename: Option<String>,
    onpick: EventHandler<MouseEvent>,
) -> Element {
    let caption = filename.unwrap_or_else(|| "none loaded".into());
    rsx! {
        button {
            style: "padding: 12px; border-radius: 8px; border: 2px dashed #007aff; color: #007aff; background: white; font-size: 14px;",
            onclick: move |evt| onpick.call(evt),
            "{label}"
            span { style: "display: block; color: #888; font-size: 12px; margin-top: 4px;",
                "{caption}"
            }
        }
    }
}

/// Bounded numeric input; out-of-range or unparsable entries are ignored.
#[component]
pub fn NumberField(
    label: &'static str,
    value: u32,
    min: u32,
    max: u32,
    onchange: EventHandler<u32>,
) -> Element {
    rsx! {
        label { style: "display: block; font-size: 12px; color: #888;",
            "{label}"
            input {
                r#type: "number",
                style: "width: 80px; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px; text-align: right; display: block;",
                min: "{min}",
                max: "{max}",
                step: "10",
                value: "{value}",
                onchange: move |evt| {
                    if let Ok(v) = evt.value().parse::<u32>()
                        && v >= min
                        && v <= max
                    {
                        onchange.call(v);
                    }
                },
            }
        }
    }
}
