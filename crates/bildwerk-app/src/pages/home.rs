// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page — demo picker.

use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn Home() -> Element {
    rsx! {
        div {
            h1 { "Bildwerk" }
            p { style: "color: #666;",
                "Classroom demos showing images as the number grids they really are."
            }

            div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 12px; margin: 24px 0;",
                DemoCard {
                    to: Route::Dissolve {},
                    title: "Dissolve",
                    blurb: "Cross-fade two images with a weighted average, by hand or animated.",
                }
                DemoCard {
                    to: Route::Grayscale {},
                    title: "Grayscale",
                    blurb: "Shrink an image to a coarse pixel grid, average the channels, and take the numbers home as a spreadsheet.",
                }
            }

            p { style: "color: #888; font-size: 14px;",
                "Nothing is uploaded anywhere; images stay on this machine and are forgotten when the app closes."
            }
        }
    }
}

#[component]
fn DemoCard(to: Route, title: &'static str, blurb: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "display: block; padding: 20px; border: 1px solid #e0e0e0; border-radius: 12px; text-decoration: none; color: #333; background: white;",
            h2 { style: "margin: 0 0 8px 0; font-size: 18px;", "{title}" }
            p { style: "margin: 0; color: #666; font-size: 14px;", "{blurb}" }
        }
    }
}
