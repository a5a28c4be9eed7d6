// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bildwerk — classroom image-mathematics demos.
//
// Entry point. Initialises logging, the shared decode cache, app state, and
// launches the Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::dissolve::Dissolve;
use pages::grayscale::Grayscale;
use pages::home::Home;

use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Bildwerk starting");

    dioxus::launch(app);
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
enum Route {
    #[layout(TabLayout)]
    #[route("/")]
    Home {},
    #[route("/dissolve")]
    Dissolve {},
    #[route("/grayscale")]
    Grayscale {},
}

/// Root component.
fn app() -> Element {
    let svc = use_hook(AppServices::new);

    // Provide services and state as context for all pages
    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(state::AppState::new()));

    rsx! {
        Router::<Route> {}
    }
}

/// Persistent bottom tab layout wrapping all pages.
#[component]
fn TabLayout() -> Element {
    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, sans-serif;",

            // Page content
            div { class: "page-content",
                style: "flex: 1; overflow-y: auto; padding: 16px;",
                Outlet::<Route> {}
            }

            // Bottom tab bar
            nav { class: "tab-bar",
                style: "display: flex; justify-content: space-around; padding: 8px 0; border-top: 1px solid #e0e0e0; background: #fafafa;",
                TabButton { to: Route::Home {}, label: "Home", icon: "H" }
                TabButton { to: Route::Dissolve {}, label: "Dissolve", icon: "D" }
                TabButton { to: Route::Grayscale {}, label: "Grayscale", icon: "G" }
            }
        }
    }
}

#[component]
fn TabButton(to: Route, label: &'static str, icon: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "display: flex; flex-direction: column; align-items: center; text-decoration: none; color: #333; font-size: 12px;",
            span { style: "font-size: 20px;", "{icon}" }
            span { "{label}" }
        }
    }
}
