//! Move-thread category selector.
//!
//! A `<select>` whose first option is an inert placeholder; choosing a real
//! category POSTs the move and navigates to the redirect URL the server
//! returns.

use dioxus::prelude::*;

use crate::services::forum_api;

/// Placeholder option label; selecting it is a no-op
pub const PLACEHOLDER: &str = "Move thread to";

#[derive(Props, Clone, PartialEq)]
pub struct CategorySelectProps {
    pub thread_id: u64,
    /// Category titles the thread can move into
    pub categories: Vec<String>,
}

#[component]
pub fn CategorySelect(props: CategorySelectProps) -> Element {
    let thread_id = props.thread_id;

    rsx! {
        select {
            class: "px-2 py-1 border border-gray-300 rounded text-sm bg-white",
            onchange: move |evt| {
                let value = evt.value();
                if value == PLACEHOLDER {
                    return;
                }
                spawn(async move {
                    match forum_api::move_thread(thread_id, &value).await {
                        Ok(redirect) => navigate_to(&redirect),
                        Err(e) => {
                            log::warn!("Move failed for thread {}: {}", thread_id, e);
                        }
                    }
                });
            },

            option { value: "{PLACEHOLDER}", "{PLACEHOLDER}" }
            for (idx, category) in props.categories.iter().enumerate() {
                option {
                    key: "category-{idx}",
                    value: "{category}",
                    "{category}"
                }
            }
        }
    }
}

fn navigate_to(url: &str) {
    #[cfg(target_family = "wasm")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                log::error!("Navigation to {} failed: {:?}", url, e);
            }
        }
    }
    #[cfg(not(target_family = "wasm"))]
    let _ = url;
}
