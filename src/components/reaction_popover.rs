//! Reaction picker popover, one per post.
//!
//! Drives the whole popover lifecycle against the popover store: opening
//! fetches page 1 of the emoji grid and focuses the search field, typing
//! runs a debounced search, Enter searches immediately and submits the
//! first visible entry, Escape closes. Pagination and search replace only
//! the grid region; the search bar keeps its DOM identity throughout.

use dioxus::prelude::*;

use crate::hooks::use_debouncer;
use crate::stores::popover_store::{
    self, plan_enter, popover_body_id, restarts_debounce, search_input_id, set_query, GridState,
    POPOVERS, POPOVER_TRIGGERS,
};
use crate::stores::reaction_store;

/// Quiet period after the last keystroke before a search fires
const SEARCH_DEBOUNCE_MS: u32 = 250;

#[derive(Props, Clone, PartialEq)]
pub struct ReactionPopoverProps {
    pub post_id: u64,
}

#[component]
pub fn ReactionPopover(props: ReactionPopoverProps) -> Element {
    let post_id = props.post_id;
    let debouncer = use_debouncer();
    let trigger_id = use_signal(|| format!("reaction-trigger-{}", uuid::Uuid::new_v4()));

    // Drop popover state if the post leaves the page while the menu is open
    use_drop(move || popover_store::close(post_id));

    let state = POPOVERS.read().get(&post_id).cloned();
    let is_open = state.is_some();

    let debouncer_toggle = debouncer.clone();
    let debouncer_keys = debouncer.clone();

    rsx! {
        div {
            class: "relative inline-block",

            // Trigger control
            button {
                id: "{trigger_id}",
                class: "px-2 py-1 text-sm text-gray-500 hover:text-gray-700 hover:bg-gray-100 rounded transition",
                title: "Add reaction",
                onclick: move |e: MouseEvent| {
                    e.stop_propagation();
                    if is_open {
                        debouncer_toggle.cancel();
                        popover_store::close(post_id);
                    } else {
                        POPOVER_TRIGGERS.write().insert(post_id, trigger_id.read().clone());
                        spawn(async move {
                            popover_store::open(post_id).await;
                        });
                    }
                },
                "😀+"
            }

            if let Some(state) = state {
                div {
                    id: popover_body_id(post_id),
                    class: "absolute top-full left-0 mt-2 w-72 bg-white border border-gray-200 rounded-xl shadow-2xl z-50",
                    onclick: move |e: MouseEvent| e.stop_propagation(),

                    // Search bar; keeps DOM identity across grid swaps
                    div {
                        class: "p-2 border-b border-gray-200",
                        input {
                            id: search_input_id(post_id),
                            r#type: "text",
                            class: "w-full px-3 py-1.5 border border-gray-300 rounded-lg text-sm focus:outline-none focus:ring-2 focus:ring-blue-500",
                            placeholder: "Search emojis...",
                            value: "{state.query}",
                            oninput: move |evt| {
                                set_query(&mut POPOVERS.write(), post_id, evt.value());
                            },
                            onkeydown: move |evt: Event<KeyboardData>| {
                                match evt.key() {
                                    Key::Enter => {
                                        evt.prevent_default();
                                        debouncer_keys.cancel();
                                        let first = POPOVERS
                                            .read()
                                            .get(&post_id)
                                            .map(|s| plan_enter(s).1);
                                        // Search goes out first; the submission does
                                        // not wait for its response, so it reflects
                                        // the grid as currently visible
                                        spawn(async move {
                                            popover_store::run_search(post_id).await;
                                        });
                                        if let Some(Some(shortcode)) = first {
                                            spawn(async move {
                                                reaction_store::submit(post_id, shortcode, false).await;
                                            });
                                        }
                                    }
                                    Key::Escape => {
                                        debouncer_keys.cancel();
                                        popover_store::close(post_id);
                                    }
                                    // Any other keystroke, editing or not,
                                    // restarts the quiet-period timer
                                    key if restarts_debounce(&key) => {
                                        let token = debouncer_keys.bump();
                                        let debouncer = debouncer_keys.clone();
                                        spawn(async move {
                                            if debouncer.wait(token, SEARCH_DEBOUNCE_MS).await {
                                                popover_store::run_search(post_id).await;
                                            }
                                        });
                                    }
                                    _ => {}
                                }
                            }
                        }
                    }

                    // Grid region: the only part pagination and search replace
                    match &state.grid {
                        GridState::Loading => rsx! {
                            div {
                                class: "flex items-center justify-center py-8 text-gray-400 text-sm",
                                "Loading emojis..."
                            }
                        },
                        GridState::Loaded(page) => rsx! {
                            if page.entries.is_empty() {
                                div {
                                    class: "flex flex-col items-center justify-center py-8 text-gray-400",
                                    span { class: "text-2xl mb-1", "🔍" }
                                    p { class: "text-sm", "No emojis found" }
                                }
                            } else {
                                div {
                                    class: "grid grid-cols-6 gap-1 p-2 max-h-56 overflow-y-auto",
                                    for (idx, entry) in page.entries.iter().enumerate() {
                                        {
                                            let shortcode = entry.shortcode.clone();
                                            let title_text = format!(":{}:", entry.shortcode);
                                            let image_url = entry.image_url.clone();
                                            rsx! {
                                                button {
                                                    key: "emoji-{idx}",
                                                    class: "p-1 rounded hover:bg-gray-100 hover:scale-110 transition-transform flex items-center justify-center",
                                                    title: "{title_text}",
                                                    onclick: move |_| {
                                                        let shortcode = shortcode.clone();
                                                        spawn(async move {
                                                            reaction_store::submit(post_id, shortcode, false).await;
                                                        });
                                                    },
                                                    img {
                                                        src: "{image_url}",
                                                        alt: "{title_text}",
                                                        class: "w-7 h-7 object-contain",
                                                        loading: "lazy"
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }

                            if page.pages > 1 {
                                {
                                    let current = page.page;
                                    let has_prev = page.has_prev();
                                    let has_next = page.has_next();
                                    rsx! {
                                        div {
                                            class: "flex items-center justify-between px-3 py-2 border-t border-gray-200 text-sm",
                                            button {
                                                class: "px-2 py-0.5 rounded hover:bg-gray-100 disabled:opacity-40 disabled:cursor-not-allowed",
                                                disabled: !has_prev,
                                                onclick: move |_| {
                                                    spawn(async move {
                                                        popover_store::change_page(post_id, current - 1).await;
                                                    });
                                                },
                                                "‹"
                                            }
                                            span {
                                                class: "text-gray-500",
                                                "{page.page} / {page.pages}"
                                            }
                                            button {
                                                class: "px-2 py-0.5 rounded hover:bg-gray-100 disabled:opacity-40 disabled:cursor-not-allowed",
                                                disabled: !has_next,
                                                onclick: move |_| {
                                                    spawn(async move {
                                                        popover_store::change_page(post_id, current + 1).await;
                                                    });
                                                },
                                                "›"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
