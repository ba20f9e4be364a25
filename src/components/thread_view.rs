//! Interaction layer for a thread page.
//!
//! Post bodies and thread chrome stay server-rendered; this component
//! mounts the live controls on top of them: reaction bars with their
//! popovers, the thread rename field, the move-thread selector, and the
//! composer's markup toolbar.

use dioxus::prelude::*;

use crate::components::{CategorySelect, MarkupToolbar, ReactionBar, RenameField, RenameTarget};
use crate::stores::reaction_store;
use crate::utils::page_context::read_page_context;

/// Element id of the composer textarea the markup toolbar splices into
const COMPOSER_ID: &str = "post";

#[component]
pub fn ThreadView() -> Element {
    let context = use_hook(read_page_context);

    rsx! {
        div {
            class: "max-w-2xl mx-auto p-4 space-y-4",

            if let Some(thread_id) = context.thread_id {
                div {
                    class: "flex items-center gap-2",
                    RenameField {
                        target: RenameTarget::Thread,
                        target_id: thread_id,
                        initial_name: context.thread_title.clone(),
                    }
                    if !context.categories.is_empty() {
                        CategorySelect {
                            thread_id,
                            categories: context.categories.clone(),
                        }
                    }
                }
            }

            for post_id in context.post_ids.iter().copied() {
                div {
                    key: "post-{post_id}",
                    class: "border-t border-gray-200 pt-2",
                    ReactionBar {
                        post_id,
                        initial_fragment: reaction_store::server_rendered_fragment(post_id),
                    }
                }
            }

            div {
                class: "space-y-2 pt-4",
                MarkupToolbar { textarea_id: COMPOSER_ID.to_string() }
                textarea {
                    id: COMPOSER_ID,
                    class: "w-full p-3 border border-gray-300 rounded-lg text-sm focus:outline-none focus:ring-2 focus:ring-blue-500",
                    rows: "4",
                    placeholder: "Write a post..."
                }
            }
        }
    }
}
