//! Post footer reaction display.
//!
//! Shows the per-type reaction counts for a post and toggles a reaction on
//! click: clicking a type the user already reacted with sends the un-react
//! form of the request. The whole bar re-renders from the fragment the
//! server returns after each toggle; the picker popover lives alongside it.

use dioxus::prelude::*;

use crate::components::ReactionPopover;
use crate::stores::reaction_store::{self, REACTION_DISPLAY};

#[derive(Props, Clone, PartialEq)]
pub struct ReactionBarProps {
    pub post_id: u64,
    /// Reaction display fragment rendered into the page by the server,
    /// used to seed counts before the first toggle
    #[props(default)]
    pub initial_fragment: Option<String>,
}

#[component]
pub fn ReactionBar(props: ReactionBarProps) -> Element {
    let post_id = props.post_id;

    let initial = props.initial_fragment.clone();
    use_effect(move || {
        if let Some(fragment) = &initial {
            reaction_store::seed(post_id, fragment);
        }
    });

    let counts = REACTION_DISPLAY
        .read()
        .get(&post_id)
        .cloned()
        .unwrap_or_default();

    rsx! {
        div {
            class: "flex items-center gap-1 flex-wrap",

            for (idx, reaction) in counts.iter().enumerate() {
                {
                    let reaction_type = reaction.reaction_type.clone();
                    let title_text = format!(":{}:", reaction.reaction_type);
                    let image_url = reaction.image_url.clone();
                    let un_react = reaction.reacted;
                    let pill_class = if un_react {
                        "flex items-center gap-1 px-2 py-0.5 rounded-full border border-blue-400 bg-blue-50 text-sm"
                    } else {
                        "flex items-center gap-1 px-2 py-0.5 rounded-full border border-gray-200 hover:bg-gray-100 text-sm"
                    };
                    rsx! {
                        button {
                            key: "reaction-{idx}",
                            class: "{pill_class}",
                            title: "{title_text}",
                            onclick: move |_| {
                                let reaction_type = reaction_type.clone();
                                spawn(async move {
                                    reaction_store::submit(post_id, reaction_type, un_react).await;
                                });
                            },
                            img {
                                src: "{image_url}",
                                alt: "{title_text}",
                                class: "w-4 h-4 object-contain",
                                loading: "lazy"
                            }
                            span { class: "text-gray-600", "{reaction.count}" }
                        }
                    }
                }
            }

            ReactionPopover { post_id }
        }
    }
}
