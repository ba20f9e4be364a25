//! In-place rename input for threads and custom emoji.
//!
//! Enter commits, losing focus commits. The POST is fire-and-forget; the
//! server re-renders the name on the next page load, so nothing here waits
//! on the response.

use dioxus::prelude::*;

use crate::services::forum_api;

/// What the field renames, deciding which endpoint the commit hits
#[derive(Clone, Copy, PartialEq)]
pub enum RenameTarget {
    Emoji,
    Thread,
}

#[derive(Props, Clone, PartialEq)]
pub struct RenameFieldProps {
    pub target: RenameTarget,
    /// Server id of the emoji or thread being renamed
    pub target_id: u64,
    pub initial_name: String,
    #[props(default = "px-2 py-1 border border-gray-300 rounded text-sm focus:outline-none focus:ring-2 focus:ring-blue-500".to_string())]
    pub class: String,
}

#[component]
pub fn RenameField(props: RenameFieldProps) -> Element {
    let mut name = use_signal(|| props.initial_name.clone());
    let target = props.target;
    let target_id = props.target_id;

    let commit = move || {
        let new_name = name.read().clone();
        spawn(async move {
            let result = match target {
                RenameTarget::Emoji => forum_api::rename_emoji(target_id, &new_name).await,
                RenameTarget::Thread => forum_api::rename_thread(target_id, &new_name).await,
            };
            if let Err(e) = result {
                log::warn!("Rename failed for id {}: {}", target_id, e);
            }
        });
    };

    let commit_on_enter = commit.clone();
    let commit_on_blur = commit;

    rsx! {
        input {
            r#type: "text",
            class: "{props.class}",
            value: "{name}",
            oninput: move |evt| name.set(evt.value()),
            onkeydown: move |evt: Event<KeyboardData>| {
                if evt.key() == Key::Enter {
                    commit_on_enter();
                }
            },
            onblur: move |_| commit_on_blur()
        }
    }
}
