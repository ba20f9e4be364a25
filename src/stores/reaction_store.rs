//! Reaction display state, one entry per post.
//!
//! The server owns reaction storage; this store only mirrors the display
//! fragment it returns. A successful `/reactions` POST replaces just the
//! affected post's entry, never the popover or anything else on the page.
//! Before the first toggle the counts come from the fragment the server
//! rendered into the page's `#reactions{post_id}` element.

use std::collections::HashMap;

use dioxus::prelude::*;

use crate::services::forum_api;
use crate::utils::fragment::{parse_reaction_bar, ReactionCount};

/// Current reaction counts per post, keyed by post id
pub static REACTION_DISPLAY: GlobalSignal<HashMap<u64, Vec<ReactionCount>>> =
    Signal::global(HashMap::new);

/// Seed a post's display from a server-rendered fragment. A no-op when the
/// post already has an entry, so a late mount never clobbers counts a
/// toggle response already updated.
pub fn seed_display(
    map: &mut HashMap<u64, Vec<ReactionCount>>,
    post_id: u64,
    fragment: &str,
) -> bool {
    if map.contains_key(&post_id) {
        return false;
    }
    map.insert(post_id, parse_reaction_bar(fragment));
    true
}

/// Seed the global display for a post from its server-rendered fragment
pub fn seed(post_id: u64, fragment: &str) {
    seed_display(&mut REACTION_DISPLAY.write(), post_id, fragment);
}

/// Read the reaction display fragment the server rendered into the page
/// for a post (the `#reactions{post_id}` element)
pub fn server_rendered_fragment(post_id: u64) -> Option<String> {
    #[cfg(target_family = "wasm")]
    {
        return web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&format!("reactions{}", post_id)))
            .map(|e| e.inner_html());
    }
    #[cfg(not(target_family = "wasm"))]
    {
        let _ = post_id;
        None
    }
}

/// POST a reaction selection and splice the updated display for the post.
/// Best-effort: on failure the prior display stays.
pub async fn submit(post_id: u64, reaction_type: String, un_react: bool) {
    match forum_api::submit_reaction(post_id, &reaction_type, un_react).await {
        Ok(fragment) => {
            REACTION_DISPLAY
                .write()
                .insert(post_id, parse_reaction_bar(&fragment));
        }
        Err(e) => {
            log::warn!(
                "Reaction submit failed for post {} ({}): {}",
                post_id,
                reaction_type,
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r#"
        <span class="reaction" name="melon" count="12"><img src="/e/melon.png"></span>
        <span class="reaction unReact" name="smile" count="3"><img src="/e/smile.png"></span>"#;

    #[test]
    fn test_seed_display_loads_server_counts() {
        let mut map = HashMap::new();
        assert!(seed_display(&mut map, 42, FRAGMENT));

        let counts = &map[&42];
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].reaction_type, "melon");
        assert_eq!(counts[0].count, 12);
        // The user's own reaction carries the un-react marker, so the
        // next click on it toggles the reaction off
        assert!(counts[1].reacted);
    }

    #[test]
    fn test_seed_display_does_not_overwrite_toggled_counts() {
        let mut map = HashMap::new();
        map.insert(
            42,
            vec![ReactionCount {
                reaction_type: "wave".to_string(),
                image_url: "/e/wave.png".to_string(),
                count: 1,
                reacted: true,
            }],
        );

        assert!(!seed_display(&mut map, 42, FRAGMENT));
        assert_eq!(map[&42].len(), 1);
        assert_eq!(map[&42][0].reaction_type, "wave");
    }

    #[test]
    fn test_seed_display_empty_fragment_is_empty_bar() {
        let mut map = HashMap::new();
        assert!(seed_display(&mut map, 7, ""));
        assert!(map[&7].is_empty());
    }
}
