//! Per-post reaction popover state.
//!
//! Each open popover is one entry in a registry keyed by post id; opening a
//! second popover for the same post replaces the first's state, closing one
//! discards its state entirely. The pure transition functions operate on a
//! plain map so they can be tested off-browser; the async operations wire
//! them to the fetch layer and the global signal.
//!
//! Grid fetches race: a later keystroke's search can start before an earlier
//! page fetch lands. Every fetch captures a per-popover sequence number at
//! request start and a response only applies while its number is still the
//! latest, so a stale response never overwrites newer grid state.

use std::collections::HashMap;

use dioxus::prelude::*;

use crate::services::forum_api::{self, GridRequest};
use crate::utils::fragment::{parse_grid, GridPage};

/// Grid region of one popover
#[derive(Debug, Clone, PartialEq)]
pub enum GridState {
    /// First fetch has not landed yet
    Loading,
    /// Latest applied fragment (empty entries = "no results")
    Loaded(GridPage),
}

/// State record for one open popover
#[derive(Debug, Clone, PartialEq)]
pub struct PopoverState {
    pub query: String,
    pub grid: GridState,
    fetch_seq: u64,
}

impl PopoverState {
    fn new() -> Self {
        Self {
            query: String::new(),
            grid: GridState::Loading,
            fetch_seq: 0,
        }
    }

    pub fn grid_page(&self) -> Option<&GridPage> {
        match &self.grid {
            GridState::Loaded(page) => Some(page),
            GridState::Loading => None,
        }
    }
}

/// Registry of open popovers, keyed by post id
pub static POPOVERS: GlobalSignal<HashMap<u64, PopoverState>> = Signal::global(HashMap::new);

/// Trigger element ids for the outside-click dispatcher, keyed by post id
pub static POPOVER_TRIGGERS: GlobalSignal<HashMap<u64, String>> = Signal::global(HashMap::new);

/// The historical outside-click dismissal closed popovers while the user was
/// paginating inside the menu, so it ships disabled; Escape and the close
/// control are the supported dismissal paths.
pub const OUTSIDE_CLICK_DISMISS_ENABLED: bool = false;

/// Element id of the search field inside a post's popover
pub fn search_input_id(post_id: u64) -> String {
    format!("emoji-search-{}", post_id)
}

// ---- pure transitions ----

/// Insert a fresh state record, replacing any existing popover for the post
pub fn open_state(map: &mut HashMap<u64, PopoverState>, post_id: u64) {
    map.insert(post_id, PopoverState::new());
}

pub fn close_state(map: &mut HashMap<u64, PopoverState>, post_id: u64) {
    map.remove(&post_id);
}

/// Reserve the next fetch sequence number for a post, or `None` when its
/// popover is no longer open
pub fn begin_fetch(map: &mut HashMap<u64, PopoverState>, post_id: u64) -> Option<u64> {
    let state = map.get_mut(&post_id)?;
    state.fetch_seq += 1;
    Some(state.fetch_seq)
}

/// Apply a fetched grid if `seq` is still the latest fetch for the post.
/// Returns false when the response was stale or the popover closed.
pub fn apply_grid(
    map: &mut HashMap<u64, PopoverState>,
    post_id: u64,
    seq: u64,
    page: GridPage,
) -> bool {
    match map.get_mut(&post_id) {
        Some(state) if state.fetch_seq == seq => {
            state.grid = GridState::Loaded(page);
            true
        }
        _ => false,
    }
}

pub fn set_query(map: &mut HashMap<u64, PopoverState>, post_id: u64, query: String) {
    if let Some(state) = map.get_mut(&post_id) {
        state.query = query;
    }
}

/// Plan the grid request for a search: an empty query resets to page 1 of
/// the default listing, exactly as if `change_page(post_id, 1)` were called
pub fn plan_search(query: &str) -> GridRequest {
    if query.is_empty() {
        GridRequest::Menu { page: 1 }
    } else {
        GridRequest::Search {
            query: query.to_string(),
        }
    }
}

/// Plan the Enter-key flow from the popover's current state: the search
/// request to issue, and the first entry of the grid as it is *currently*
/// visible. The submission deliberately does not wait for the search
/// response, so it reflects the pre-search grid.
pub fn plan_enter(state: &PopoverState) -> (GridRequest, Option<String>) {
    let request = plan_search(&state.query);
    let first = state
        .grid_page()
        .and_then(|p| p.first_shortcode())
        .map(String::from);
    (request, first)
}

/// Containment test for the outside-click dispatcher: close only when the
/// click hit neither the trigger, nor anything inside it, nor anything
/// inside an open popover body
pub fn should_dismiss(is_trigger: bool, within_trigger: bool, within_popover: bool) -> bool {
    !is_trigger && !within_trigger && !within_popover
}

/// Every keystroke in the search field restarts the debounce window except
/// the two with immediate behavior: Enter (search now, submit first entry)
/// and Escape (close)
pub fn restarts_debounce(key: &Key) -> bool {
    !matches!(key, Key::Enter | Key::Escape)
}

// ---- async operations ----

/// Open the popover for a post: fresh state, then page 1 of the grid, then
/// focus the embedded search field
pub async fn open(post_id: u64) {
    open_state(&mut POPOVERS.write(), post_id);
    fetch_and_apply(post_id, GridRequest::Menu { page: 1 }).await;
    focus_search(post_id);
}

/// Fetch a specific page of the default listing and replace the grid
/// region. No client-side bounds check; an out-of-range page is the
/// server's concern.
pub async fn change_page(post_id: u64, page: u32) {
    fetch_and_apply(post_id, GridRequest::Menu { page }).await;
    focus_search(post_id);
}

/// Run a search for the popover's current query
pub async fn run_search(post_id: u64) {
    let request = match POPOVERS.read().get(&post_id) {
        Some(state) => plan_search(&state.query),
        None => return,
    };
    fetch_and_apply(post_id, request).await;
}

/// Close the popover and discard its state
pub fn close(post_id: u64) {
    close_state(&mut POPOVERS.write(), post_id);
    POPOVER_TRIGGERS.write().remove(&post_id);
}

async fn fetch_and_apply(post_id: u64, request: GridRequest) {
    let seq = match begin_fetch(&mut POPOVERS.write(), post_id) {
        Some(seq) => seq,
        None => return,
    };

    let fragment = match forum_api::fetch_grid(post_id, &request).await {
        Ok(fragment) => fragment,
        Err(e) => {
            // Best-effort: keep whatever grid was already showing
            log::warn!("Grid fetch failed for post {}: {}", post_id, e);
            return;
        }
    };

    let page = match parse_grid(&fragment) {
        Some(page) => page,
        None => {
            log::warn!("Unparseable grid fragment for post {}", post_id);
            return;
        }
    };

    if !apply_grid(&mut POPOVERS.write(), post_id, seq, page) {
        log::debug!("Discarding stale grid response for post {}", post_id);
    }
}

/// Move focus into a popover's search field
pub fn focus_search(post_id: u64) {
    #[cfg(target_family = "wasm")]
    {
        use wasm_bindgen::JsCast;

        if let Some(window) = web_sys::window() {
            if let Some(document) = window.document() {
                if let Some(element) = document.get_element_by_id(&search_input_id(post_id)) {
                    if let Ok(input) = element.dyn_into::<web_sys::HtmlElement>() {
                        let _ = input.focus();
                    }
                }
            }
        }
    }
    #[cfg(not(target_family = "wasm"))]
    let _ = post_id;
}

/// Outside-click dispatcher: walk the trigger registry and close every
/// popover whose trigger and body are both unrelated to the click target.
/// Only wired when [`OUTSIDE_CLICK_DISMISS_ENABLED`] is set.
#[cfg(target_family = "wasm")]
pub fn dismiss_on_outside_click(target: &web_sys::Element) {
    if !OUTSIDE_CLICK_DISMISS_ENABLED {
        return;
    }

    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return,
    };

    let open_posts: Vec<(u64, String)> = POPOVER_TRIGGERS
        .read()
        .iter()
        .map(|(post_id, trigger_id)| (*post_id, trigger_id.clone()))
        .collect();

    for (post_id, trigger_id) in open_posts {
        let trigger = match document.get_element_by_id(&trigger_id) {
            Some(t) => t,
            None => continue,
        };
        let body = document.get_element_by_id(&popover_body_id(post_id));

        let is_trigger = trigger.is_same_node(Some(target.as_ref()));
        let within_trigger = trigger.contains(Some(target.as_ref()));
        let within_popover = body
            .map(|b| b.contains(Some(target.as_ref())))
            .unwrap_or(false);

        if should_dismiss(is_trigger, within_trigger, within_popover) {
            close(post_id);
        }
    }
}

/// Install the document-level click listener backing the dispatcher. Called
/// once at startup, and only when the dismissal behavior is enabled.
#[cfg(target_family = "wasm")]
pub fn install_outside_click_listener() {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return,
    };

    let handler = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(|evt: web_sys::MouseEvent| {
        if let Some(target) = evt
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        {
            dismiss_on_outside_click(&target);
        }
    });

    if let Err(e) =
        document.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
    {
        log::error!("Failed to install outside-click listener: {:?}", e);
    }
    // Listener lives for the page lifetime
    handler.forget();
}

/// Element id of a post's popover body, used by the outside-click
/// containment test
pub fn popover_body_id(post_id: u64) -> String {
    format!("reaction-popover-{}", post_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fragment::GridEntry;

    fn page(entries: &[&str], page_no: u32, pages: u32) -> GridPage {
        GridPage {
            entries: entries
                .iter()
                .map(|s| GridEntry {
                    shortcode: s.to_string(),
                    image_url: format!("/e/{}.png", s),
                })
                .collect(),
            page: page_no,
            pages,
        }
    }

    #[test]
    fn test_open_then_close_leaves_no_state() {
        let mut map = HashMap::new();
        open_state(&mut map, 42);
        assert!(map.contains_key(&42));
        close_state(&mut map, 42);
        assert!(map.is_empty());
    }

    #[test]
    fn test_reopen_replaces_state() {
        let mut map = HashMap::new();
        open_state(&mut map, 42);
        let seq = begin_fetch(&mut map, 42).unwrap();
        assert!(apply_grid(&mut map, 42, seq, page(&["smile"], 2, 5)));
        set_query(&mut map, 42, "smi".to_string());

        // Second open for the same post: fresh record, not a second popover
        open_state(&mut map, 42);
        assert_eq!(map.len(), 1);
        let state = &map[&42];
        assert_eq!(state.query, "");
        assert_eq!(state.grid, GridState::Loading);
    }

    #[test]
    fn test_begin_fetch_requires_open_popover() {
        let mut map = HashMap::new();
        assert_eq!(begin_fetch(&mut map, 42), None);
    }

    #[test]
    fn test_stale_response_is_suppressed() {
        let mut map = HashMap::new();
        open_state(&mut map, 42);

        let older = begin_fetch(&mut map, 42).unwrap();
        let newer = begin_fetch(&mut map, 42).unwrap();

        // Newer response lands first
        assert!(apply_grid(&mut map, 42, newer, page(&["melon"], 1, 1)));
        // Older response must not overwrite it
        assert!(!apply_grid(&mut map, 42, older, page(&["smile"], 1, 1)));

        let grid = map[&42].grid_page().unwrap();
        assert_eq!(grid.first_shortcode(), Some("melon"));
    }

    #[test]
    fn test_response_after_close_is_dropped() {
        let mut map = HashMap::new();
        open_state(&mut map, 42);
        let seq = begin_fetch(&mut map, 42).unwrap();
        close_state(&mut map, 42);
        assert!(!apply_grid(&mut map, 42, seq, page(&["smile"], 1, 1)));
        assert!(map.is_empty());
    }

    #[test]
    fn test_empty_query_plans_page_one_of_menu() {
        // search("") must be observably identical to change_page(post, 1)
        assert_eq!(plan_search(""), GridRequest::Menu { page: 1 });
        assert_eq!(
            plan_search("smile"),
            GridRequest::Search {
                query: "smile".to_string()
            }
        );
    }

    #[test]
    fn test_plan_enter_uses_pre_search_grid() {
        let mut map = HashMap::new();
        open_state(&mut map, 42);
        let seq = begin_fetch(&mut map, 42).unwrap();
        apply_grid(&mut map, 42, seq, page(&["wave", "melon"], 1, 1));
        set_query(&mut map, 42, "smile".to_string());

        let (request, first) = plan_enter(&map[&42]);
        // The search goes out for the new query...
        assert_eq!(
            request,
            GridRequest::Search {
                query: "smile".to_string()
            }
        );
        // ...but the submission reflects the grid as currently rendered
        assert_eq!(first.as_deref(), Some("wave"));
    }

    #[test]
    fn test_plan_enter_with_no_results_submits_nothing() {
        let mut map = HashMap::new();
        open_state(&mut map, 42);
        let seq = begin_fetch(&mut map, 42).unwrap();
        apply_grid(&mut map, 42, seq, page(&[], 1, 1));
        let (_, first) = plan_enter(&map[&42]);
        assert_eq!(first, None);
    }

    #[test]
    fn test_should_dismiss() {
        // Click on the page background
        assert!(should_dismiss(false, false, false));
        // Click on the trigger itself toggles, never dismisses here
        assert!(!should_dismiss(true, true, false));
        // Click on an icon inside the trigger
        assert!(!should_dismiss(false, true, false));
        // Click inside the popover (e.g. a page-number control)
        assert!(!should_dismiss(false, false, true));
    }

    #[test]
    fn test_outside_click_dismiss_ships_disabled() {
        assert!(!OUTSIDE_CLICK_DISMISS_ENABLED);
    }

    #[test]
    fn test_every_keystroke_restarts_debounce_except_enter_and_escape() {
        assert!(!restarts_debounce(&Key::Enter));
        assert!(!restarts_debounce(&Key::Escape));
        // Non-editing keys count as keystrokes too
        assert!(restarts_debounce(&Key::ArrowDown));
        assert!(restarts_debounce(&Key::Home));
        assert!(restarts_debounce(&Key::Character("s".to_string())));
        assert!(restarts_debounce(&Key::Backspace));
    }
}
