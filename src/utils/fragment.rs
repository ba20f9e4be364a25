//! Parsers for the server-rendered HTML fragments.
//!
//! The server splices no client state into its responses; fragments carry
//! everything in attributes. Two shapes are consumed here:
//!
//! Emoji grid (from `/reaction_menu` and `/search_emojis`):
//!
//! ```html
//! <div class="emoji-grid" post_id="42" page="2" pages="7">
//!   <button class="emoji-choice" name="smile"><img src="/static/emojis/smile.png"></button>
//! </div>
//! ```
//!
//! Reaction display (from `/reactions`):
//!
//! ```html
//! <span class="reaction unReact" name="smile" count="3"><img src="..."></span>
//! ```
//!
//! The `unReact` class marks a reaction the current user already made, so a
//! click on it removes the reaction instead of adding one.

use once_cell::sync::Lazy;
use regex::Regex;

static GRID_CONTAINER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<div[^>]*class="emoji-grid"[^>]*page="(\d+)"[^>]*pages="(\d+)""#)
        .unwrap()
});

static GRID_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<button[^>]*class="emoji-choice"[^>]*name="([^"]*)"[^>]*>\s*<img[^>]*src="([^"]*)""#,
    )
    .unwrap()
});

static REACTION_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"<span[^>]*class="reaction( unReact)?"[^>]*name="([^"]*)"[^>]*count="(\d+)"[^>]*>\s*<img[^>]*src="([^"]*)""#,
    )
    .unwrap()
});

/// One emoji in the picker grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridEntry {
    pub shortcode: String,
    pub image_url: String,
}

/// A parsed grid fragment: the visible entries plus the server's pagination
/// markers. An empty `entries` with a well-formed container is the "no
/// results" state, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct GridPage {
    pub entries: Vec<GridEntry>,
    pub page: u32,
    pub pages: u32,
}

impl GridPage {
    /// Shortcode of the first visible entry, if any. Used by the Enter-key
    /// flow to submit "the first result".
    pub fn first_shortcode(&self) -> Option<&str> {
        self.entries.first().map(|e| e.shortcode.as_str())
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

/// One reaction shown in a post's footer display
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionCount {
    pub reaction_type: String,
    pub image_url: String,
    pub count: u32,
    /// True when the current user already reacted with this type; a click
    /// then sends `unReact=true`.
    pub reacted: bool,
}

/// Parse an emoji grid fragment. Returns `None` when the fragment has no
/// grid container at all (e.g. a server error page), which callers treat as
/// a failed fetch and keep the prior grid.
pub fn parse_grid(fragment: &str) -> Option<GridPage> {
    let container = GRID_CONTAINER.captures(fragment)?;
    let page = container[1].parse().ok()?;
    let pages = container[2].parse().ok()?;

    let entries = GRID_ENTRY
        .captures_iter(fragment)
        .map(|c| GridEntry {
            shortcode: c[1].to_string(),
            image_url: c[2].to_string(),
        })
        .collect();

    Some(GridPage { entries, page, pages })
}

/// Parse a reaction display fragment into its per-type counts
pub fn parse_reaction_bar(fragment: &str) -> Vec<ReactionCount> {
    REACTION_SPAN
        .captures_iter(fragment)
        .map(|c| ReactionCount {
            reacted: c.get(1).is_some(),
            reaction_type: c[2].to_string(),
            count: c[3].parse().unwrap_or(0),
            image_url: c[4].to_string(),
        })
        .collect()
}
