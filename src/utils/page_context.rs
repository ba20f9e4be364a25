//! Server-provided page context.
//!
//! The forum pages are rendered server-side; the client mounts on top and
//! only drives interactions. The server tells the client what is on the
//! page through data attributes on the mount element:
//!
//! ```html
//! <div id="main"
//!      data-thread-id="7"
//!      data-thread-title="General chat"
//!      data-posts="41,42,43"
//!      data-categories="General|Off-topic|Meta">
//! ```

/// What the server rendered into the current page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContext {
    pub thread_id: Option<u64>,
    pub thread_title: String,
    pub post_ids: Vec<u64>,
    pub categories: Vec<String>,
}

/// Parse a comma-separated id list, skipping anything non-numeric
pub fn parse_id_list(raw: &str) -> Vec<u64> {
    raw.split(',')
        .filter_map(|part| part.trim().parse().ok())
        .collect()
}

/// Parse a pipe-separated name list (names may contain commas)
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Read the context from the mount element's data attributes. Missing
/// attributes fall back to an empty context; the components render nothing
/// for what is not on the page.
pub fn read_page_context() -> PageContext {
    #[cfg(target_family = "wasm")]
    {
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("main"));

        let element = match element {
            Some(e) => e,
            None => return PageContext::default(),
        };

        let attr = |name: &str| element.get_attribute(name);

        return PageContext {
            thread_id: attr("data-thread-id").and_then(|v| v.trim().parse().ok()),
            thread_title: attr("data-thread-title").unwrap_or_default(),
            post_ids: attr("data-posts")
                .map(|v| parse_id_list(&v))
                .unwrap_or_default(),
            categories: attr("data-categories")
                .map(|v| parse_name_list(&v))
                .unwrap_or_default(),
        };
    }
    #[cfg(not(target_family = "wasm"))]
    PageContext::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("41,42,43"), vec![41, 42, 43]);
        assert_eq!(parse_id_list(" 7 , x, 9 "), vec![7, 9]);
        assert!(parse_id_list("").is_empty());
    }

    #[test]
    fn test_parse_name_list() {
        assert_eq!(
            parse_name_list("General|Off-topic, misc|Meta"),
            vec!["General", "Off-topic, misc", "Meta"]
        );
        assert!(parse_name_list(" | ").is_empty());
    }
}
