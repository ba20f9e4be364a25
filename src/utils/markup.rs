//! BBCode markup insertion for the post composer.
//!
//! Pure string splicing lives here so it can be tested off-browser; the
//! textarea glue in the toolbar component converts the DOM's UTF-16
//! selection offsets before calling in.

/// A BBCode tag pair offered by the composer toolbar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkupTag {
    pub label: &'static str,
    pub open: &'static str,
    pub close: &'static str,
}

/// The toolbar's tag set
pub static MARKUP_TAGS: [MarkupTag; 6] = [
    MarkupTag { label: "B", open: "[b]", close: "[/b]" },
    MarkupTag { label: "I", open: "[i]", close: "[/i]" },
    MarkupTag { label: "Quote", open: "[quote]", close: "[/quote]" },
    MarkupTag { label: "Spoiler", open: "[spoiler]", close: "[/spoiler]" },
    MarkupTag { label: "Image", open: "[img]", close: "[/img]" },
    MarkupTag { label: "YouTube", open: "[yt]", close: "[/yt]" },
];

/// Result of wrapping a selection: the new field text and the byte range
/// the selection should move to (the original selection, shifted past the
/// opening tag, so repeated clicks nest).
#[derive(Debug, Clone, PartialEq)]
pub struct Splice {
    pub text: String,
    pub select_start: usize,
    pub select_end: usize,
}

/// Wrap the byte range `start..end` of `text` in the tag pair. Out-of-range
/// or mid-character offsets are clamped to the nearest valid boundary.
pub fn wrap_selection(text: &str, start: usize, end: usize, tag: &MarkupTag) -> Splice {
    let start = clamp_to_char_boundary(text, start);
    let end = clamp_to_char_boundary(text, end.max(start));

    let mut out = String::with_capacity(text.len() + tag.open.len() + tag.close.len());
    out.push_str(&text[..start]);
    out.push_str(tag.open);
    out.push_str(&text[start..end]);
    out.push_str(tag.close);
    out.push_str(&text[end..]);

    Splice {
        text: out,
        select_start: start + tag.open.len(),
        select_end: end + tag.open.len(),
    }
}

fn clamp_to_char_boundary(text: &str, idx: usize) -> usize {
    let mut idx = idx.min(text.len());
    while !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Convert a UTF-16 code-unit offset (as reported by a textarea's
/// `selectionStart`/`selectionEnd`) into a byte offset into `text`
pub fn utf16_to_byte_index(text: &str, utf16_idx: usize) -> usize {
    let mut units = 0;
    for (byte_idx, ch) in text.char_indices() {
        if units >= utf16_idx {
            return byte_idx;
        }
        units += ch.len_utf16();
    }
    text.len()
}

/// Convert a byte offset back into the UTF-16 code-unit offset the DOM
/// selection API expects
pub fn byte_to_utf16_index(text: &str, byte_idx: usize) -> usize {
    text[..clamp_to_char_boundary(text, byte_idx)]
        .chars()
        .map(|c| c.len_utf16())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold() -> MarkupTag {
        MARKUP_TAGS[0]
    }

    #[test]
    fn test_wrap_selection() {
        let splice = wrap_selection("hello world", 6, 11, &bold());
        assert_eq!(splice.text, "hello [b]world[/b]");
        // Selection still covers "world"
        assert_eq!(&splice.text[splice.select_start..splice.select_end], "world");
    }

    #[test]
    fn test_wrap_empty_selection_is_cursor_insert() {
        let splice = wrap_selection("hello", 5, 5, &bold());
        assert_eq!(splice.text, "hello[b][/b]");
        // Cursor lands between the tags
        assert_eq!(splice.select_start, splice.select_end);
        assert_eq!(splice.select_start, "hello[b]".len());
    }

    #[test]
    fn test_wrap_all_tags() {
        for tag in &MARKUP_TAGS {
            let splice = wrap_selection("x", 0, 1, tag);
            assert_eq!(splice.text, format!("{}x{}", tag.open, tag.close));
            assert_eq!(&splice.text[splice.select_start..splice.select_end], "x");
        }
    }

    #[test]
    fn test_wrap_clamps_out_of_range() {
        let splice = wrap_selection("hi", 10, 20, &bold());
        assert_eq!(splice.text, "hi[b][/b]");
    }

    #[test]
    fn test_wrap_clamps_mid_character() {
        // "é" is two bytes; offset 1 lands inside it and must clamp down
        let splice = wrap_selection("é", 1, 1, &bold());
        assert_eq!(splice.text, "[b][/b]é");
    }

    #[test]
    fn test_utf16_round_trip() {
        let text = "a😀b"; // 😀 is 2 UTF-16 units, 4 bytes
        assert_eq!(utf16_to_byte_index(text, 0), 0);
        assert_eq!(utf16_to_byte_index(text, 1), 1);
        assert_eq!(utf16_to_byte_index(text, 3), 5);
        assert_eq!(utf16_to_byte_index(text, 99), text.len());
        assert_eq!(byte_to_utf16_index(text, 5), 3);
        assert_eq!(byte_to_utf16_index(text, text.len()), 4);
    }
}
