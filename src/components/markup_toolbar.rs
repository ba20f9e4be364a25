//! BBCode toolbar for the post composer.
//!
//! Each button wraps the composer textarea's current selection in a tag
//! pair, keeps the selection between the tags, and returns focus to the
//! field. The string splicing is in `utils::markup`; this component only
//! does the DOM round trip.

use dioxus::prelude::*;

use crate::utils::markup::{MarkupTag, MARKUP_TAGS};

#[derive(Props, Clone, PartialEq)]
pub struct MarkupToolbarProps {
    /// Element id of the textarea the tags splice into
    pub textarea_id: String,
}

#[component]
pub fn MarkupToolbar(props: MarkupToolbarProps) -> Element {
    rsx! {
        div {
            class: "flex items-center gap-1",

            for tag in MARKUP_TAGS.iter() {
                {
                    let textarea_id = props.textarea_id.clone();
                    rsx! {
                        button {
                            key: "tag-{tag.label}",
                            r#type: "button",
                            class: "px-2 py-1 text-sm border border-gray-300 rounded hover:bg-gray-100 transition",
                            title: "{tag.open}...{tag.close}",
                            onclick: move |_| apply_tag(&textarea_id, tag),
                            "{tag.label}"
                        }
                    }
                }
            }
        }
    }
}

/// Wrap the textarea's selection in the tag pair and restore the selection
fn apply_tag(textarea_id: &str, tag: &MarkupTag) {
    #[cfg(target_family = "wasm")]
    {
        use wasm_bindgen::JsCast;

        use crate::utils::markup::{byte_to_utf16_index, utf16_to_byte_index, wrap_selection};

        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(d) => d,
            None => return,
        };
        let field = match document
            .get_element_by_id(textarea_id)
            .and_then(|e| e.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
        {
            Some(f) => f,
            None => {
                log::warn!("Composer textarea #{} not found", textarea_id);
                return;
            }
        };

        let text = field.value();
        // The DOM reports selection offsets in UTF-16 code units
        let start = field.selection_start().ok().flatten().unwrap_or(0) as usize;
        let end = field.selection_end().ok().flatten().unwrap_or(0) as usize;
        let start = utf16_to_byte_index(&text, start);
        let end = utf16_to_byte_index(&text, end);

        let splice = wrap_selection(&text, start, end, tag);
        let select_start = byte_to_utf16_index(&splice.text, splice.select_start) as u32;
        let select_end = byte_to_utf16_index(&splice.text, splice.select_end) as u32;

        field.set_value(&splice.text);
        let _ = field.focus();
        let _ = field.set_selection_range(select_start, select_end);
    }
    #[cfg(not(target_family = "wasm"))]
    let _ = (textarea_id, tag);
}
