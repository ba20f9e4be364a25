// UI Components
// This module contains all reusable UI components

pub mod category_select;
pub mod markup_toolbar;
pub mod reaction_bar;
pub mod reaction_popover;
pub mod rename_field;
pub mod thread_view;

pub use category_select::CategorySelect;
pub use markup_toolbar::MarkupToolbar;
pub use reaction_bar::ReactionBar;
pub use reaction_popover::ReactionPopover;
pub use rename_field::{RenameField, RenameTarget};
pub use thread_view::ThreadView;
