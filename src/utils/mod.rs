pub mod fragment;
pub mod markup;
pub mod page_context;
