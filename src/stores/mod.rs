pub mod popover_store;
pub mod reaction_store;
