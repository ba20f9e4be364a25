pub mod forum_api;
