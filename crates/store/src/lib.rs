//! Page store implementations.
//!
//! This crate provides the flat JSON-file database behind the CLI and editor,
//! plus the helpers that derive display titles from page paths.

mod json_file;
mod title;

pub use json_file::JsonFilePageStore;
pub use title::{page_title, page_title_from_path};

// Re-export the trait surface so callers need only this crate
pub use pagesmith_traits::{InMemoryPageStore, PageStore, StoreError};
