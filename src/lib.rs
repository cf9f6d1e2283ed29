//! pagesmith: turns generated page-builder documents into stable, validated
//! pages.
//!
//! The workspace crates do the work; this crate wires them together with
//! configuration, a top-level error type and the [`EditorSession`] state
//! container used by the CLI.

pub mod config;
pub mod error;
pub mod session;

pub use config::{Loader, PagesmithConfig};
pub use error::PagesmithError;
pub use session::EditorSession;

pub use pagesmith_media::{ImageLookup, ImageResolution, ImageResolver, UnsplashClient};
pub use pagesmith_snippets::{
    Pipeline, merge_with_existing, parse_spread_instructions, process_document, process_page,
};
pub use pagesmith_store::{
    InMemoryPageStore, JsonFilePageStore, PageStore, StoreError, page_title, page_title_from_path,
};
pub use pagesmith_types::{Node, NodeId, PageDocument, PagePath, ValidationError, ZoneKey};
