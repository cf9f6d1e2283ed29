//! Placeholder resolution for generated page documents.
//!
//! A generation source (an LLM, or a person typing JSON) emits a loosely
//! structured page with placeholders. The pipeline rewrites it, stage by stage,
//! into a resolved document:
//!
//! 1. [`ids`]: numeric `id`/`parentId` and `{id(n)}` become unique identifiers.
//! 2. [`properties`]: inline property values move into `props.values`.
//! 3. [`references`]: `{copy(path)}` and `{spread(path)}` read from a source document.
//! 4. [`zones`]: `parentId` nesting is flattened into the `zones` map.
//!
//! Every stage maps a JSON string to a JSON string and returns its input
//! unchanged when it cannot parse it.

pub mod error;
pub mod ids;
pub mod merge;
mod number;
pub mod pipeline;
pub mod properties;
pub mod references;
mod stage;
pub mod zones;

pub use error::SnippetError;
pub use ids::{
    IdGenerator, SequentialIds, UuidGenerator, resolve_id_placeholders,
    resolve_id_placeholders_with, resolve_ids, resolve_ids_with,
};
pub use merge::{deep_merge, empty_document, merge_with_existing, parse_spread_instructions};
pub use pipeline::{Pipeline, has_snippet_patterns, process_document, process_page, resolve_snippets};
pub use properties::materialize_properties;
pub use references::{copy, resolve_references, spread};
pub use stage::Stage;
pub use zones::flatten_zones;
