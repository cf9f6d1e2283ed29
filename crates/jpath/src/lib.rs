//! Dotted path resolution over JSON documents.
//!
//! Paths look like `content.0.props.title` or `zones.base-1:children.0`.
//! This is the lookup primitive behind the `{copy(...)}` and `{spread(...)}`
//! placeholders and the merge helpers of the snippet pipeline.

pub mod ast;
pub mod engine;
pub mod error;
mod parser;

// --- Public API ---
pub use ast::{Path, PathSegment};
pub use engine::{assign, select, select_path};
pub use error::JPathError;
pub use parser::{is_segment_char, parse_path};
