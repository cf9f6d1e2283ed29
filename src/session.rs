//! The live page held by an editor.
//!
//! The snippet pipeline is a pure function of `(raw, source)`. The session
//! owns the one read-modify-write step around it: feed the current page in as
//! the source, validate what comes back, and only then swap it in.

use crate::error::PagesmithError;
use pagesmith_media::ImageResolver;
use pagesmith_snippets::{merge_with_existing, parse_spread_instructions, process_document};
use pagesmith_store::{PageStore, StoreError, page_title};
use pagesmith_types::{PageDocument, PagePath, ValidationError};
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct EditorSession {
    path: PagePath,
    document: PageDocument,
}

impl EditorSession {
    /// A session over a new, empty page titled after its path.
    pub fn new(path: PagePath) -> Self {
        let mut document = PageDocument::default();
        document.root.props.title = Some(page_title(&path));
        Self { path, document }
    }

    /// A session over an existing document.
    pub fn with_document(path: PagePath, document: PageDocument) -> Self {
        Self { path, document }
    }

    /// Opens the page at `path`, or a new one if the store has none.
    pub fn load(store: &dyn PageStore, path: PagePath) -> Result<Self, StoreError> {
        match store.get(&path)? {
            Some(document) => {
                log::debug!("Loaded page '{}' from {}", path, store.name());
                Ok(Self::with_document(path, document))
            }
            None => {
                log::info!("Page '{}' not found in {}, starting a new one", path, store.name());
                Ok(Self::new(path))
            }
        }
    }

    pub fn path(&self) -> &PagePath {
        &self.path
    }

    pub fn document(&self) -> &PageDocument {
        &self.document
    }

    pub fn into_document(self) -> PageDocument {
        self.document
    }

    /// Applies a generated document.
    ///
    /// The raw text runs through the pipeline with the current page as the
    /// source, is validated, and has its placeholder images resolved. The
    /// page's `root` metadata is kept. On any error the session is left as it
    /// was. Returns the placeholder-to-image map of the resolution batch.
    pub async fn apply_generated(
        &mut self,
        raw: &str,
        images: &ImageResolver,
    ) -> Result<BTreeMap<String, String>, PagesmithError> {
        let source = self.document.to_value()?;
        let processed = process_document(raw, Some(&source));
        let mut document = PageDocument::from_json(&processed)?;
        document.root = self.document.root.clone();

        let resolution = images.resolve(&document.to_json_pretty()?).await;
        if resolution.resolved_count() > 0 {
            match PageDocument::from_json(&resolution.document) {
                Ok(resolved) => document = resolved,
                Err(e) => log::warn!("[IMAGES] Keeping unresolved images: {}", e),
            }
        }

        log::info!(
            "Applied generated page to '{}' ({} nodes)",
            self.path,
            document.node_count()
        );
        self.document = document;
        Ok(resolution.images)
    }

    /// Merges a generated document into the current page along the
    /// `SPREAD_PATHS:` listed in `instructions`. Without such a line the
    /// generated document replaces the page.
    pub fn merge_generated(&mut self, raw: &str, instructions: &str) -> Result<(), PagesmithError> {
        let paths = parse_spread_instructions(instructions);
        let existing = self.document.to_value()?;
        let processed = process_document(raw, Some(&existing));
        let generated: serde_json::Value = serde_json::from_str(&processed)?;

        let merged = merge_with_existing(Some(&existing), Some(&generated), &paths);
        let document = PageDocument::from_value(merged)?;
        log::debug!("Merged generated page along {} paths", paths.len());
        self.document = document;
        Ok(())
    }

    /// Installs a document emitted by the editor after validating it.
    pub fn apply_edited(&mut self, document: PageDocument) -> Result<(), ValidationError> {
        document.validate()?;
        self.document = document;
        Ok(())
    }

    /// Writes the current page to `store`.
    pub fn publish(&self, store: &dyn PageStore) -> Result<(), StoreError> {
        store.put(&self.path, self.document.clone())
    }
}
