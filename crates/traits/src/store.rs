//! PageStore trait for abstracting page persistence.
//!
//! The editor and the CLI read and write pages through this trait without
//! knowing whether they live in memory or in the flat JSON database.

use pagesmith_types::{PageDocument, PagePath};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for page store operations.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("Failed to access page store '{location}': {message}")]
    AccessFailed { location: String, message: String },

    #[error("Invalid page database: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}

/// A keyed collection of page documents, addressed by URL path.
///
/// # Implementations
///
/// - `InMemoryPageStore`: pages held in memory (tests, previews)
/// - `JsonFilePageStore`: the flat `database.json` file (`pagesmith-store`)
pub trait PageStore: Send + Sync + Debug {
    /// Loads the page stored under `path`, if any.
    fn get(&self, path: &PagePath) -> Result<Option<PageDocument>, StoreError>;

    /// Stores `document` under `path`, replacing any previous page.
    fn put(&self, path: &PagePath, document: PageDocument) -> Result<(), StoreError>;

    /// All stored page paths, sorted.
    fn paths(&self) -> Result<Vec<PagePath>, StoreError>;

    /// Returns a human-readable name for this store (for logging/debugging).
    fn name(&self) -> &'static str;

    /// Like [`PageStore::get`], but a missing page is an error.
    fn require(&self, path: &PagePath) -> Result<PageDocument, StoreError> {
        self.get(path)?
            .ok_or_else(|| StoreError::NotFound(path.to_string()))
    }
}

/// An in-memory page store.
#[derive(Debug, Default)]
pub struct InMemoryPageStore {
    pages: RwLock<HashMap<PagePath, PageDocument>>,
}

impl InMemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove a page from the store.
    ///
    /// Returns `None` if the lock is poisoned or the page doesn't exist.
    pub fn remove(&self, path: &PagePath) -> Option<PageDocument> {
        self.pages.write().ok()?.remove(path)
    }

    /// Get the number of pages in the store.
    ///
    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.pages.read().map(|p| p.len()).unwrap_or(0)
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.pages.read().map(|p| p.is_empty()).unwrap_or(true)
    }

    fn poisoned(path: &PagePath) -> StoreError {
        StoreError::AccessFailed {
            location: path.to_string(),
            message: "page store lock poisoned".to_string(),
        }
    }
}

impl PageStore for InMemoryPageStore {
    fn get(&self, path: &PagePath) -> Result<Option<PageDocument>, StoreError> {
        let pages = self.pages.read().map_err(|_| Self::poisoned(path))?;
        Ok(pages.get(path).cloned())
    }

    fn put(&self, path: &PagePath, document: PageDocument) -> Result<(), StoreError> {
        let mut pages = self.pages.write().map_err(|_| Self::poisoned(path))?;
        pages.insert(path.clone(), document);
        Ok(())
    }

    fn paths(&self) -> Result<Vec<PagePath>, StoreError> {
        let pages = self
            .pages
            .read()
            .map_err(|_| Self::poisoned(&PagePath::home()))?;
        let mut paths: Vec<PagePath> = pages.keys().cloned().collect();
        paths.sort();
        Ok(paths)
    }

    fn name(&self) -> &'static str {
        "InMemoryPageStore"
    }
}
