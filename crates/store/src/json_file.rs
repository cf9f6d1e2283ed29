//! File-backed page store.
//!
//! All pages live in one JSON object keyed by URL path:
//!
//! ```json
//! { "/": { "root": {...}, "content": [...], "zones": {...} }, "/about": {...} }
//! ```
//!
//! A missing file is an empty database. Every write rewrites the whole file.

use pagesmith_traits::{PageStore, StoreError};
use pagesmith_types::{PageDocument, PagePath};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A page store persisted as a single JSON file.
#[derive(Debug)]
pub struct JsonFilePageStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the file.
    write_lock: Mutex<()>,
}

impl JsonFilePageStore {
    /// Creates a store over `path`. The file is not touched until first use.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the database file this store reads and writes.
    pub fn file(&self) -> &Path {
        &self.path
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("page database '{}' does not exist yet", self.location());
                return Ok(Map::new());
            }
            Err(e) => {
                return Err(StoreError::AccessFailed {
                    location: self.location(),
                    message: e.to_string(),
                });
            }
        };

        match serde_json::from_str(&text) {
            Ok(Value::Object(pages)) => Ok(pages),
            Ok(_) => Err(StoreError::InvalidFormat(format!(
                "'{}' must hold a JSON object keyed by page path",
                self.location()
            ))),
            Err(e) => Err(StoreError::InvalidFormat(format!(
                "'{}': {}",
                self.location(),
                e
            ))),
        }
    }

    fn write_all(&self, pages: &Map<String, Value>) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(pages)
            .map_err(|e| StoreError::InvalidFormat(e.to_string()))?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, text).map_err(|e| StoreError::AccessFailed {
            location: self.location(),
            message: e.to_string(),
        })
    }
}

impl PageStore for JsonFilePageStore {
    fn get(&self, path: &PagePath) -> Result<Option<PageDocument>, StoreError> {
        let mut pages = self.read_all()?;
        let Some(page) = pages.shift_remove(path.as_str()) else {
            return Ok(None);
        };
        let document = PageDocument::from_value(page)
            .map_err(|e| StoreError::InvalidFormat(format!("page '{}': {}", path, e)))?;
        Ok(Some(document))
    }

    fn put(&self, path: &PagePath, document: PageDocument) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().map_err(|_| StoreError::AccessFailed {
            location: self.location(),
            message: "page store lock poisoned".to_string(),
        })?;

        let value = document
            .to_value()
            .map_err(|e| StoreError::InvalidFormat(e.to_string()))?;
        let mut pages = self.read_all()?;
        pages.insert(path.to_string(), value);
        self.write_all(&pages)?;

        log::info!("Saved page '{}' to {}", path, self.location());
        Ok(())
    }

    fn paths(&self) -> Result<Vec<PagePath>, StoreError> {
        let pages = self.read_all()?;
        let mut paths: Vec<PagePath> = pages
            .keys()
            .filter_map(|key| match PagePath::new(key.as_str()) {
                Ok(path) => Some(path),
                Err(e) => {
                    log::warn!("Ignoring stored page with invalid key: {}", e);
                    None
                }
            })
            .collect();
        paths.sort();
        Ok(paths)
    }

    fn name(&self) -> &'static str {
        "JsonFilePageStore"
    }
}
