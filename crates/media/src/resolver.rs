//! Batch resolution of placeholder images.
//!
//! All placeholder URLs in a document are looked up concurrently (bounded by
//! a semaphore) and spliced in once the whole batch has settled. A failed
//! lookup leaves its placeholder in place; a missing lookup service leaves the
//! whole document untouched.

use crate::extract::{IMAGE_PLACEHOLDER, extract_placeholder_urls};
use pagesmith_traits::ImageLookup;
use regex::Captures;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub const DEFAULT_MAX_CONCURRENT_LOOKUPS: usize = 8;

/// The outcome of one resolution batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageResolution {
    /// The document with every successfully resolved placeholder replaced.
    pub document: String,
    /// Placeholder URL to image URL. Failed lookups map to an empty string.
    pub images: BTreeMap<String, String>,
}

impl ImageResolution {
    fn unchanged(document: &str) -> Self {
        Self {
            document: document.to_string(),
            images: BTreeMap::new(),
        }
    }

    /// Number of placeholders that resolved to an image.
    pub fn resolved_count(&self) -> usize {
        self.images.values().filter(|image| !image.is_empty()).count()
    }
}

#[derive(Debug, Clone)]
pub struct ImageResolver {
    lookup: Option<Arc<dyn ImageLookup>>,
    max_concurrent: usize,
}

impl ImageResolver {
    pub fn new(lookup: Arc<dyn ImageLookup>) -> Self {
        Self {
            lookup: Some(lookup),
            max_concurrent: DEFAULT_MAX_CONCURRENT_LOOKUPS,
        }
    }

    /// A resolver with no lookup service. Every batch degrades to a no-op.
    pub fn disabled() -> Self {
        Self {
            lookup: None,
            max_concurrent: DEFAULT_MAX_CONCURRENT_LOOKUPS,
        }
    }

    /// Caps the number of lookups in flight at once, clamped to
    /// `1..=Semaphore::MAX_PERMITS`.
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.clamp(1, Semaphore::MAX_PERMITS);
        self
    }

    /// Resolves every placeholder image URL in `document`.
    ///
    /// Never fails: lookup errors are logged and reported as empty entries in
    /// [`ImageResolution::images`].
    pub async fn resolve(&self, document: &str) -> ImageResolution {
        let urls = extract_placeholder_urls(document);
        if urls.is_empty() {
            return ImageResolution::unchanged(document);
        }
        let Some(lookup) = &self.lookup else {
            log::warn!(
                "[IMAGES] {} placeholder images left unresolved: no image lookup configured",
                urls.len()
            );
            return ImageResolution::unchanged(document);
        };

        log::info!(
            "[IMAGES] Resolving {} placeholder images via {} (max in-flight: {})",
            urls.len(),
            lookup.name(),
            self.max_concurrent
        );

        let images = self.lookup_all(lookup, urls).await;
        let document = IMAGE_PLACEHOLDER
            .replace_all(document, |caps: &Captures| {
                let placeholder = &caps[0];
                match images.get(placeholder) {
                    Some(image) if !image.is_empty() => image.clone(),
                    _ => placeholder.to_string(),
                }
            })
            .into_owned();

        ImageResolution { document, images }
    }

    async fn lookup_all(
        &self,
        lookup: &Arc<dyn ImageLookup>,
        urls: Vec<String>,
    ) -> BTreeMap<String, String> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks: JoinSet<(String, String)> = JoinSet::new();

        for url in urls {
            let lookup = Arc::clone(lookup);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let image = match semaphore.acquire_owned().await {
                    Ok(_permit) => match lookup.lookup(&url).await {
                        Ok(image) => image,
                        Err(e) => {
                            log::warn!("[IMAGES] Lookup failed, keeping placeholder: {}", e);
                            String::new()
                        }
                    },
                    Err(e) => {
                        log::warn!("[IMAGES] Lookup for '{}' abandoned: {}", url, e);
                        String::new()
                    }
                };
                (url, image)
            });
        }

        let mut images = BTreeMap::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((url, image)) => {
                    images.insert(url, image);
                }
                Err(e) => log::error!("[IMAGES] Lookup task failed: {}", e),
            }
        }
        images
    }
}
