//! ImageLookup trait for resolving placeholder image URLs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for image lookups.
#[derive(Error, Debug, Clone)]
pub enum MediaError {
    #[error("Image service credentials are not configured")]
    MissingAccessKey,

    #[error("Image request for '{url}' failed: {message}")]
    Request { url: String, message: String },

    #[error("Image service returned status {status} for '{url}'")]
    Status { url: String, status: u16 },

    #[error("Image service response for '{0}' carries no image URL")]
    NoImage(String),
}

/// Turns one placeholder image URL into a concrete image URL.
#[async_trait]
pub trait ImageLookup: Send + Sync + Debug {
    /// Resolve `url` to the URL of an actual image.
    async fn lookup(&self, url: &str) -> Result<String, MediaError>;

    /// Returns a human-readable name for this lookup (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A lookup answering from a fixed table. Unknown URLs fail.
#[derive(Debug, Default)]
pub struct StaticImageLookup {
    images: RwLock<HashMap<String, String>>,
}

impl StaticImageLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the image returned for `url`.
    pub fn add(&self, url: impl Into<String>, image: impl Into<String>) {
        if let Ok(mut images) = self.images.write() {
            images.insert(url.into(), image.into());
        }
    }
}

#[async_trait]
impl ImageLookup for StaticImageLookup {
    async fn lookup(&self, url: &str) -> Result<String, MediaError> {
        let images = self.images.read().map_err(|_| MediaError::Request {
            url: url.to_string(),
            message: "image table lock poisoned".to_string(),
        })?;
        images
            .get(url)
            .cloned()
            .ok_or_else(|| MediaError::NoImage(url.to_string()))
    }

    fn name(&self) -> &'static str {
        "StaticImageLookup"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_lookup_hit_and_miss() {
        let lookup = StaticImageLookup::new();
        lookup.add("https://placeholder/1", "https://images/1.jpg");

        assert_eq!(
            lookup.lookup("https://placeholder/1").await.unwrap(),
            "https://images/1.jpg"
        );
        assert!(matches!(
            lookup.lookup("https://placeholder/2").await,
            Err(MediaError::NoImage(_))
        ));
    }

    #[test]
    fn test_media_error_display() {
        let err = MediaError::Status {
            url: "https://api.example/photo".to_string(),
            status: 401,
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("api.example"));
    }
}
