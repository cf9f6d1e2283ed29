//! Placeholder image resolution.
//!
//! Generated pages reference images through Unsplash `photos/random` API URLs.
//! After the snippet pipeline has produced a valid document, those URLs are
//! swapped for concrete image URLs in one concurrent batch.

mod extract;
pub mod resolver;
pub mod unsplash;

pub use extract::extract_placeholder_urls;
pub use resolver::{DEFAULT_MAX_CONCURRENT_LOOKUPS, ImageResolution, ImageResolver};
pub use unsplash::{ACCESS_KEY_ENV, UNSPLASH_API_BASE, UnsplashClient};

pub use pagesmith_traits::{ImageLookup, MediaError, StaticImageLookup};
