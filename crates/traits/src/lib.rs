pub mod media;
pub mod store;

pub use media::{ImageLookup, MediaError, StaticImageLookup};
pub use store::{InMemoryPageStore, PageStore, StoreError};
