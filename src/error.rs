use pagesmith_store::StoreError;
use pagesmith_traits::MediaError;
use pagesmith_types::ValidationError;
use thiserror::Error;

/// Top-level error type for the editor session and the CLI.
///
/// The snippet pipeline itself never fails; everything surfaced here comes
/// from validation, persistence, configuration or I/O around it.
#[derive(Error, Debug)]
pub enum PagesmithError {
    #[error("Document is invalid: {0}")]
    Validation(#[from] ValidationError),

    #[error("Page store error: {0}")]
    Store(#[from] StoreError),

    #[error("Image resolution failed: {0}")]
    Media(#[from] MediaError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
