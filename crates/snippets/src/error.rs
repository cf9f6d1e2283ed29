use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnippetError {
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("JPath error: {0}")]
    JPath(#[from] pagesmith_jpath::JPathError),
}
