use thiserror::Error;

use crate::transport::TransportError;

/// A JSON body did not have the shape the caller expected.
///
/// `path` names the offending location inside the document, e.g. `issues[3]`
/// or `values`. It is `$` when the body could not be parsed at all.
#[derive(Debug, Error)]
#[error("failed to deserialize {path}: {message}")]
pub struct DeserializationError {
    pub path: String,
    pub message: String,
}

impl DeserializationError {
    pub fn new(path: impl Into<String>, source: &serde_json::Error) -> Self {
        Self {
            path: path.into(),
            message: source.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AgileError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Deserialization(#[from] DeserializationError),
}

pub type Result<T> = std::result::Result<T, AgileError>;
