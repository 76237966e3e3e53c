//! Error types for JSON encoding and decoding.

use thiserror::Error;

/// Result type alias using the crate [`enum@Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while converting a container to or from JSON.
#[derive(Error, Debug)]
pub enum Error {
    /// A key or value could not be encoded.
    #[error("JSON encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// The input is not a JSON object of the expected key and value types.
    #[error("JSON decode error: {0}")]
    Decode(#[source] serde_json::Error),
}

impl Error {
    /// Returns `true` if this error came from decoding.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }

    /// Returns the line of the input at which decoding failed, if known.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Decode(error) if error.line() > 0 => Some(error.line()),
            _ => None,
        }
    }
}
