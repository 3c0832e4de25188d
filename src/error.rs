//! Error types for papersketch library.

use std::io;
use thiserror::Error;

/// Result type alias for papersketch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building a sketch.
///
/// Only [`Error::Surface`], [`Error::Encode`] and [`Error::InvalidOption`]
/// can escape a render call. Acquisition errors are recorded per image and
/// never abort the pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input could not be decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input is neither a known JSON shape nor markdown text.
    #[error("Unknown input format: expected a summary record or markdown")]
    UnknownInput,

    /// A single image could not be acquired.
    #[error("Image acquisition failed for {url}: {reason}")]
    ImageAcquire {
        /// Image URL
        url: String,
        /// Failure reason reported by the source
        reason: String,
    },

    /// Image bytes could not be decoded.
    #[error("Image decoding error: {0}")]
    ImageDecode(String),

    /// No drawing surface could be created.
    #[error("Surface error: {0}")]
    Surface(String),

    /// The drawn surface could not be encoded.
    #[error("Encoding error: {0}")]
    Encode(String),

    /// Error during document serialization.
    #[error("Rendering error: {0}")]
    Render(String),

    /// An option value was rejected.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl Error {
    /// Build an acquisition error for `url`.
    pub fn acquire(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::ImageAcquire {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error aborts a render.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Error::ImageAcquire { .. } | Error::ImageDecode(_))
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::ImageDecode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownInput;
        assert_eq!(
            err.to_string(),
            "Unknown input format: expected a summary record or markdown"
        );

        let err = Error::acquire("https://a/b.png", "timed out");
        assert_eq!(
            err.to_string(),
            "Image acquisition failed for https://a/b.png: timed out"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_fatality() {
        assert!(!Error::acquire("u", "r").is_fatal());
        assert!(!Error::ImageDecode("bad".into()).is_fatal());
        assert!(Error::Surface("zero".into()).is_fatal());
        assert!(Error::Encode("png".into()).is_fatal());
    }
}
