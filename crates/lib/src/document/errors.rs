//! Error types for the document codec boundary.

use thiserror::Error;

/// Errors raised while turning bytes into documents and back.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes are not a well-formed document.
    #[error("Decoding failed")]
    Decode {
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The document could not be serialized.
    #[error("Encoding failed")]
    Encode {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// File I/O error.
    #[error("File I/O error")]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The decoded tree does not have the shape of a project document.
    #[error("Invalid document shape: {reason}")]
    InvalidShape { reason: String },
}

impl CodecError {
    /// Check if this error is related to serialization
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, CodecError::Decode { .. } | CodecError::Encode { .. })
    }

    /// Check if this error is an I/O failure
    pub fn is_io_error(&self) -> bool {
        matches!(self, CodecError::Io { .. })
    }

    /// Check if this error indicates a missing file
    pub fn is_not_found(&self) -> bool {
        matches!(self, CodecError::Io { source } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

// Conversion from CodecError to the main Error type
impl From<CodecError> for crate::Error {
    fn from(err: CodecError) -> Self {
        crate::Error::Codec(err)
    }
}
