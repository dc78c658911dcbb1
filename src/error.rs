//! Error types for tmxtile library

use std::io;
use thiserror::Error;

/// Main error type for tmxtile operations
#[derive(Debug, Error)]
pub enum TmxError {
    /// Malformed payload, literal, or compressed stream
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    /// Operation the codec deliberately refuses (zstd, zlib encode, ...)
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// GID that falls outside every tileset range
    #[error("Invalid tile gid: {0}")]
    InvalidGid(u32),

    /// Map orientation other than orthogonal
    #[error("Only orthogonal maps are supported, found orientation {0:?}")]
    OrientationUnsupported(String),

    /// External tileset reference that could not be resolved
    #[error("Unresolved tileset reference: {0}")]
    UnresolvedTileset(String),

    /// Placed tile referencing a sheet that is not part of the map
    #[error("Unknown tile sheet: {0}")]
    UnknownTileSheet(String),

    /// IO error raised by a compression stream
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Details of a [`TmxError::Format`] failure
#[derive(Debug, Error)]
pub enum FormatError {
    /// Payload text is not valid base64
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Compressed stream could not be inflated
    #[error("malformed {compression} stream: {source}")]
    Inflate {
        compression: &'static str,
        #[source]
        source: io::Error,
    },

    /// A literal that does not parse as the expected kind
    #[error("invalid {kind} literal {value:?}")]
    Literal { kind: &'static str, value: String },

    /// Structural problem in the payload
    #[error("{0}")]
    Malformed(String),
}

impl FormatError {
    /// Build a [`FormatError::Literal`] for `value`
    pub fn literal(kind: &'static str, value: impl Into<String>) -> Self {
        FormatError::Literal {
            kind,
            value: value.into(),
        }
    }
}

impl TmxError {
    /// Shorthand for a [`FormatError::Malformed`] wrapped in [`TmxError::Format`]
    pub fn malformed(message: impl Into<String>) -> Self {
        TmxError::Format(FormatError::Malformed(message.into()))
    }

    /// Shorthand for [`TmxError::UnsupportedOperation`]
    pub fn unsupported(message: impl Into<String>) -> Self {
        TmxError::UnsupportedOperation(message.into())
    }

    /// Whether this error belongs to the format family
    pub fn is_format_error(&self) -> bool {
        matches!(self, TmxError::Format(_))
    }
}

/// Result type alias for tmxtile operations
pub type Result<T> = std::result::Result<T, TmxError>;
