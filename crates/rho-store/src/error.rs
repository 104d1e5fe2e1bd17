use std::path::PathBuf;

use crate::registry::Compression;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Record header names a value kind outside the enumeration.
    #[error("unknown type tag {0:?}")]
    UnknownTypeTag(String),

    /// Record header names a compression tag outside the enumeration.
    #[error("unknown compression tag {0:?}")]
    UnknownCompressionTag(String),

    /// The compression tag is recognized but the codec is not part of this
    /// build (or of a deliberately restricted registry).
    #[error("compression codec {0:?} is not available in this build")]
    UnsupportedCodec(Compression),

    /// The record header could not be split into its two tag lines.
    #[error("corrupt record: {0}")]
    CorruptRecord(String),

    /// Decompression rejected the payload bytes.
    #[error("decompression failed: {0}")]
    Decompression(String),

    /// No store directory exists where one was expected.
    #[error("no data store at {}", .0.display())]
    StoreNotFound(PathBuf),

    /// No saved value exists under the given name.
    #[error("no saved value named {0:?}")]
    KeyNotFound(String),

    /// The requested key is not a filesystem-safe name.
    #[error("invalid key {name:?}: {reason}")]
    InvalidKey { name: String, reason: String },

    /// Name inference could not resolve the argument to a single variable.
    #[error("could not infer a name from {0:?}; pass an explicit name")]
    NameInferenceFailed(String),

    /// The payload did not decode into a well-formed value.
    #[error(transparent)]
    Codec(#[from] rho_codec::CodecError),

    /// I/O failure talking to the filesystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
