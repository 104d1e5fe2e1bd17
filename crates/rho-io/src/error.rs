/// Errors from file import/export and console I/O.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// The file's contents did not parse as delimited text.
    #[error(transparent)]
    Codec(#[from] rho_codec::CodecError),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for I/O collaborators.
pub type IoResult<T> = std::result::Result<T, IoError>;
