/// Errors from encoding or decoding canonical value bytes.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A tensor block names an element-type code outside the supported set.
    ///
    /// The supported set is fixed-width numerics only; there is no generic
    /// serializer to fall back to.
    #[error("unsupported tensor element type code {0:#04x}")]
    UnsupportedElementType(u8),

    /// The payload bytes do not parse completely into a well-formed value.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl CodecError {
    /// Shorthand for a [`CodecError::MalformedPayload`].
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedPayload(reason.into())
    }
}

/// Result alias for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;
