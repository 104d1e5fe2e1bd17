/// Errors from constructing or manipulating rho values.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// Table columns do not all share the same length.
    #[error("column {name:?} has {actual} rows, expected {expected}")]
    RaggedColumns {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// Tensor shape does not agree with the number of elements supplied.
    #[error("shape {shape:?} implies {expected} elements, got {actual}")]
    ShapeMismatch {
        shape: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    /// Tensor rank exceeds what the binary encoding can represent.
    #[error("tensor rank {rank} exceeds the maximum of {max}")]
    RankTooLarge { rank: usize, max: usize },

    /// A boolean mask was not the same length as the data it filters.
    #[error("mask has {actual} entries, expected {expected}")]
    MaskLengthMismatch { expected: usize, actual: usize },

    /// Column lookup by name failed.
    #[error("no column named {0:?}")]
    UnknownColumn(String),

    /// A numeric operation was asked of a non-numeric column.
    #[error("column {0:?} is not numeric")]
    NonNumericColumn(String),
}

/// Result alias for value construction and manipulation.
pub type TypeResult<T> = std::result::Result<T, TypeError>;
