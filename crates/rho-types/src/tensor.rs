use std::fmt;

use crate::error::{TypeError, TypeResult};

/// Maximum tensor rank the binary encoding can carry (rank is one byte).
pub const MAX_RANK: usize = 255;

/// Fixed-width numeric element types a tensor may hold.
///
/// This set is closed on purpose: only fixed-width numerics are allowed, so
/// the byte encoding never needs (and never falls back to) a generic object
/// serializer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    F64,
    F32,
    I64,
    I32,
}

impl ElementType {
    /// One-byte wire code for the element type.
    pub fn code(self) -> u8 {
        match self {
            Self::F64 => 0x01,
            Self::F32 => 0x02,
            Self::I64 => 0x03,
            Self::I32 => 0x04,
        }
    }

    /// Inverse of [`code`](Self::code); `None` for unknown codes.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x01 => Some(Self::F64),
            0x02 => Some(Self::F32),
            0x03 => Some(Self::I64),
            0x04 => Some(Self::I32),
            _ => None,
        }
    }

    /// Width of one element in bytes.
    pub fn width(self) -> usize {
        match self {
            Self::F64 | Self::I64 => 8,
            Self::F32 | Self::I32 => 4,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::F64 => "f64",
            Self::F32 => "f32",
            Self::I64 => "i64",
            Self::I32 => "i32",
        };
        write!(f, "{name}")
    }
}

/// Element storage, one vector per supported element type.
#[derive(Clone, Debug, PartialEq)]
pub enum TensorData {
    F64(Vec<f64>),
    F32(Vec<f32>),
    I64(Vec<i64>),
    I32(Vec<i32>),
}

impl TensorData {
    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::F64(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::I64(v) => v.len(),
            Self::I32(v) => v.len(),
        }
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element type of this storage.
    pub fn element_type(&self) -> ElementType {
        match self {
            Self::F64(_) => ElementType::F64,
            Self::F32(_) => ElementType::F32,
            Self::I64(_) => ElementType::I64,
            Self::I32(_) => ElementType::I32,
        }
    }
}

/// An n-dimensional homogeneous numeric array with a fixed shape.
///
/// Elements are stored flat in row-major order. The shape invariant (the
/// product of extents equals the element count) is checked at construction
/// and holds for the lifetime of the value. A rank-0 tensor is a scalar and
/// holds exactly one element.
#[derive(Clone, Debug, PartialEq)]
pub struct Tensor {
    shape: Vec<usize>,
    data: TensorData,
}

impl Tensor {
    /// Build a tensor, validating shape against the element count.
    pub fn new(shape: Vec<usize>, data: TensorData) -> TypeResult<Self> {
        if shape.len() > MAX_RANK {
            return Err(TypeError::RankTooLarge {
                rank: shape.len(),
                max: MAX_RANK,
            });
        }
        let expected = shape
            .iter()
            .try_fold(1usize, |acc, &dim| acc.checked_mul(dim));
        match expected {
            Some(expected) if expected == data.len() => Ok(Self { shape, data }),
            _ => Err(TypeError::ShapeMismatch {
                expected: expected.unwrap_or(usize::MAX),
                actual: data.len(),
                shape,
            }),
        }
    }

    /// A rank-1 tensor over `f64` elements.
    pub fn vector(values: Vec<f64>) -> Self {
        let shape = vec![values.len()];
        // A rank-1 shape always matches its element count.
        Self {
            shape,
            data: TensorData::F64(values),
        }
    }

    /// The extents, outermost dimension first.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The element type.
    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    /// The flat row-major element storage.
    pub fn data(&self) -> &TensorData {
        &self.data
    }
}
