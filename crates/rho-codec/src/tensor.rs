//! Self-describing binary encoding for tensors.
//!
//! Layout, all integers big-endian:
//!
//! ```text
//! magic     4 bytes  "RTNS"
//! version   u32      currently 1
//! element   u8       element-type code (see `ElementType::code`)
//! rank      u8       number of dimensions
//! extents   rank x u64
//! elements  raw element bytes, row-major
//! ```
//!
//! The element count is implied by the extents; the decoder demands that the
//! remaining bytes are exactly `count * width` long, so truncation and
//! trailing garbage are both detected.

use rho_types::{ElementType, Tensor, TensorData};

use crate::error::{CodecError, CodecResult};

/// Leading magic bytes of a tensor block.
pub const MAGIC: &[u8; 4] = b"RTNS";

/// Current tensor block version.
pub const VERSION: u32 = 1;

/// Encode a tensor into its canonical binary block.
pub fn encode_tensor(tensor: &Tensor) -> Vec<u8> {
    let width = tensor.element_type().width();
    let mut out = Vec::with_capacity(4 + 4 + 2 + tensor.rank() * 8 + tensor.len() * width);
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_be_bytes());
    out.push(tensor.element_type().code());
    // Rank fits in u8: Tensor::new enforces MAX_RANK.
    out.push(tensor.rank() as u8);
    for &extent in tensor.shape() {
        out.extend_from_slice(&(extent as u64).to_be_bytes());
    }
    match tensor.data() {
        TensorData::F64(v) => {
            for x in v {
                out.extend_from_slice(&x.to_bits().to_be_bytes());
            }
        }
        TensorData::F32(v) => {
            for x in v {
                out.extend_from_slice(&x.to_bits().to_be_bytes());
            }
        }
        TensorData::I64(v) => {
            for x in v {
                out.extend_from_slice(&x.to_be_bytes());
            }
        }
        TensorData::I32(v) => {
            for x in v {
                out.extend_from_slice(&x.to_be_bytes());
            }
        }
    }
    out
}

/// Decode a canonical binary block back into a tensor.
pub fn decode_tensor(bytes: &[u8]) -> CodecResult<Tensor> {
    let mut cursor = bytes;

    let magic = take(&mut cursor, 4, "magic")?;
    if magic != MAGIC {
        return Err(CodecError::malformed("bad magic, not a tensor block"));
    }
    let version = u32::from_be_bytes(take(&mut cursor, 4, "version")?.try_into().unwrap());
    if version != VERSION {
        return Err(CodecError::malformed(format!(
            "unsupported tensor block version {version}"
        )));
    }
    let code = take(&mut cursor, 1, "element type")?[0];
    let element_type =
        ElementType::from_code(code).ok_or(CodecError::UnsupportedElementType(code))?;
    let rank = take(&mut cursor, 1, "rank")?[0] as usize;

    let mut shape = Vec::with_capacity(rank);
    let mut count: usize = 1;
    for dim in 0..rank {
        let raw = u64::from_be_bytes(
            take(&mut cursor, 8, "shape extent")?
                .try_into()
                .unwrap(),
        );
        let extent = usize::try_from(raw)
            .map_err(|_| CodecError::malformed(format!("extent {raw} of dimension {dim} does not fit in memory")))?;
        count = count
            .checked_mul(extent)
            .ok_or_else(|| CodecError::malformed("shape element count overflows"))?;
        shape.push(extent);
    }

    let expected = count
        .checked_mul(element_type.width())
        .ok_or_else(|| CodecError::malformed("element byte length overflows"))?;
    if cursor.len() < expected {
        return Err(CodecError::malformed(format!(
            "truncated elements: expected {expected} bytes, found {}",
            cursor.len()
        )));
    }
    if cursor.len() > expected {
        return Err(CodecError::malformed(format!(
            "{} trailing bytes after elements",
            cursor.len() - expected
        )));
    }

    let data = match element_type {
        ElementType::F64 => TensorData::F64(
            cursor
                .chunks_exact(8)
                .map(|c| f64::from_bits(u64::from_be_bytes(c.try_into().unwrap())))
                .collect(),
        ),
        ElementType::F32 => TensorData::F32(
            cursor
                .chunks_exact(4)
                .map(|c| f32::from_bits(u32::from_be_bytes(c.try_into().unwrap())))
                .collect(),
        ),
        ElementType::I64 => TensorData::I64(
            cursor
                .chunks_exact(8)
                .map(|c| i64::from_be_bytes(c.try_into().unwrap()))
                .collect(),
        ),
        ElementType::I32 => TensorData::I32(
            cursor
                .chunks_exact(4)
                .map(|c| i32::from_be_bytes(c.try_into().unwrap()))
                .collect(),
        ),
    };

    Tensor::new(shape, data).map_err(|e| CodecError::malformed(e.to_string()))
}

fn take<'a>(cursor: &mut &'a [u8], n: usize, what: &str) -> CodecResult<&'a [u8]> {
    if cursor.len() < n {
        return Err(CodecError::malformed(format!(
            "truncated tensor block: missing {what}"
        )));
    }
    let (head, tail) = cursor.split_at(n);
    *cursor = tail;
    Ok(head)
}
