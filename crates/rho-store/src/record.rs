//! The on-disk record container.
//!
//! A record is exactly two newline-terminated UTF-8 header lines followed
//! by the payload, whose length is "the rest of the file":
//!
//! ```text
//! line 1: type tag         table | column | tensor
//! line 2: compression tag  none | zstd | lz4
//! rest:   payload bytes
//! ```
//!
//! The header is deliberately uncompressed and carries no length field;
//! human-inspectability and room for new tags win over compactness.

use rho_types::TypeTag;

use crate::error::{StoreError, StoreResult};
use crate::registry::Compression;

/// A parsed record: the two header tags plus the raw payload bytes.
///
/// The payload is compressed per `compression` and encoded per `tag`; the
/// record itself never interprets it.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub tag: TypeTag,
    pub compression: Compression,
    pub payload: Vec<u8>,
}

impl Record {
    /// Frame the record as bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out =
            Vec::with_capacity(self.tag.as_str().len() + self.compression.as_str().len() + 2 + self.payload.len());
        out.extend_from_slice(self.tag.as_str().as_bytes());
        out.push(b'\n');
        out.extend_from_slice(self.compression.as_str().as_bytes());
        out.push(b'\n');
        out.extend_from_slice(&self.payload);
        out
    }

    /// Parse bytes back into a record.
    ///
    /// Fails with [`StoreError::UnknownTypeTag`] or
    /// [`StoreError::UnknownCompressionTag`] for header values outside the
    /// enumerations, and [`StoreError::CorruptRecord`] when the two header
    /// lines cannot be split off at all.
    pub fn from_bytes(bytes: &[u8]) -> StoreResult<Record> {
        let (tag_line, rest) = split_line(bytes, "type tag")?;
        let tag = TypeTag::parse(tag_line)
            .ok_or_else(|| StoreError::UnknownTypeTag(tag_line.to_string()))?;
        let (ctag_line, payload) = split_line(rest, "compression tag")?;
        let compression = Compression::parse(ctag_line)
            .ok_or_else(|| StoreError::UnknownCompressionTag(ctag_line.to_string()))?;
        Ok(Record {
            tag,
            compression,
            payload: payload.to_vec(),
        })
    }
}

/// Split one newline-terminated UTF-8 line off the front of `bytes`.
fn split_line<'a>(bytes: &'a [u8], what: &str) -> StoreResult<(&'a str, &'a [u8])> {
    let newline = bytes
        .iter()
        .position(|&b| b == b'\n')
        .ok_or_else(|| StoreError::CorruptRecord(format!("missing {what} line")))?;
    let line = std::str::from_utf8(&bytes[..newline])
        .map_err(|_| StoreError::CorruptRecord(format!("{what} line is not UTF-8")))?;
    Ok((line, &bytes[newline + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_layout_is_two_lines_then_payload() {
        let record = Record {
            tag: TypeTag::Table,
            compression: Compression::None,
            payload: b"a,b\n1,x\n".to_vec(),
        };
        assert_eq!(record.to_bytes(), b"table\nnone\na,b\n1,x\n");
    }

    #[test]
    fn round_trip_with_binary_payload() {
        let record = Record {
            tag: TypeTag::Tensor,
            compression: Compression::Zstd,
            payload: vec![0, 159, 146, 150, b'\n', 0xff],
        };
        assert_eq!(Record::from_bytes(&record.to_bytes()).unwrap(), record);
    }

    #[test]
    fn empty_payload_round_trips() {
        let record = Record {
            tag: TypeTag::Column,
            compression: Compression::Lz4,
            payload: vec![],
        };
        assert_eq!(Record::from_bytes(&record.to_bytes()).unwrap(), record);
    }

    #[test]
    fn unknown_type_tag_is_rejected() {
        let err = Record::from_bytes(b"matrix\nnone\npayload").unwrap_err();
        assert!(matches!(err, StoreError::UnknownTypeTag(tag) if tag == "matrix"));
    }

    #[test]
    fn unknown_compression_tag_is_rejected() {
        let err = Record::from_bytes(b"table\nxz\npayload").unwrap_err();
        assert!(matches!(err, StoreError::UnknownCompressionTag(tag) if tag == "xz"));
    }

    #[test]
    fn case_and_whitespace_are_not_forgiven() {
        assert!(matches!(
            Record::from_bytes(b"Table\nnone\n").unwrap_err(),
            StoreError::UnknownTypeTag(_)
        ));
        assert!(matches!(
            Record::from_bytes(b"table \nnone\n").unwrap_err(),
            StoreError::UnknownTypeTag(_)
        ));
    }

    #[test]
    fn truncated_headers_are_corrupt() {
        assert!(matches!(
            Record::from_bytes(b"").unwrap_err(),
            StoreError::CorruptRecord(_)
        ));
        assert!(matches!(
            Record::from_bytes(b"table").unwrap_err(),
            StoreError::CorruptRecord(_)
        ));
        assert!(matches!(
            Record::from_bytes(b"table\nnone").unwrap_err(),
            StoreError::CorruptRecord(_)
        ));
    }

    #[test]
    fn non_utf8_header_is_corrupt() {
        assert!(matches!(
            Record::from_bytes(&[0xff, 0xfe, b'\n', b'n', b'\n']).unwrap_err(),
            StoreError::CorruptRecord(_)
        ));
    }
}
