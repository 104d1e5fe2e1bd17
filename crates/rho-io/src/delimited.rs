//! Delimited-file readers and writers.
//!
//! Thin wrappers over the canonical text codec: reading parses a whole file
//! through `rho_codec::text`, writing emits the canonical form with the
//! requested delimiter and truncates any existing file.

use std::fs;
use std::path::Path;

use rho_types::Table;

use crate::error::IoResult;

/// Read a comma-separated file into a table.
pub fn read_csv(path: impl AsRef<Path>) -> IoResult<Table> {
    read_delimited(path, ',')
}

/// Read a tab-separated file into a table.
pub fn read_tsv(path: impl AsRef<Path>) -> IoResult<Table> {
    read_delimited(path, '\t')
}

/// Read a delimited file into a table, inferring column types.
pub fn read_delimited(path: impl AsRef<Path>, delim: char) -> IoResult<Table> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let table = rho_codec::text::decode_table_with(&bytes, delim)?;
    tracing::debug!(
        path = %path.display(),
        rows = table.n_rows(),
        cols = table.n_cols(),
        "read delimited file"
    );
    Ok(table)
}

/// Write a table as comma-separated text, replacing any existing file.
pub fn write_csv(table: &Table, path: impl AsRef<Path>) -> IoResult<()> {
    write_delimited(table, path, ',')
}

/// Write a table with an explicit delimiter, replacing any existing file.
pub fn write_delimited(table: &Table, path: impl AsRef<Path>, delim: char) -> IoResult<()> {
    let path = path.as_ref();
    fs::write(path, rho_codec::text::encode_table_with(table, delim))?;
    tracing::debug!(path = %path.display(), rows = table.n_rows(), "wrote delimited file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rho_types::{Column, ColumnData};

    fn sample() -> Table {
        Table::new(vec![
            Column::named("a", ColumnData::Int(vec![1, 2])),
            Column::named("b", ColumnData::Str(vec!["x".into(), "y,z".into()])),
        ])
        .unwrap()
    }

    #[test]
    fn csv_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        write_csv(&sample(), &path).unwrap();
        assert_eq!(read_csv(&path).unwrap(), sample());
    }

    #[test]
    fn tsv_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.tsv");
        write_delimited(&sample(), &path, '\t').unwrap();
        assert_eq!(read_tsv(&path).unwrap(), sample());
    }

    #[test]
    fn write_truncates_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        std::fs::write(&path, "old contents that are much longer than the new ones\n").unwrap();
        write_csv(&sample(), &path).unwrap();
        assert_eq!(read_csv(&path).unwrap(), sample());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_csv(dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, crate::IoError::Io(_)));
    }

    #[test]
    fn unparsable_file_is_a_codec_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "a,b\n1\n").unwrap();
        assert!(matches!(
            read_csv(&path).unwrap_err(),
            crate::IoError::Codec(_)
        ));
    }
}
