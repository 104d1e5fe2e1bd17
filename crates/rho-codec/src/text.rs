//! Delimited-text encoding for tables and columns.
//!
//! The canonical form is comma-delimited: one leading header line listing
//! column names, then one line per row. Fields containing the delimiter, a
//! quote, or a line break are wrapped in double quotes with embedded quotes
//! doubled. A column encodes as a one-column table whose single header cell
//! is its name (empty when unnamed).
//!
//! A table with no columns encodes as the empty payload. That keeps the
//! encoding injective: a bare `"\n"` is the header of a single unnamed
//! column, never a degenerate table.
//!
//! Decoding re-infers each column's scalar type over the whole column:
//! all-integer, then all-float, then all-boolean, falling back to strings.
//! Floats are written via [`rho_types::float_repr`], which guarantees a
//! float column never collapses to an integer column on the way back in.

use rho_types::{Column, ColumnData, Table};

use crate::error::{CodecError, CodecResult};

/// The canonical field delimiter.
pub const DELIMITER: char = ',';

/// Encode a table in the canonical comma-delimited form.
pub fn encode_table(table: &Table) -> Vec<u8> {
    encode_table_with(table, DELIMITER)
}

/// Encode a table with an explicit delimiter (for TSV and friends).
pub fn encode_table_with(table: &Table, delim: char) -> Vec<u8> {
    if table.n_cols() == 0 {
        return Vec::new();
    }
    let mut out = String::new();
    write_row(
        &mut out,
        table.column_names().iter().map(|s| s.to_string()),
        delim,
    );
    for row in 0..table.n_rows() {
        write_row(
            &mut out,
            (0..table.n_cols()).map(|col| table.cell_text(row, col)),
            delim,
        );
    }
    out.into_bytes()
}

/// Encode a column as a one-column table with a single header cell.
pub fn encode_column(column: &Column) -> Vec<u8> {
    let mut out = String::new();
    write_row(
        &mut out,
        std::iter::once(column.name().unwrap_or_default().to_string()),
        DELIMITER,
    );
    for i in 0..column.len() {
        write_row(
            &mut out,
            std::iter::once(column.data().cell_text(i)),
            DELIMITER,
        );
    }
    out.into_bytes()
}

/// Decode canonical comma-delimited bytes into a table.
pub fn decode_table(bytes: &[u8]) -> CodecResult<Table> {
    decode_table_with(bytes, DELIMITER)
}

/// Decode delimited bytes with an explicit delimiter.
pub fn decode_table_with(bytes: &[u8], delim: char) -> CodecResult<Table> {
    if bytes.is_empty() {
        return Table::new(Vec::new()).map_err(|e| CodecError::malformed(e.to_string()));
    }
    let (header, rows) = parse_payload(bytes, delim)?;
    let columns = header
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let fields: Vec<&str> = rows.iter().map(|row| row[idx].as_str()).collect();
            infer_column(name, &fields)
        })
        .collect();
    // Every row was length-checked against the header, so columns agree.
    Table::new(columns).map_err(|e| CodecError::malformed(e.to_string()))
}

/// Decode bytes that must contain exactly one column.
pub fn decode_column(bytes: &[u8]) -> CodecResult<Column> {
    let (header, rows) = parse_payload(bytes, DELIMITER)?;
    if header.len() != 1 {
        return Err(CodecError::malformed(format!(
            "column payload has {} columns, expected 1",
            header.len()
        )));
    }
    let fields: Vec<&str> = rows.iter().map(|row| row[0].as_str()).collect();
    Ok(infer_column(header.into_iter().next().unwrap_or_default(), &fields))
}

fn write_row(out: &mut String, fields: impl Iterator<Item = String>, delim: char) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(delim);
        }
        first = false;
        push_escaped(out, &field, delim);
    }
    out.push('\n');
}

fn push_escaped(out: &mut String, field: &str, delim: char) {
    if field.contains([delim, '"', '\n', '\r']) {
        out.push('"');
        for ch in field.chars() {
            if ch == '"' {
                out.push('"');
            }
            out.push(ch);
        }
        out.push('"');
    } else {
        out.push_str(field);
    }
}

/// Split the payload into a header row and length-checked body rows.
fn parse_payload(bytes: &[u8], delim: char) -> CodecResult<(Vec<String>, Vec<Vec<String>>)> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| CodecError::malformed("payload is not valid UTF-8 text"))?;
    let mut rows = parse_rows(text, delim)?;
    if rows.is_empty() {
        return Err(CodecError::malformed("missing header line"));
    }
    let header = rows.remove(0);
    for (i, row) in rows.iter().enumerate() {
        if row.len() != header.len() {
            return Err(CodecError::malformed(format!(
                "row {} has {} fields, expected {}",
                i + 1,
                row.len(),
                header.len()
            )));
        }
    }
    Ok((header, rows))
}

/// Quote-aware row splitter. Accepts `\n` and `\r\n` as row terminators.
fn parse_rows(text: &str, delim: char) -> CodecResult<Vec<Vec<String>>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    // True between a closing quote and the next delimiter or row end.
    let mut after_quote = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                    after_quote = true;
                }
            } else {
                field.push(ch);
            }
            continue;
        }
        match ch {
            '"' if field.is_empty() && !after_quote => in_quotes = true,
            '"' => {
                return Err(CodecError::malformed(format!(
                    "unexpected quote in row {}",
                    rows.len() + 1
                )))
            }
            c if c == delim => {
                row.push(std::mem::take(&mut field));
                after_quote = false;
            }
            '\n' => {
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                after_quote = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
                after_quote = false;
            }
            _ if after_quote => {
                return Err(CodecError::malformed(format!(
                    "unexpected character after closing quote in row {}",
                    rows.len() + 1
                )))
            }
            c => field.push(c),
        }
    }

    if in_quotes {
        return Err(CodecError::malformed("unterminated quoted field"));
    }
    // A payload not ending in a newline still contributes its last row.
    if !field.is_empty() || after_quote || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }
    Ok(rows)
}

/// Infer the narrowest column type that fits every field.
fn infer_column(name: String, fields: &[&str]) -> Column {
    let name = if name.is_empty() { None } else { Some(name) };
    let build = |data| match name.clone() {
        Some(n) => Column::named(n, data),
        None => Column::unnamed(data),
    };

    if !fields.is_empty() {
        if let Ok(ints) = fields.iter().map(|f| f.parse()).collect::<Result<Vec<i64>, _>>() {
            return build(ColumnData::Int(ints));
        }
        if let Ok(floats) = fields.iter().map(|f| f.parse()).collect::<Result<Vec<f64>, _>>() {
            return build(ColumnData::Float(floats));
        }
        if let Ok(bools) = fields.iter().map(|f| f.parse()).collect::<Result<Vec<bool>, _>>() {
            return build(ColumnData::Bool(bools));
        }
    }
    build(ColumnData::Str(fields.iter().map(|f| f.to_string()).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rho_types::Value;

    fn table(columns: Vec<Column>) -> Table {
        Table::new(columns).unwrap()
    }

    #[test]
    fn canonical_bytes_are_plain_csv() {
        let t = table(vec![
            Column::named("a", ColumnData::Int(vec![1, 2])),
            Column::named("b", ColumnData::Str(vec!["x".into(), "y".into()])),
        ]);
        assert_eq!(encode_table(&t), b"a,b\n1,x\n2,y\n");
    }

    #[test]
    fn table_round_trip() {
        let t = table(vec![
            Column::named("id", ColumnData::Int(vec![1, 2, 3])),
            Column::named("score", ColumnData::Float(vec![1.5, -0.25, 3.0])),
            Column::named("ok", ColumnData::Bool(vec![true, false, true])),
            Column::named(
                "label",
                ColumnData::Str(vec!["x".into(), "y".into(), "z".into()]),
            ),
        ]);
        let decoded = decode_table(&encode_table(&t)).unwrap();
        assert_eq!(decoded, t);
    }

    #[test]
    fn whole_floats_stay_float_columns() {
        let t = table(vec![Column::named("v", ColumnData::Float(vec![1.0, 2.0]))]);
        let bytes = encode_table(&t);
        assert_eq!(bytes, b"v\n1.0\n2.0\n");
        assert_eq!(decode_table(&bytes).unwrap(), t);
    }

    #[test]
    fn awkward_fields_are_quoted_and_recovered() {
        let t = table(vec![Column::named(
            "s",
            ColumnData::Str(vec![
                "plain".into(),
                "with,comma".into(),
                "with\"quote".into(),
                "multi\nline".into(),
            ]),
        )]);
        let decoded = decode_table(&encode_table(&t)).unwrap();
        assert_eq!(decoded, t);
    }

    #[test]
    fn quoted_field_bytes() {
        let t = table(vec![Column::named(
            "s",
            ColumnData::Str(vec!["a,b".into()]),
        )]);
        assert_eq!(encode_table(&t), b"s\n\"a,b\"\n");
    }

    #[test]
    fn column_round_trip_named_and_unnamed() {
        for col in [
            Column::named("x", ColumnData::Float(vec![0.5, 2.0])),
            Column::unnamed(ColumnData::Int(vec![7, 8, 9])),
        ] {
            let decoded = decode_column(&encode_column(&col)).unwrap();
            assert_eq!(decoded, col);
        }
    }

    #[test]
    fn crlf_rows_are_accepted() {
        let t = decode_table(b"a,b\r\n1,2\r\n").unwrap();
        assert_eq!(t.shape(), (1, 2));
        assert_eq!(t.column("a").unwrap().data(), &ColumnData::Int(vec![1]));
    }

    #[test]
    fn missing_trailing_newline_is_accepted() {
        let t = decode_table(b"a\n1\n2").unwrap();
        assert_eq!(t.column("a").unwrap().data(), &ColumnData::Int(vec![1, 2]));
    }

    #[test]
    fn mixed_fields_fall_back_to_strings() {
        let t = decode_table(b"a\n1\nx\n").unwrap();
        assert_eq!(
            t.column("a").unwrap().data(),
            &ColumnData::Str(vec!["1".into(), "x".into()])
        );
    }

    #[test]
    fn empty_fields_make_a_string_column() {
        let t = decode_table(b"a\n1\n\n2\n").unwrap();
        assert_eq!(
            t.column("a").unwrap().data(),
            &ColumnData::Str(vec!["1".into(), "".into(), "2".into()])
        );
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let err = decode_table(b"a,b\n1\n").unwrap_err();
        assert!(matches!(err, CodecError::MalformedPayload(_)));
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        let err = decode_table(b"a\n\"oops\n").unwrap_err();
        assert!(matches!(err, CodecError::MalformedPayload(_)));
    }

    #[test]
    fn text_after_closing_quote_is_malformed() {
        let err = decode_table(b"a\n\"x\"y\n").unwrap_err();
        assert!(matches!(err, CodecError::MalformedPayload(_)));
    }

    #[test]
    fn non_utf8_payload_is_malformed() {
        let err = decode_table(&[0xff, 0xfe, b'\n']).unwrap_err();
        assert!(matches!(err, CodecError::MalformedPayload(_)));
    }

    #[test]
    fn zero_column_table_round_trips() {
        let t = table(vec![]);
        let bytes = encode_table(&t);
        assert_eq!(bytes, b"");
        let decoded = decode_table(&bytes).unwrap();
        assert_eq!(decoded.n_cols(), 0);
        assert_eq!(decoded, t);
    }

    #[test]
    fn zero_column_table_is_distinct_from_empty_unnamed_column() {
        let col = Column::unnamed(ColumnData::Str(vec![]));
        let bytes = encode_column(&col);
        assert_eq!(bytes, b"\n");
        let decoded = decode_table(&bytes).unwrap();
        assert_eq!(decoded.n_cols(), 1);
    }

    #[test]
    fn empty_payload_is_not_a_column() {
        assert!(matches!(
            decode_column(b"").unwrap_err(),
            CodecError::MalformedPayload(_)
        ));
    }

    #[test]
    fn multi_column_payload_is_not_a_column() {
        let err = decode_column(b"a,b\n1,2\n").unwrap_err();
        assert!(matches!(err, CodecError::MalformedPayload(_)));
    }

    #[test]
    fn tab_delimited_round_trip() {
        let t = table(vec![
            Column::named("a", ColumnData::Int(vec![1])),
            Column::named("b", ColumnData::Str(vec!["has,comma".into()])),
        ]);
        let bytes = encode_table_with(&t, '\t');
        // Commas are plain characters under a tab delimiter.
        assert_eq!(bytes, b"a\tb\n1\thas,comma\n");
        assert_eq!(decode_table_with(&bytes, '\t').unwrap(), t);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn column_data(rows: usize) -> impl Strategy<Value = ColumnData> {
            prop_oneof![
                prop::collection::vec(any::<i64>(), rows).prop_map(ColumnData::Int),
                prop::collection::vec(
                    any::<f64>().prop_filter("NaN breaks equality", |v| !v.is_nan()),
                    rows
                )
                .prop_map(ColumnData::Float),
                prop::collection::vec(any::<bool>(), rows).prop_map(ColumnData::Bool),
                // Strings that never re-parse as numerics or booleans, so the
                // inferred column type matches the original.
                prop::collection::vec("[ -~]{0,12}#", rows).prop_map(ColumnData::Str),
            ]
        }

        fn arb_table() -> impl Strategy<Value = Table> {
            (1usize..6, 1usize..5).prop_flat_map(|(rows, cols)| {
                prop::collection::vec(column_data(rows), cols).prop_map(|datas| {
                    let columns = datas
                        .into_iter()
                        .enumerate()
                        .map(|(i, data)| Column::named(format!("c{i}"), data))
                        .collect();
                    Table::new(columns).unwrap()
                })
            })
        }

        proptest! {
            #[test]
            fn table_round_trips(t in arb_table()) {
                let (tag, bytes) = crate::encode(&Value::Table(t.clone()));
                let decoded = crate::decode(tag, &bytes).unwrap();
                prop_assert_eq!(decoded, Value::Table(t));
            }

            #[test]
            fn column_round_trips(data in column_data(4)) {
                let col = Column::named("v", data);
                let decoded = decode_column(&encode_column(&col)).unwrap();
                prop_assert_eq!(decoded, col);
            }
        }
    }
}
