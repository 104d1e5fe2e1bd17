//! Console rendering of values.
//!
//! Pure presentation: renders a [`Value`] to a `String` and never touches
//! stored record bytes. Tables elide middle rows above a threshold;
//! [`cat`] renders everything unelided.

use rho_types::{float_repr, Column, ColumnData, Table, Tensor, TensorData, Value};

/// Rendering knobs.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Show at most this many rows, eliding the middle. `None` disables
    /// elision.
    pub max_rows: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { max_rows: Some(60) }
    }
}

/// Render any value with the given options.
pub fn render_value(value: &Value, opts: &RenderOptions) -> String {
    match value {
        Value::Table(t) => render_table(t, opts),
        Value::Column(c) => render_column(c, opts),
        Value::Tensor(t) => render_tensor(t),
    }
}

/// Render the full, unelided form of a value.
pub fn cat(value: &Value) -> String {
    render_value(value, &RenderOptions { max_rows: None })
}

/// Render a table as aligned columns.
pub fn render_table(table: &Table, opts: &RenderOptions) -> String {
    if table.n_cols() == 0 {
        return "(empty table)".to_string();
    }

    let n = table.n_rows();
    let (head, tail) = match opts.max_rows {
        Some(max) if n > max => (max.div_ceil(2), max / 2),
        _ => (n, 0),
    };
    let elided = head + tail < n;

    // Row cells to display, with an ellipsis row marking the elision.
    let mut display_rows: Vec<Vec<String>> = Vec::new();
    for row in 0..head {
        display_rows.push(
            (0..table.n_cols())
                .map(|col| table.cell_text(row, col))
                .collect(),
        );
    }
    if elided {
        display_rows.push(vec!["...".to_string(); table.n_cols()]);
        for row in n - tail..n {
            display_rows.push(
                (0..table.n_cols())
                    .map(|col| table.cell_text(row, col))
                    .collect(),
            );
        }
    }

    let names = table.column_names();
    let mut widths: Vec<usize> = names.iter().map(|s| s.chars().count()).collect();
    for row in &display_rows {
        for (col, cell) in row.iter().enumerate() {
            widths[col] = widths[col].max(cell.chars().count());
        }
    }
    let right_align: Vec<bool> = table
        .columns()
        .iter()
        .map(|c| !matches!(c.data(), ColumnData::Str(_)))
        .collect();

    let mut out = String::new();
    render_row(&mut out, &names.iter().map(|s| s.to_string()).collect::<Vec<_>>(), &widths, &right_align);
    for row in &display_rows {
        render_row(&mut out, row, &widths, &right_align);
    }
    if elided {
        out.push_str(&format!("\n[{n} rows x {} columns]\n", table.n_cols()));
    }
    out
}

/// Render a column as a one-column table plus a type footer.
pub fn render_column(column: &Column, opts: &RenderOptions) -> String {
    let mut out = render_table(&Table::from_column(column.clone()), opts);
    out.push_str(&format!(
        "({} entries, type {})\n",
        column.len(),
        column.data().type_name()
    ));
    out
}

/// Render a tensor.
///
/// Rank 0 renders as a bare scalar, rank 1 as a bracketed list, rank 2 as
/// nested rows; higher ranks get a summary header plus the flat row-major
/// elements.
pub fn render_tensor(tensor: &Tensor) -> String {
    let texts: Vec<String> = (0..tensor.len()).map(|i| elem_text(tensor.data(), i)).collect();
    match tensor.rank() {
        0 => texts.into_iter().next().unwrap_or_default(),
        1 => format!("[{}]", texts.join(", ")),
        2 => {
            let cols = tensor.shape()[1];
            let rows: Vec<String> = if cols == 0 {
                vec!["[]".to_string(); tensor.shape()[0]]
            } else {
                texts
                    .chunks(cols)
                    .map(|chunk| format!("[{}]", chunk.join(", ")))
                    .collect()
            };
            format!("[{}]", rows.join(",\n "))
        }
        _ => format!(
            "tensor({}, shape={:?})\n[{}]",
            tensor.element_type(),
            tensor.shape(),
            texts.join(", ")
        ),
    }
}

fn render_row(out: &mut String, cells: &[String], widths: &[usize], right_align: &[bool]) {
    let mut parts = Vec::with_capacity(cells.len());
    for (i, cell) in cells.iter().enumerate() {
        let pad = widths[i].saturating_sub(cell.chars().count());
        if right_align[i] {
            parts.push(format!("{}{}", " ".repeat(pad), cell));
        } else {
            parts.push(format!("{}{}", cell, " ".repeat(pad)));
        }
    }
    let line = parts.join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

fn elem_text(data: &TensorData, i: usize) -> String {
    match data {
        TensorData::F64(v) => float_repr(v[i]),
        TensorData::F32(v) => float_repr(v[i] as f64),
        TensorData::I64(v) => v[i].to_string(),
        TensorData::I32(v) => v[i].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> Table {
        Table::new(vec![
            Column::named("id", ColumnData::Int(vec![1, 22, 333])),
            Column::named("label", ColumnData::Str(vec!["a".into(), "bb".into(), "c".into()])),
        ])
        .unwrap()
    }

    #[test]
    fn table_renders_aligned_columns() {
        let out = render_table(&sample_table(), &RenderOptions::default());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], " id  label");
        assert_eq!(lines[1], "  1  a");
        assert_eq!(lines[2], " 22  bb");
        assert_eq!(lines[3], "333  c");
    }

    #[test]
    fn long_tables_elide_the_middle() {
        let table = Table::new(vec![Column::named(
            "n",
            ColumnData::Int((0..100).collect()),
        )])
        .unwrap();
        let out = render_table(&table, &RenderOptions { max_rows: Some(10) });
        assert!(out.contains("..."));
        assert!(out.contains("[100 rows x 1 columns]"));
        assert!(out.contains("0"));
        assert!(out.contains("99"));
        // 1 header + 10 data rows + 1 ellipsis row + footer.
        assert!(out.lines().count() <= 14);
    }

    #[test]
    fn cat_never_elides() {
        let table = Table::new(vec![Column::named(
            "n",
            ColumnData::Int((0..100).collect()),
        )])
        .unwrap();
        let out = cat(&Value::Table(table));
        assert!(!out.contains("..."));
        assert_eq!(out.lines().count(), 101);
    }

    #[test]
    fn column_render_includes_type_footer() {
        let col = Column::named("v", ColumnData::Float(vec![1.0, 2.5]));
        let out = render_column(&col, &RenderOptions::default());
        assert!(out.contains("1.0"));
        assert!(out.ends_with("(2 entries, type float)\n"));
    }

    #[test]
    fn tensor_ranks_render_distinctly() {
        let scalar = Tensor::new(vec![], TensorData::I32(vec![7])).unwrap();
        assert_eq!(render_tensor(&scalar), "7");

        let vector = Tensor::new(vec![3], TensorData::I64(vec![1, 2, 3])).unwrap();
        assert_eq!(render_tensor(&vector), "[1, 2, 3]");

        let matrix =
            Tensor::new(vec![2, 2], TensorData::F64(vec![1.0, 2.0, 3.0, 4.0])).unwrap();
        assert_eq!(render_tensor(&matrix), "[[1.0, 2.0],\n [3.0, 4.0]]");

        let cube = Tensor::new(vec![1, 1, 2], TensorData::I32(vec![5, 6])).unwrap();
        let out = render_tensor(&cube);
        assert!(out.starts_with("tensor(i32, shape=[1, 1, 2])"));
        assert!(out.contains("[5, 6]"));
    }
}
