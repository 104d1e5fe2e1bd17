use crate::column::{Column, ColumnData};
use crate::error::{TypeError, TypeResult};

/// Named columns of equal length, forming ordered rows.
///
/// Columns may hold different scalar types from one another; each column is
/// itself homogeneous. Rows are ordered but carry no identity of their own:
/// there is no implicit index, and none is ever persisted.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from columns, validating that all lengths agree.
    pub fn new(columns: Vec<Column>) -> TypeResult<Self> {
        if let Some(first) = columns.first() {
            let expected = first.len();
            for col in &columns[1..] {
                if col.len() != expected {
                    return Err(TypeError::RaggedColumns {
                        name: col.name().unwrap_or_default().to_string(),
                        expected,
                        actual: col.len(),
                    });
                }
            }
        }
        Ok(Self { columns })
    }

    /// Wrap a single column as a one-column table.
    pub fn from_column(column: Column) -> Self {
        Self {
            columns: vec![column],
        }
    }

    /// The columns in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Number of rows (zero for a table with no columns).
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns.
    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    /// Column names in order; unnamed columns contribute an empty string.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.name().unwrap_or_default())
            .collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> TypeResult<&Column> {
        self.columns
            .iter()
            .find(|c| c.name() == Some(name))
            .ok_or_else(|| TypeError::UnknownColumn(name.to_string()))
    }

    /// Project onto the named columns, in the order given.
    pub fn select(&self, names: &[&str]) -> TypeResult<Table> {
        let columns = names
            .iter()
            .map(|name| self.column(name).cloned())
            .collect::<TypeResult<Vec<_>>>()?;
        // Projection cannot introduce ragged lengths.
        Ok(Table { columns })
    }

    /// Keep the rows whose mask position is `true`.
    pub fn filter_rows(&self, mask: &[bool]) -> TypeResult<Table> {
        if mask.len() != self.n_rows() {
            return Err(TypeError::MaskLengthMismatch {
                expected: self.n_rows(),
                actual: mask.len(),
            });
        }
        let columns = self
            .columns
            .iter()
            .map(|c| c.filter(mask))
            .collect::<TypeResult<Vec<_>>>()?;
        Ok(Table { columns })
    }

    /// Text form of the cell at `(row, col)`, for encoding and display.
    pub fn cell_text(&self, row: usize, col: usize) -> String {
        self.columns[col].data().cell_text(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(vec![
            Column::named("a", ColumnData::Int(vec![1, 2, 3])),
            Column::named("b", ColumnData::Str(vec!["x".into(), "y".into(), "z".into()])),
        ])
        .unwrap()
    }

    #[test]
    fn shape_and_names() {
        let t = sample();
        assert_eq!(t.shape(), (3, 2));
        assert_eq!(t.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn ragged_columns_rejected() {
        let err = Table::new(vec![
            Column::named("a", ColumnData::Int(vec![1, 2])),
            Column::named("b", ColumnData::Int(vec![1])),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            TypeError::RaggedColumns {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn select_projects_in_requested_order() {
        let t = sample();
        let projected = t.select(&["b", "a"]).unwrap();
        assert_eq!(projected.column_names(), vec!["b", "a"]);
        assert_eq!(projected.n_rows(), 3);
    }

    #[test]
    fn select_unknown_column_fails() {
        let t = sample();
        assert!(matches!(
            t.select(&["a", "missing"]).unwrap_err(),
            TypeError::UnknownColumn(name) if name == "missing"
        ));
    }

    #[test]
    fn filter_rows_applies_to_every_column() {
        let t = sample();
        let filtered = t.filter_rows(&[true, false, true]).unwrap();
        assert_eq!(filtered.n_rows(), 2);
        assert_eq!(
            filtered.column("b").unwrap().data(),
            &ColumnData::Str(vec!["x".into(), "z".into()])
        );
    }

    #[test]
    fn empty_table_has_zero_shape() {
        let t = Table::new(vec![]).unwrap();
        assert_eq!(t.shape(), (0, 0));
    }
}
