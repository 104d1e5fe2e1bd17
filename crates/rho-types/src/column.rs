use crate::error::{TypeError, TypeResult};
use crate::value::float_repr;

/// Backing storage for a column: one vector per supported scalar type.
///
/// A column is homogeneous. Mixed inputs (for example a delimited file whose
/// fields do not all parse as one numeric type) land in [`ColumnData::Str`].
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Bool(Vec<bool>),
    Str(Vec<String>),
}

impl ColumnData {
    /// Number of entries.
    pub fn len(&self) -> usize {
        match self {
            Self::Int(v) => v.len(),
            Self::Float(v) => v.len(),
            Self::Bool(v) => v.len(),
            Self::Str(v) => v.len(),
        }
    }

    /// Returns `true` if the column holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name of the scalar type held by this column.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Str(_) => "str",
        }
    }

    /// Canonical text form of entry `i`.
    ///
    /// Floats use [`float_repr`], so the text re-parses to the exact same
    /// value and to the same column type.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds, like slice indexing.
    pub fn cell_text(&self, i: usize) -> String {
        match self {
            Self::Int(v) => v[i].to_string(),
            Self::Float(v) => float_repr(v[i]),
            Self::Bool(v) => v[i].to_string(),
            Self::Str(v) => v[i].clone(),
        }
    }

    /// Returns `true` if the column holds ints or floats.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }
}

/// A single ordered sequence of same-typed scalars, optionally named.
///
/// A `Column` is what a one-dimensional slice of a [`Table`](crate::Table)
/// reduces to; it is also a storable value in its own right.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    name: Option<String>,
    data: ColumnData,
}

impl Column {
    /// Create a named column.
    pub fn named(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: Some(name.into()),
            data,
        }
    }

    /// Create an unnamed column.
    pub fn unnamed(data: ColumnData) -> Self {
        Self { name: None, data }
    }

    /// The column name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The backing data.
    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the column holds no entries.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Keep the entries whose mask position is `true`.
    pub fn filter(&self, mask: &[bool]) -> TypeResult<Column> {
        if mask.len() != self.len() {
            return Err(TypeError::MaskLengthMismatch {
                expected: self.len(),
                actual: mask.len(),
            });
        }
        fn keep<T: Clone>(values: &[T], mask: &[bool]) -> Vec<T> {
            values
                .iter()
                .zip(mask)
                .filter(|(_, keep)| **keep)
                .map(|(v, _)| v.clone())
                .collect()
        }
        let data = match &self.data {
            ColumnData::Int(v) => ColumnData::Int(keep(v, mask)),
            ColumnData::Float(v) => ColumnData::Float(keep(v, mask)),
            ColumnData::Bool(v) => ColumnData::Bool(keep(v, mask)),
            ColumnData::Str(v) => ColumnData::Str(keep(v, mask)),
        };
        Ok(Column {
            name: self.name.clone(),
            data,
        })
    }

    /// Distinct entries in first-seen order.
    pub fn unique(&self) -> Column {
        fn dedup<T, K, F>(values: &[T], key: F) -> Vec<T>
        where
            T: Clone,
            K: std::hash::Hash + Eq,
            F: Fn(&T) -> K,
        {
            let mut seen = std::collections::HashSet::new();
            values
                .iter()
                .filter(|v| seen.insert(key(v)))
                .cloned()
                .collect()
        }
        let data = match &self.data {
            ColumnData::Int(v) => ColumnData::Int(dedup(v, |x| *x)),
            // Floats are keyed by bit pattern so -0.0 and 0.0 stay distinct
            // and NaN does not absorb everything.
            ColumnData::Float(v) => ColumnData::Float(dedup(v, |x| x.to_bits())),
            ColumnData::Bool(v) => ColumnData::Bool(dedup(v, |x| *x)),
            ColumnData::Str(v) => ColumnData::Str(dedup(v, |x| x.clone())),
        };
        Column {
            name: self.name.clone(),
            data,
        }
    }

    /// The entries widened to `f64`, for feeding numeric routines.
    ///
    /// Fails with [`TypeError::NonNumericColumn`] for bool and string
    /// columns; there is no implicit coercion from those.
    pub fn to_f64s(&self) -> TypeResult<Vec<f64>> {
        match &self.data {
            ColumnData::Int(v) => Ok(v.iter().map(|x| *x as f64).collect()),
            ColumnData::Float(v) => Ok(v.clone()),
            _ => Err(TypeError::NonNumericColumn(
                self.name.clone().unwrap_or_default(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_keeps_masked_entries() {
        let col = Column::named("a", ColumnData::Int(vec![1, 2, 3, 4]));
        let filtered = col.filter(&[true, false, true, false]).unwrap();
        assert_eq!(filtered.data(), &ColumnData::Int(vec![1, 3]));
        assert_eq!(filtered.name(), Some("a"));
    }

    #[test]
    fn filter_rejects_wrong_mask_length() {
        let col = Column::unnamed(ColumnData::Bool(vec![true, false]));
        let err = col.filter(&[true]).unwrap_err();
        assert!(matches!(
            err,
            TypeError::MaskLengthMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }

    #[test]
    fn unique_preserves_first_seen_order() {
        let col = Column::unnamed(ColumnData::Str(vec![
            "b".into(),
            "a".into(),
            "b".into(),
            "c".into(),
            "a".into(),
        ]));
        let uniq = col.unique();
        assert_eq!(
            uniq.data(),
            &ColumnData::Str(vec!["b".into(), "a".into(), "c".into()])
        );
    }

    #[test]
    fn unique_distinguishes_float_zero_signs() {
        let col = Column::unnamed(ColumnData::Float(vec![0.0, -0.0, 0.0]));
        assert_eq!(col.unique().len(), 2);
    }

    #[test]
    fn to_f64s_widens_ints() {
        let col = Column::unnamed(ColumnData::Int(vec![1, 2]));
        assert_eq!(col.to_f64s().unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn to_f64s_rejects_strings() {
        let col = Column::named("s", ColumnData::Str(vec!["x".into()]));
        assert!(matches!(
            col.to_f64s().unwrap_err(),
            TypeError::NonNumericColumn(name) if name == "s"
        ));
    }
}
