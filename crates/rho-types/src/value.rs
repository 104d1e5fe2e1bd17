use std::fmt;

use crate::column::Column;
use crate::table::Table;
use crate::tensor::Tensor;

/// The closed set of storable value kinds, as serialized in record headers.
///
/// Exactly one tag exists per [`Value`] variant. Decoders reject any tag
/// outside this enumeration; there is no "unknown" escape hatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Table,
    Column,
    Tensor,
}

impl TypeTag {
    /// The tag as written on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Column => "column",
            Self::Tensor => "tensor",
        }
    }

    /// Parse a wire tag; `None` for anything outside the enumeration.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "table" => Some(Self::Table),
            "column" => Some(Self::Column),
            "tensor" => Some(Self::Tensor),
            _ => None,
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A storable value: the tagged union over the three supported kinds.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Table(Table),
    Column(Column),
    Tensor(Tensor),
}

impl Value {
    /// The tag identifying this variant.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Self::Table(_) => TypeTag::Table,
            Self::Column(_) => TypeTag::Column,
            Self::Tensor(_) => TypeTag::Tensor,
        }
    }

    /// The contained table, if this is one.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(t) => Some(t),
            _ => None,
        }
    }

    /// The contained column, if this is one.
    pub fn as_column(&self) -> Option<&Column> {
        match self {
            Self::Column(c) => Some(c),
            _ => None,
        }
    }

    /// The contained tensor, if this is one.
    pub fn as_tensor(&self) -> Option<&Tensor> {
        match self {
            Self::Tensor(t) => Some(t),
            _ => None,
        }
    }
}

impl From<Table> for Value {
    fn from(t: Table) -> Self {
        Self::Table(t)
    }
}

impl From<Column> for Value {
    fn from(c: Column) -> Self {
        Self::Column(c)
    }
}

impl From<Tensor> for Value {
    fn from(t: Tensor) -> Self {
        Self::Tensor(t)
    }
}

/// Canonical text form of an `f64`.
///
/// Uses the standard shortest round-trip formatting, then guarantees the
/// result still reads back as a float: a value whose shortest form looks
/// like an integer (`1` for `1.0`) gets a trailing `.0`, so delimited-text
/// type inference cannot demote a float column to an integer column.
pub fn float_repr(v: f64) -> String {
    let s = v.to_string();
    if v.is_finite() && !s.contains('.') {
        format!("{s}.0")
    } else {
        s
    }
}
