//! Foundation types for rho.
//!
//! This crate provides the in-memory value model shared by every other rho
//! crate: tabular data, single columns, and n-dimensional numeric arrays,
//! plus the closed tagged union over them.
//!
//! # Key Types
//!
//! - [`Table`] -- named columns, ordered rows, heterogeneous column types
//! - [`Column`] -- a single ordered sequence of same-typed scalars
//! - [`Tensor`] -- n-dimensional homogeneous numeric array with fixed shape
//! - [`Value`] -- the closed sum over the three variants above
//! - [`TypeTag`] -- the serialized kind discriminant (`table`, `column`, `tensor`)
//!
//! # Design Rules
//!
//! 1. `Value` is a closed enum. Every encode/decode site matches it
//!    exhaustively, so adding a variant is a compile-time-visible change.
//! 2. Constructors validate structural invariants (equal column lengths,
//!    shape/element-count agreement) and fail with [`TypeError`] rather than
//!    producing inconsistent values.
//! 3. No implicit row index exists anywhere in the model. A row index, if
//!    wanted, is an ordinary explicit column.

pub mod column;
pub mod error;
pub mod table;
pub mod tensor;
pub mod value;

pub use column::{Column, ColumnData};
pub use error::{TypeError, TypeResult};
pub use table::Table;
pub use tensor::{ElementType, Tensor, TensorData, MAX_RANK};
pub use value::{float_repr, TypeTag, Value};
