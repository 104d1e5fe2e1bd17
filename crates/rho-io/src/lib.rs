//! File and console I/O collaborators for rho.
//!
//! Everything here sits outside the persistence core and talks to it only
//! through the canonical delimited text form from `rho-codec`:
//!
//! - [`delimited`] -- CSV/TSV readers and writers over [`Table`](rho_types::Table)
//! - [`render`] -- console pretty-printing of values
//! - [`sink`] -- redirecting rendered output to a file and back
//!
//! None of this touches record bytes; the store's on-disk format is owned
//! entirely by `rho-store`.

pub mod delimited;
pub mod error;
pub mod render;
pub mod sink;

pub use delimited::{read_csv, read_delimited, read_tsv, write_csv, write_delimited};
pub use error::{IoError, IoResult};
pub use render::{cat, render_value, RenderOptions};
pub use sink::Sink;
