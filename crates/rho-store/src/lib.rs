//! Directory-backed value store for rho.
//!
//! This crate is the persistence core. It glues three pieces together:
//!
//! - [`CodecRegistry`] -- discovers which compression codecs this build
//!   carries and picks one deterministic active codec for new writes.
//! - [`Record`] -- the on-disk container: a type-tag line, a
//!   compression-tag line, then the (possibly compressed) payload.
//! - [`DataStore`] -- the directory of one file per saved key, offering
//!   `save`, `load`, `list`, and `remove`.
//!
//! # On-disk layout
//!
//! ```text
//! .rho-data/
//!   m        <- "tensor\nzstd\n" + compressed tensor block
//!   t        <- "table\nnone\n"  + delimited text
//! ```
//!
//! The two header lines stay uncompressed so a record is inspectable with
//! `head -2`, and new tags can appear without changing the framing.
//!
//! # Design Rules
//!
//! 1. The registry is an explicitly constructed, immutable value, never a
//!    process-global; tests inject forced or restricted registries.
//! 2. The accepted tag set on read is always a superset of what the writer
//!    may choose: a record compressed by a codec this build lacks is a
//!    clean [`StoreError::UnsupportedCodec`], never a crash.
//! 3. Saves replace the whole record via write-to-temp-then-rename, so a
//!    reader never observes a half-written file after a crash.
//! 4. Errors are terminal for the operation; nothing retries and nothing is
//!    silently swallowed.

pub mod error;
pub mod key;
pub mod record;
pub mod registry;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use key::validate_key;
pub use record::Record;
pub use registry::{CodecRegistry, Compression};
pub use store::{DataStore, STORE_DIR_NAME};

use rho_types::Value;

/// Backing function for [`save_var!`]: saves under a name captured from the
/// caller's source text, failing closed when that text is not a plain
/// identifier.
///
/// This is the only place name inference exists, and it is a best-effort
/// adapter layered on top of [`DataStore::save`]; the store itself always
/// takes an explicit name.
pub fn save_inferred(store: &DataStore, value: &Value, expr: &str) -> StoreResult<()> {
    let name = infer_name(expr)?;
    store.save(value, name)
}

fn infer_name(expr: &str) -> StoreResult<&str> {
    let candidate = expr.trim();
    let mut chars = candidate.chars();
    let plain_ident = match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if plain_ident {
        Ok(candidate)
    } else {
        Err(StoreError::NameInferenceFailed(expr.to_string()))
    }
}

/// Save a value under the name of the variable holding it.
///
/// ```ignore
/// let scores = Value::Column(column);
/// save_var!(store, scores)?; // saved as "scores"
/// save_var!(store, make_scores())?; // NameInferenceFailed: not a variable
/// ```
#[macro_export]
macro_rules! save_var {
    ($store:expr, $value:expr) => {
        $crate::save_inferred(&$store, &$value, stringify!($value))
    };
}
