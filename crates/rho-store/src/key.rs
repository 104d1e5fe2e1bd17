//! Store key validation.
//!
//! Keys map 1:1 to filenames inside the store directory, so they must be
//! safe, portable filenames:
//! - non-empty, at most 255 bytes
//! - no path separators, NUL, or other control characters
//! - not `.` or `..`, and no leading `.` (the store reserves dotfiles for
//!   its own temporaries)

use crate::error::{StoreError, StoreResult};

/// Characters that are forbidden anywhere in a key.
const FORBIDDEN_CHARS: &[char] = &['/', '\\', '\0'];

const MAX_KEY_BYTES: usize = 255;

/// Validate a store key, returning `Ok(())` if it is a safe filename.
pub fn validate_key(name: &str) -> StoreResult<()> {
    let invalid = |reason: &str| StoreError::InvalidKey {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("key must not be empty"));
    }
    if name.len() > MAX_KEY_BYTES {
        return Err(invalid("key exceeds 255 bytes"));
    }
    if name == "." || name == ".." {
        return Err(invalid("key must not be a directory reference"));
    }
    if name.starts_with('.') {
        return Err(invalid("key must not start with '.'"));
    }
    for ch in FORBIDDEN_CHARS {
        if name.contains(*ch) {
            return Err(invalid(&format!("contains forbidden character {ch:?}")));
        }
    }
    if name.chars().any(char::is_control) {
        return Err(invalid("contains a control character"));
    }
    Ok(())
}
