//! Table file naming
//!
//! `{table name}{extension}` and the reverse mapping used when scanning a
//! directory.

use std::path::Path;

use crate::error::{FlatError, Result};

/// Extension for natively serialized tables
pub const NATIVE_EXTENSION: &str = ".ser";

/// Extension for text-encoded tables
pub const TEXT_EXTENSION: &str = ".tbl";

/// Derive a table name from a file name
///
/// Returns:
/// - `Ok(Some(name))`: a table file; the recognized extension is stripped
/// - `Ok(None)`: no extension at all (including dot files like `.DS_Store`);
///   not a table file, skip it
/// - `Err(UnrecognizedExtension)`: some other extension
pub fn table_name_from_file_name(file_name: &str) -> Result<Option<String>> {
    for extension in [NATIVE_EXTENSION, TEXT_EXTENSION] {
        if let Some(stem) = file_name.strip_suffix(extension) {
            // A bare ".ser" is a hidden file, not a table with an empty name.
            if stem.is_empty() {
                return Ok(None);
            }
            return Ok(Some(stem.to_string()));
        }
    }

    match Path::new(file_name).extension() {
        Some(_) => Err(FlatError::UnrecognizedExtension(file_name.to_string())),
        None => Ok(None),
    }
}
