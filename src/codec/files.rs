//! Table Files
//!
//! Reads and writes table files in one directory using the configured
//! encoding.
//!
//! ## Responsibilities
//! - Discover table files on startup
//! - Write tables so a reader never sees a half-written file
//! - Report a missing table file distinctly from other I/O failures
//! - Remove the file of a table that has been renamed

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{FlatError, Result};
use crate::model::Table;

use super::{table_name_from_file_name, Encoding, EncodingKind};

/// Suffix of the scratch file a table is written to before it is renamed
/// into place
const TEMP_SUFFIX: &str = ".tmp";

/// The table files of one directory
#[derive(Debug)]
pub struct TableFiles {
    /// Directory holding the table files
    dir: PathBuf,

    /// Encoding used for every read and write
    encoding: Box<dyn Encoding>,

    /// fsync each file before renaming it into place
    sync_writes: bool,
}

impl TableFiles {
    pub fn new(dir: impl Into<PathBuf>, kind: EncodingKind, sync_writes: bool) -> Self {
        Self {
            dir: dir.into(),
            encoding: kind.encoding(),
            sync_writes,
        }
    }

    /// Discover the names of all tables with a file in the directory
    ///
    /// Files without an extension, with an unrecognized extension (including
    /// leftover `.tmp` files) or with a non UTF-8 name are skipped. A table
    /// stored in either encoding is listed once, sorted by name.
    pub fn scan(&self) -> Result<Vec<String>> {
        let mut names = BTreeSet::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                debug!(path = %path.display(), "Skipping file with non UTF-8 name");
                continue;
            };

            match table_name_from_file_name(file_name) {
                Ok(Some(name)) => {
                    names.insert(name);
                }
                Ok(None) => debug!(file = file_name, "Skipping non-table file"),
                Err(FlatError::UnrecognizedExtension(_)) => {
                    debug!(file = file_name, "Skipping file with unrecognized extension")
                }
                Err(e) => return Err(e),
            }
        }

        Ok(names.into_iter().collect())
    }

    /// Write a table to `{dir}/{name}{ext}`, creating the directory if needed
    ///
    /// The bytes go to a scratch file first, which is then renamed over the
    /// previous version. Returns the path written.
    pub fn write(&self, table: &Table) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let bytes = self.encoding.encode(table)?;
        let path = self.path_for(table.name());
        let temp_path = Self::temp_path(&path);

        if let Err(e) = self.write_file(&temp_path, &bytes) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        fs::rename(&temp_path, &path)?;

        debug!(
            table = table.name(),
            path = %path.display(),
            bytes = bytes.len(),
            "Wrote table file"
        );
        Ok(path)
    }

    /// Read and decode the table called `name`
    ///
    /// Fails with `FileNotFound` when there is no such file, and with a fatal
    /// error when the file cannot be decoded.
    pub fn read(&self, name: &str) -> Result<Table> {
        let path = self.path_for(name);
        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FlatError::FileNotFound(path.clone()),
            _ => FlatError::Io(e),
        })?;

        let table = self.encoding.decode(name, &bytes)?;
        debug!(
            table = name,
            records = table.num_records(),
            path = %path.display(),
            "Read table file"
        );
        Ok(table)
    }

    /// Delete the file of the table called `name`
    ///
    /// Returns whether a file was removed; a missing file is not an error.
    pub fn remove(&self, name: &str) -> Result<bool> {
        let path = self.path_for(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(table = name, path = %path.display(), "Removed table file");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Path of the file for the table called `name`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}", name, self.encoding.extension()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn encoding(&self) -> &dyn Encoding {
        self.encoding.as_ref()
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn write_file(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(bytes)?;
        if self.sync_writes {
            file.sync_all()?;
        }
        Ok(())
    }

    /// "Animal.tbl" → "Animal.tbl.tmp"
    fn temp_path(path: &Path) -> PathBuf {
        let mut name = OsString::from(path.as_os_str());
        name.push(TEMP_SUFFIX);
        PathBuf::from(name)
    }
}
