//! Database Module
//!
//! The entry point that owns every table and coordinates persistence.
//!
//! ## Responsibilities
//! - Load every table file in the data directory on open
//! - Resolve tables by name for all record and column operations
//! - Save dirty tables, skipping tables that have not changed
//! - Keep the directory in step when a table is renamed

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codec::TableFiles;
use crate::config::Config;
use crate::error::{FlatError, Result};
use crate::model::{Key, Record, Table};
use crate::render::TableRenderer;

/// A directory of tables
///
/// ## Ownership Model
///
/// - One `Database` value owns one directory; there is no global instance
///   and no locking, so a second `Database` on the same directory while
///   this one is alive is undefined
/// - Tables are owned by the map and only reachable through name-qualified
///   operations
/// - All I/O happens inline: on `open`, `save_database`, `save_table` and
///   `rename_table`
#[derive(Debug)]
pub struct Database {
    /// Database configuration
    config: Config,

    /// Reads and writes the table files in `config.data_dir`
    files: TableFiles,

    /// Tables keyed by name
    tables: HashMap<String, Table>,
}

impl Database {
    /// Open or create a database with the given config
    ///
    /// On open:
    /// 1. Create the data directory if it doesn't exist
    /// 2. Discover table files
    /// 3. Decode each one with the configured encoding
    ///
    /// Any failure in step 3 fails the whole open; a partially loaded
    /// database is never returned. A table stored only in the other
    /// encoding fails with `FileNotFound`.
    pub fn open(config: Config) -> Result<Self> {
        // Step 1: Create data directory if it doesn't exist
        fs::create_dir_all(&config.data_dir)?;

        let files = TableFiles::new(&config.data_dir, config.encoding, config.sync_writes);

        // Step 2: Discover table files
        let names = files.scan()?;

        // Step 3: Load every table
        let mut tables = HashMap::with_capacity(names.len());
        for name in names {
            let table = files.read(&name)?;
            tables.insert(name, table);
        }

        info!(
            data_dir = %config.data_dir.display(),
            encoding = %config.encoding,
            tables = tables.len(),
            "Database opened"
        );

        Ok(Self {
            config,
            files,
            tables,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified data directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().data_dir(path).build())
    }

    // =========================================================================
    // Tables
    // =========================================================================

    /// Create an empty table from a comma-and-space separated schema
    pub fn add_table(&mut self, name: &str, field_names_csv: &str) -> Result<()> {
        Self::check_table_name(name)?;
        if self.tables.contains_key(name) {
            return Err(FlatError::DuplicateTable(name.to_string()));
        }
        self.tables
            .insert(name.to_string(), Table::new(name, field_names_csv));
        debug!(table = name, fields = field_names_csv, "Added table");
        Ok(())
    }

    pub fn get_table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| FlatError::TableNotFound(name.to_string()))
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Names of all tables, sorted
    pub fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.keys().cloned().collect();
        names.sort();
        names
    }

    /// Rename a table and drop its old file
    ///
    /// The table is written under its new name by the next save.
    pub fn rename_table(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        if self.tables.contains_key(new_name) {
            return Err(FlatError::DuplicateTable(new_name.to_string()));
        }
        Self::check_table_name(new_name)?;
        let mut table = self
            .tables
            .remove(old_name)
            .ok_or_else(|| FlatError::TableNotFound(old_name.to_string()))?;

        if let Err(e) = self.files.remove(old_name) {
            self.tables.insert(old_name.to_string(), table);
            return Err(e);
        }

        table.rename(new_name);
        self.tables.insert(new_name.to_string(), table);
        debug!(from = old_name, to = new_name, "Renamed table");
        Ok(())
    }

    // =========================================================================
    // Records
    // =========================================================================

    /// Add a record to a table, returning its key
    pub fn add_record<I, S>(&mut self, table: &str, fields: I) -> Result<Key>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.get_table_mut(table)?.add_record(fields)
    }

    pub fn get_record(&self, table: &str, key: Key) -> Result<&Record> {
        self.get_table(table)?.get_record(key)
    }

    pub fn update_record(
        &mut self,
        table: &str,
        key: Key,
        field_name: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        self.get_table_mut(table)?
            .update_record(key, field_name, value)
    }

    pub fn delete_record(&mut self, table: &str, key: Key) -> Result<Record> {
        self.get_table_mut(table)?.delete_record(key)
    }

    // =========================================================================
    // Columns
    // =========================================================================

    pub fn field_names(&self, table: &str) -> Result<&[String]> {
        Ok(self.get_table(table)?.field_names())
    }

    pub fn add_column(
        &mut self,
        table: &str,
        index: usize,
        name: &str,
        default_value: &str,
    ) -> Result<()> {
        self.get_table_mut(table)?
            .add_column(index, name, default_value)
    }

    pub fn delete_column(&mut self, table: &str, name: &str) -> Result<()> {
        self.get_table_mut(table)?.delete_column(name)
    }

    pub fn rename_column(&mut self, table: &str, old_name: &str, new_name: &str) -> Result<()> {
        self.get_table_mut(table)?.rename_column(old_name, new_name)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Render a table as a text grid
    pub fn render_table(&self, table: &str) -> Result<String> {
        let table = self.get_table(table)?;
        Ok(TableRenderer::render(table.name(), &table.to_matrix()))
    }

    /// Write a table as a text grid to `writer`
    pub fn print_table<W: Write>(&self, table: &str, writer: &mut W) -> Result<()> {
        let table = self.get_table(table)?;
        TableRenderer::write_to(writer, table.name(), &table.to_matrix())
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write every dirty table to disk
    ///
    /// Returns the number of table files written. Clean tables are skipped,
    /// so a second call with no changes in between writes nothing.
    ///
    /// The first failure stops the save. Tables written before it stay
    /// written and clean; there is no rollback.
    pub fn save_database(&mut self) -> Result<usize> {
        let mut written = 0;
        for table in self.tables.values_mut() {
            if !table.is_dirty() {
                continue;
            }
            self.files.write(table)?;
            table.mark_clean();
            written += 1;
        }

        info!(
            written,
            tables = self.tables.len(),
            "Database saved"
        );
        Ok(written)
    }

    /// Write one table to disk if it is dirty
    ///
    /// Returns whether the file was written.
    pub fn save_table(&mut self, name: &str) -> Result<bool> {
        let table = self
            .tables
            .get_mut(name)
            .ok_or_else(|| FlatError::TableNotFound(name.to_string()))?;
        if !table.is_dirty() {
            return Ok(false);
        }
        self.files.write(table)?;
        table.mark_clean();
        Ok(true)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Path of the file a table is saved to
    pub fn table_path(&self, name: &str) -> PathBuf {
        self.files.path_for(name)
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn get_table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| FlatError::TableNotFound(name.to_string()))
    }

    /// Table names double as file names
    fn check_table_name(name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(FlatError::InvalidArgument(
                "Table name must not be empty".to_string(),
            ));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(FlatError::InvalidArgument(format!(
                "Table name {:?} cannot be used as a file name",
                name
            )));
        }
        Ok(())
    }
}
