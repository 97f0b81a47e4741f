//! Table implementation
//!
//! Schema plus a BTreeMap of keyed records, with key assignment and
//! dirty tracking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{FlatError, Result};

use super::{Key, Record};

/// Separator between column names in a schema string ("Name, Breed")
const FIELD_NAME_SEPARATOR: &str = ", ";

/// A named table of records
///
/// ## Key Assignment
/// - `add_record` uses `next_key`, then advances it
/// - `insert_record` (used when loading) places a record at an explicit key
///   and moves `next_key` to just after it
/// - if `next_key` is already taken when `add_record` runs, it is recomputed
///   as one past the largest live key
/// - deleted keys are never handed out again by `add_record` alone
///
/// ## Dirty Flag
/// Set by every mutation, cleared only after a load or a successful save.
/// The flag is not persisted; a deserialized table always starts clean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub(super) name: String,
    pub(super) field_names: Vec<String>,
    pub(super) next_key: Key,
    pub(super) records: BTreeMap<Key, Record>,
    #[serde(skip)]
    pub(super) dirty: bool,
}

impl Table {
    /// Create an empty table from a comma-and-space separated schema
    ///
    /// `Table::new("Animal", "Name, Breed")` has two columns. An empty string
    /// gives a table with no columns.
    pub fn new(name: impl Into<String>, field_names_csv: &str) -> Self {
        let field_names = if field_names_csv.is_empty() {
            Vec::new()
        } else {
            field_names_csv
                .split(FIELD_NAME_SEPARATOR)
                .map(str::to_string)
                .collect()
        };
        Self::with_fields(name, field_names)
    }

    /// Create an empty table from an explicit list of column names
    pub fn with_fields(name: impl Into<String>, field_names: Vec<String>) -> Self {
        Self {
            name: name.into(),
            field_names,
            next_key: 0,
            records: BTreeMap::new(),
            dirty: true,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Column names in order, not including the key column
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Column names joined as "Name, Breed"
    pub fn field_names_csv(&self) -> String {
        self.field_names.join(FIELD_NAME_SEPARATOR)
    }

    pub fn num_fields(&self) -> usize {
        self.field_names.len()
    }

    pub fn num_records(&self) -> usize {
        self.records.len()
    }

    /// The key the next `add_record` will try first
    pub fn next_key(&self) -> Key {
        self.next_key
    }

    /// Whether the table changed since it was last loaded or saved
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Live keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.records.keys().copied()
    }

    /// Records with their keys in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (Key, &Record)> {
        self.records.iter().map(|(k, r)| (*k, r))
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Check the record invariants on a table built without going through
    /// `insert_record`, such as one deserialized wholesale.
    pub(crate) fn verify_integrity(&self) -> Result<()> {
        if self.next_key < 0 {
            return Err(FlatError::CorruptData(format!(
                "table {} has negative next key {}",
                self.name, self.next_key
            )));
        }
        for (key, record) in &self.records {
            if *key < 0 {
                return Err(FlatError::CorruptData(format!(
                    "table {} holds negative key {}",
                    self.name, key
                )));
            }
            if record.len() != self.field_names.len() {
                return Err(FlatError::CorruptData(format!(
                    "table {} record {} has {} fields, schema has {}",
                    self.name,
                    key,
                    record.len(),
                    self.field_names.len()
                )));
            }
        }
        Ok(())
    }

    // =========================================================================
    // Records
    // =========================================================================

    /// Add a record under the next free key, returning that key
    pub fn add_record<I, S>(&mut self, fields: I) -> Result<Key>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let record: Record = fields.into_iter().collect();
        self.check_field_count(&record)?;

        // Only possible after insert_record left next_key behind a live key.
        if self.records.contains_key(&self.next_key) {
            self.next_key = self.next_key_from_records();
        }

        let key = self.next_key;
        let next_key = key.checked_add(1).ok_or_else(|| {
            FlatError::InvalidArgument(format!("Key {} leaves no room for a next key", key))
        })?;
        self.records.insert(key, record);
        self.next_key = next_key;
        self.dirty = true;
        Ok(key)
    }

    /// Insert a record at an explicit key
    ///
    /// Intended for loaders rebuilding a table whose keys have gaps.
    /// `next_key` becomes `key + 1` whatever its previous value.
    pub fn insert_record<I, S>(&mut self, key: Key, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let record: Record = fields.into_iter().collect();
        self.check_field_count(&record)?;
        if key < 0 {
            return Err(FlatError::InvalidArgument(format!(
                "Key must be non-negative, got {}",
                key
            )));
        }
        let next_key = key.checked_add(1).ok_or_else(|| {
            FlatError::InvalidArgument(format!("Key {} leaves no room for a next key", key))
        })?;
        if self.records.contains_key(&key) {
            return Err(FlatError::DuplicateKey(key));
        }

        self.records.insert(key, record);
        self.next_key = next_key;
        self.dirty = true;
        Ok(())
    }

    pub fn get_record(&self, key: Key) -> Result<&Record> {
        self.records.get(&key).ok_or(FlatError::KeyNotFound(key))
    }

    /// Change one field of the record stored under `key`
    pub fn update_record(
        &mut self,
        key: Key,
        field_name: &str,
        value: impl Into<String>,
    ) -> Result<()> {
        let index = self.column_index(field_name)?;
        let record = self
            .records
            .get_mut(&key)
            .ok_or(FlatError::KeyNotFound(key))?;
        record.update(index, value)?;
        self.dirty = true;
        Ok(())
    }

    /// Remove the record stored under `key`, returning it
    pub fn delete_record(&mut self, key: Key) -> Result<Record> {
        let record = self
            .records
            .remove(&key)
            .ok_or(FlatError::KeyNotFound(key))?;
        self.dirty = true;
        Ok(record)
    }

    // =========================================================================
    // Columns
    // =========================================================================

    /// Insert a column at `index`, filling every record with `default_value`
    pub fn add_column(
        &mut self,
        index: usize,
        name: impl Into<String>,
        default_value: &str,
    ) -> Result<()> {
        if index > self.field_names.len() {
            return Err(FlatError::IndexOutOfRange {
                index,
                len: self.field_names.len(),
            });
        }
        let name = name.into();
        if self.field_names.contains(&name) {
            return Err(FlatError::DuplicateColumn(name));
        }

        self.field_names.insert(index, name);
        for record in self.records.values_mut() {
            record.insert(index, default_value)?;
        }
        self.dirty = true;
        Ok(())
    }

    /// Remove a column and its value from every record
    pub fn delete_column(&mut self, name: &str) -> Result<()> {
        let index = self.column_index(name)?;
        self.field_names.remove(index);
        for record in self.records.values_mut() {
            record.delete(index)?;
        }
        self.dirty = true;
        Ok(())
    }

    pub fn rename_column(&mut self, old_name: &str, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into();
        if self.field_names.contains(&new_name) {
            return Err(FlatError::DuplicateColumn(new_name));
        }
        let index = self.column_index(old_name)?;
        self.field_names[index] = new_name;
        self.dirty = true;
        Ok(())
    }

    pub fn rename(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
        self.dirty = true;
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn column_index(&self, name: &str) -> Result<usize> {
        self.field_names
            .iter()
            .position(|f| f == name)
            .ok_or_else(|| FlatError::UnknownColumn(name.to_string()))
    }

    fn check_field_count(&self, record: &Record) -> Result<()> {
        if record.len() != self.field_names.len() {
            return Err(FlatError::SchemaMismatch {
                expected: self.field_names.len(),
                actual: record.len(),
            });
        }
        Ok(())
    }

    /// One past the largest live key, or 0 for an empty table
    fn next_key_from_records(&self) -> Key {
        self.records
            .last_key_value()
            .map(|(key, _)| key + 1)
            .unwrap_or(0)
    }
}

/// Tables are equal when name, schema and every keyed record match.
/// `next_key` and the dirty flag are bookkeeping and do not take part.
impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        if self.name != other.name || self.field_names != other.field_names {
            return false;
        }
        if self.records.len() != other.records.len() {
            return false;
        }
        self.records
            .iter()
            .all(|(key, record)| other.records.get(key) == Some(record))
    }
}

impl Eq for Table {}
