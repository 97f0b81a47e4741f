//! Record implementation
//!
//! An ordered, resizable tuple of text fields.

use serde::{Deserialize, Serialize};

use crate::error::{FlatError, Result};

/// A single row of a table, minus its key
///
/// Records know nothing about keys or column names; the owning
/// [`Table`](super::Table) keeps the field count in line with its schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    /// Create a record from its field values
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Get the field at `index`
    pub fn get(&self, index: usize) -> Result<&str> {
        self.fields
            .get(index)
            .map(String::as_str)
            .ok_or(FlatError::IndexOutOfRange {
                index,
                len: self.fields.len(),
            })
    }

    /// Replace the field at `index`
    pub fn update(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        let len = self.fields.len();
        let slot = self
            .fields
            .get_mut(index)
            .ok_or(FlatError::IndexOutOfRange { index, len })?;
        *slot = value.into();
        Ok(())
    }

    /// Insert a field at `index`, shifting later fields right
    ///
    /// `index == len()` appends.
    pub fn insert(&mut self, index: usize, value: impl Into<String>) -> Result<()> {
        if index > self.fields.len() {
            return Err(FlatError::IndexOutOfRange {
                index,
                len: self.fields.len(),
            });
        }
        self.fields.insert(index, value.into());
        Ok(())
    }

    /// Remove the field at `index`, returning its value
    pub fn delete(&mut self, index: usize) -> Result<String> {
        if index >= self.fields.len() {
            return Err(FlatError::IndexOutOfRange {
                index,
                len: self.fields.len(),
            });
        }
        Ok(self.fields.remove(index))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// All field values in order
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }
}

impl From<Vec<String>> for Record {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}

impl<S: Into<String>> FromIterator<S> for Record {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
