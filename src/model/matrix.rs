//! Matrix form of a table
//!
//! The row/column text layout shared by the renderer and the text encoding.

use crate::error::{FlatError, Result};

use super::{Key, Table};

/// Rows of text cells
pub type Matrix = Vec<Vec<String>>;

/// Format version written as row 0. Changes whenever the layout does.
pub const FORMAT_VERSION: &str = "1.0";

/// Header name of the implicit key column
pub const KEY_COLUMN_NAME: &str = "Key";

impl Table {
    /// Render the table as a matrix
    ///
    /// Row 0 holds the format version, row 1 the header (key column then
    /// field names), and each following row a key and its fields, in
    /// ascending key order.
    pub fn to_matrix(&self) -> Matrix {
        let mut matrix = Vec::with_capacity(self.records.len() + 2);
        matrix.push(vec![FORMAT_VERSION.to_string()]);

        let mut header = Vec::with_capacity(self.field_names.len() + 1);
        header.push(KEY_COLUMN_NAME.to_string());
        header.extend(self.field_names.iter().cloned());
        matrix.push(header);

        for (key, record) in &self.records {
            let mut row = Vec::with_capacity(record.len() + 1);
            row.push(key.to_string());
            row.extend(record.fields().iter().cloned());
            matrix.push(row);
        }

        matrix
    }

    /// Rebuild a table from the output of [`Table::to_matrix`]
    ///
    /// The version row must match [`FORMAT_VERSION`] exactly; there is no
    /// migration between versions. Every data row is replayed through
    /// `insert_record`, so its schema and key errors surface unchanged.
    /// The returned table is clean.
    pub fn from_matrix(name: impl Into<String>, matrix: Matrix) -> Result<Table> {
        let mut rows = matrix.into_iter();

        let version_row = rows
            .next()
            .ok_or_else(|| FlatError::CorruptData("missing version row".to_string()))?;
        if version_row.len() != 1 || version_row[0] != FORMAT_VERSION {
            return Err(FlatError::VersionMismatch {
                expected: FORMAT_VERSION.to_string(),
                found: version_row.join(" "),
            });
        }

        let header = rows
            .next()
            .ok_or_else(|| FlatError::CorruptData("missing header row".to_string()))?;
        let mut header = header.into_iter();
        match header.next() {
            Some(first) if first == KEY_COLUMN_NAME => {}
            other => {
                return Err(FlatError::CorruptData(format!(
                    "header must start with {:?}, found {:?}",
                    KEY_COLUMN_NAME, other
                )))
            }
        }

        let mut table = Table::with_fields(name, header.collect());

        for row in rows {
            let mut cells = row.into_iter();
            let key_text = cells
                .next()
                .ok_or_else(|| FlatError::CorruptData("empty record row".to_string()))?;
            let key: Key = key_text.parse().map_err(|_| {
                FlatError::CorruptData(format!("record key {:?} is not an integer", key_text))
            })?;
            table.insert_record(key, cells)?;
        }

        table.mark_clean();
        Ok(table)
    }
}
