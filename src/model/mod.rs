//! Model Module
//!
//! The in-memory data model: tables of keyed records.
//!
//! ## Responsibilities
//! - Hold each table's schema (ordered column names) and its records
//! - Assign keys and enforce the field count on every record
//! - Track whether a table changed since it was last loaded or saved
//! - Render a table to a row/column matrix and rebuild it from one
//!
//! ## Matrix Layout
//! ```text
//! row 0   │ FORMAT_VERSION                         │
//! row 1   │ KEY_COLUMN_NAME │ field 0 │ field 1 │…│
//! row 2.. │ key (decimal)   │ value   │ value   │…│
//! ```

mod matrix;
mod record;
mod table;

pub use matrix::{Matrix, FORMAT_VERSION, KEY_COLUMN_NAME};
pub use record::Record;
pub use table::Table;

/// Key identifying a record within one table
///
/// Signed so that bad input coming from files or the command line can be
/// rejected explicitly; stored keys are always non-negative.
pub type Key = i64;
