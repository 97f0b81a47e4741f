//! # flatdb
//!
//! A minimal embedded record store:
//! - Named tables of integer-keyed records made of text fields
//! - One flat file per table, reloaded when the database is opened
//! - Two interchangeable file encodings (native serde/bincode, hex text lines)
//! - Incremental saves driven by a per-table dirty flag
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 CLI / console front end                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ name-qualified operations
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Database                             │
//! │               (name → Table, bulk save)                     │
//! └──────────┬─────────────────────────────────┬────────────────┘
//!            │                                 │
//!            ▼                                 ▼
//!   ┌─────────────────┐              ┌──────────────────┐
//!   │  Table / Record │─ to_matrix ─▶│   Table Codec    │
//!   │  (model)        │◀ from_matrix─│ (native | text)  │
//!   └─────────────────┘              └────────┬─────────┘
//!                                             │
//!                                             ▼
//!                                    ┌──────────────────┐
//!                                    │  {data_dir}/*.tbl│
//!                                    └──────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod codec;
pub mod render;
pub mod database;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FlatError, Result};
pub use config::Config;
pub use codec::EncodingKind;
pub use database::Database;
pub use model::{Key, Record, Table};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of flatdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
