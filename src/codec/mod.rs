//! Table Codec Module
//!
//! Converts tables to and from their on-disk form and manages table files.
//!
//! ## Responsibilities
//! - Encode/decode a table with one of two interchangeable encodings
//! - Map table names to file names and back
//! - Read, write (atomically) and remove table files in a directory
//!
//! ## Encodings
//! ```text
//! Native (.ser)                      Text (.tbl)
//! ┌──────────────────────────┐       ┌────────────────────────────────┐
//! │ Magic "FDBT" (4)         │       │ 1.0                            │
//! │ Version: u16 (2)         │       │ Key␟4e616d65␟4272656564        │
//! │ CRC32 of payload (4)     │       │ 0␟446f67␟436f726769            │
//! │ bincode(Table) payload   │       │ 3␟436174␟42656e67616c          │
//! └──────────────────────────┘       └────────────────────────────────┘
//!                                     ␟ = 0x1F, cells after the first
//!                                     are hex of their UTF-8 bytes
//! ```

mod files;
mod naming;
mod native;
mod text;

use std::fmt;

use crate::error::Result;
use crate::model::Table;

pub use files::TableFiles;
pub use naming::{table_name_from_file_name, NATIVE_EXTENSION, TEXT_EXTENSION};
pub use native::NativeEncoding;
pub use text::TextEncoding;

/// A way of turning a table into bytes and back
pub trait Encoding: fmt::Debug {
    /// Which encoding this is
    fn kind(&self) -> EncodingKind;

    /// File extension (with leading dot) used for tables in this encoding
    fn extension(&self) -> &'static str {
        self.kind().extension()
    }

    /// Serialize the full table state
    fn encode(&self, table: &Table) -> Result<Vec<u8>>;

    /// Rebuild a table from bytes produced by `encode`
    ///
    /// `name` is the table name derived from the file name. The result is
    /// clean (not dirty).
    fn decode(&self, name: &str, bytes: &[u8]) -> Result<Table>;
}

/// Selects an [`Encoding`] implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingKind {
    /// serde + bincode, wrapped in a checksummed envelope
    Native,

    /// Hex-escaped, unit-separator delimited lines
    Text,
}

impl EncodingKind {
    /// File extension (with leading dot) for this encoding
    pub fn extension(self) -> &'static str {
        match self {
            EncodingKind::Native => NATIVE_EXTENSION,
            EncodingKind::Text => TEXT_EXTENSION,
        }
    }

    /// Build the encoder/decoder for this kind
    pub fn encoding(self) -> Box<dyn Encoding> {
        match self {
            EncodingKind::Native => Box::new(NativeEncoding),
            EncodingKind::Text => Box::new(TextEncoding),
        }
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingKind::Native => write!(f, "native"),
            EncodingKind::Text => write!(f, "text"),
        }
    }
}
