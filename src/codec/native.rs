//! Native encoding
//!
//! The whole table state through serde + bincode, behind a small header
//! that identifies the file and checksums the payload.

use tracing::warn;

use crate::error::{FlatError, Result};
use crate::model::Table;

use super::{Encoding, EncodingKind};

/// Magic bytes identifying a natively encoded flatdb table
const MAGIC: &[u8; 4] = b"FDBT";

/// Current envelope version
const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + PayloadCRC (4) = 10 bytes
const HEADER_SIZE: usize = 10;

/// Opaque serde/bincode encoding
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEncoding;

impl Encoding for NativeEncoding {
    fn kind(&self) -> EncodingKind {
        EncodingKind::Native
    }

    fn encode(&self, table: &Table) -> Result<Vec<u8>> {
        let payload =
            bincode::serialize(table).map_err(|e| FlatError::Serialization(e.to_string()))?;

        let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
        bytes.extend_from_slice(MAGIC);
        bytes.extend_from_slice(&VERSION.to_le_bytes());
        bytes.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
        bytes.extend_from_slice(&payload);
        Ok(bytes)
    }

    fn decode(&self, name: &str, bytes: &[u8]) -> Result<Table> {
        if bytes.len() < HEADER_SIZE {
            return Err(FlatError::CorruptData(format!(
                "table {} is {} bytes, shorter than the {} byte header",
                name,
                bytes.len(),
                HEADER_SIZE
            )));
        }

        let (header, payload) = bytes.split_at(HEADER_SIZE);
        if &header[0..4] != MAGIC {
            return Err(FlatError::CorruptData(format!(
                "invalid magic in table {}: expected FDBT, got {:?}",
                name,
                &header[0..4]
            )));
        }

        let version = u16::from_le_bytes([header[4], header[5]]);
        if version != VERSION {
            return Err(FlatError::VersionMismatch {
                expected: VERSION.to_string(),
                found: version.to_string(),
            });
        }

        let stored_crc = u32::from_le_bytes([header[6], header[7], header[8], header[9]]);
        let actual_crc = crc32fast::hash(payload);
        if stored_crc != actual_crc {
            return Err(FlatError::CorruptData(format!(
                "checksum mismatch in table {}: stored {:08x}, computed {:08x}",
                name, stored_crc, actual_crc
            )));
        }

        let mut table: Table = bincode::deserialize(payload)
            .map_err(|e| FlatError::CorruptData(format!("table {}: {}", name, e)))?;
        table.verify_integrity()?;

        if table.name() != name {
            warn!(
                stored = table.name(),
                file = name,
                "Table file name differs from stored table name, using file name"
            );
            table.rename(name);
        }

        table.mark_clean();
        Ok(table)
    }
}
