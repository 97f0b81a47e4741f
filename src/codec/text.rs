//! Text encoding
//!
//! One line per matrix row. Cells are joined by the ASCII unit separator
//! (0x1F); every cell except the first on a line is hex-encoded, so values
//! may contain newlines, commas or the separator itself.

use crate::error::{FlatError, Result};
use crate::model::{Matrix, Table, FORMAT_VERSION};

use super::{Encoding, EncodingKind};

/// Separates cells within a line
const FIELD_SEPARATOR: char = '\u{1f}';

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Hex-escaped line encoding
#[derive(Debug, Clone, Copy, Default)]
pub struct TextEncoding;

impl Encoding for TextEncoding {
    fn kind(&self) -> EncodingKind {
        EncodingKind::Text
    }

    fn encode(&self, table: &Table) -> Result<Vec<u8>> {
        let mut rows = table.to_matrix().into_iter();
        let mut out = String::new();

        // Version row is written as is.
        if let Some(version_row) = rows.next() {
            out.push_str(&version_row.concat());
            out.push('\n');
        }

        for row in rows {
            let mut cells = row.iter();
            if let Some(first) = cells.next() {
                out.push_str(first);
            }
            for cell in cells {
                out.push(FIELD_SEPARATOR);
                out.push_str(&hex_encode(cell));
            }
            out.push('\n');
        }

        Ok(out.into_bytes())
    }

    fn decode(&self, name: &str, bytes: &[u8]) -> Result<Table> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            FlatError::CorruptData(format!("table {} is not valid UTF-8: {}", name, e))
        })?;

        let mut lines = text.lines();
        let version = lines
            .next()
            .ok_or_else(|| FlatError::CorruptData(format!("table {} file is empty", name)))?;
        if version != FORMAT_VERSION {
            return Err(FlatError::VersionMismatch {
                expected: FORMAT_VERSION.to_string(),
                found: version.to_string(),
            });
        }

        let mut matrix: Matrix = vec![vec![version.to_string()]];
        for line in lines {
            let mut cells = line.split(FIELD_SEPARATOR);
            let mut row = Vec::new();
            if let Some(first) = cells.next() {
                row.push(first.to_string());
            }
            for cell in cells {
                row.push(hex_decode(cell)?);
            }
            matrix.push(row);
        }

        Table::from_matrix(name, matrix).map_err(|e| {
            if e.is_fatal() {
                e
            } else {
                FlatError::CorruptData(format!("table {}: {}", name, e))
            }
        })
    }
}

// =============================================================================
// Hex Helpers
// =============================================================================

/// Lowercase hex of the UTF-8 bytes, two digits per byte
fn hex_encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for byte in text.bytes() {
        out.push(HEX_DIGITS[(byte >> 4) as usize] as char);
        out.push(HEX_DIGITS[(byte & 0x0f) as usize] as char);
    }
    out
}

fn hex_decode(hex: &str) -> Result<String> {
    if hex.len() % 2 != 0 {
        return Err(FlatError::CorruptData(format!(
            "hex field has odd length {}",
            hex.len()
        )));
    }

    let bytes = hex
        .as_bytes()
        .chunks(2)
        .map(|pair| -> Result<u8> { Ok((nibble(pair[0])? << 4) | nibble(pair[1])?) })
        .collect::<Result<Vec<u8>>>()?;

    String::from_utf8(bytes)
        .map_err(|e| FlatError::CorruptData(format!("hex field is not UTF-8: {}", e)))
}

fn nibble(digit: u8) -> Result<u8> {
    (digit as char)
        .to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| FlatError::CorruptData(format!("invalid hex digit {:?}", digit as char)))
}
