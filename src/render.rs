//! Table rendering
//!
//! Lays out a table matrix as a boxed text grid. Multi-line values take up
//! several lines within their row.
//!
//! ```text
//! Animal
//!
//! |-----+------+-------|
//! | Key | Name | Breed |
//! |-----+------+-------|
//! | 0   | Dog  | Corgi |
//! |-----+------+-------|
//! ```

use std::io::Write;

use crate::error::Result;
use crate::model::Matrix;

const RECORD_SEPARATOR_CHAR: char = '-';
const RECORD_SEPARATOR_FIRST: &str = "|-";
const RECORD_SEPARATOR_BETWEEN: &str = "-+-";
const RECORD_SEPARATOR_LAST: &str = "-|";
const FIELD_SEPARATOR: &str = " | ";
const LINE_PREFIX: &str = "| ";
const LINE_SUFFIX: &str = " |";

/// Renders table matrices as text
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer;

impl TableRenderer {
    /// Render `matrix` under the heading `name`
    ///
    /// Row 0 of the matrix (the format version) is not shown.
    pub fn render(name: &str, matrix: &Matrix) -> String {
        let rows: Vec<Vec<Vec<&str>>> = matrix
            .iter()
            .skip(1)
            .map(|row| row.iter().map(|cell| cell.split('\n').collect()).collect())
            .collect();

        let num_cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut col_widths = vec![0usize; num_cols];
        for row in &rows {
            for (col, lines) in row.iter().enumerate() {
                for line in lines {
                    col_widths[col] = col_widths[col].max(line.chars().count());
                }
            }
        }

        let separator = Self::record_separator(&col_widths);

        let mut out = String::new();
        out.push('\n');
        out.push_str(name);
        out.push_str("\n\n");
        out.push_str(&separator);
        out.push('\n');

        for row in &rows {
            let height = row.iter().map(Vec::len).max().unwrap_or(1);
            for line_num in 0..height {
                let cells: Vec<String> = col_widths
                    .iter()
                    .enumerate()
                    .map(|(col, &width)| {
                        let text = row
                            .get(col)
                            .and_then(|lines| lines.get(line_num))
                            .copied()
                            .unwrap_or("");
                        format!("{:<width$}", text, width = width)
                    })
                    .collect();
                out.push_str(LINE_PREFIX);
                out.push_str(&cells.join(FIELD_SEPARATOR));
                out.push_str(LINE_SUFFIX);
                out.push('\n');
            }
            out.push_str(&separator);
            out.push('\n');
        }

        out.push('\n');
        out
    }

    /// Render `matrix` and write it to `writer`
    pub fn write_to<W: Write>(writer: &mut W, name: &str, matrix: &Matrix) -> Result<()> {
        writer.write_all(Self::render(name, matrix).as_bytes())?;
        Ok(())
    }

    fn record_separator(col_widths: &[usize]) -> String {
        let dashes: Vec<String> = col_widths
            .iter()
            .map(|&width| RECORD_SEPARATOR_CHAR.to_string().repeat(width))
            .collect();
        format!(
            "{}{}{}",
            RECORD_SEPARATOR_FIRST,
            dashes.join(RECORD_SEPARATOR_BETWEEN),
            RECORD_SEPARATOR_LAST
        )
    }
}
