//! CSV tables.
//!
//! Reports are small, so tables are held in memory as strings and converted
//! per column on demand. Fields containing a comma, quote, or line break are
//! quoted with doubled inner quotes.

use crate::error::{IoError, Result};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Formats a float for a CSV cell. NaN becomes an empty cell.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        format!("{value:?}")
    }
}

/// Parses a CSV cell written by [`format_float`] or another tool. An empty
/// cell is NaN.
pub fn parse_float(cell: &str) -> Result<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse()
        .map_err(|_| IoError::validation(format!("not a number: {cell:?}")))
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Splits CSV text into records of fields.
fn split_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => record.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(IoError::validation("unterminated quoted field"));
    }
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    Ok(records)
}

impl Table {
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row, which must have one cell per column.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.header.len() {
            return Err(IoError::validation(format!(
                "row has {} cells, table has {} columns",
                row.len(),
                self.header.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the column named `name`.
    pub fn column(&self, name: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| IoError::not_found(format!("column {name:?}")))
    }

    /// All cells of column `name`, in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<&str>> {
        let idx = self.column(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Column `name` parsed as floats.
    pub fn float_column(&self, name: &str) -> Result<Vec<f64>> {
        self.column_values(name)?
            .into_iter()
            .map(|cell| parse_float(cell).map_err(|e| e.with_context(format!("column {name:?}"))))
            .collect()
    }

    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        for record in std::iter::once(&self.header).chain(&self.rows) {
            let line: Vec<String> = record.iter().map(|f| escape(f)).collect();
            out.push_str(&line.join(","));
            out.push('\n');
        }
        out
    }

    /// Parses CSV text whose first record is the header.
    pub fn parse(text: &str) -> Result<Self> {
        let mut records = split_records(text)?.into_iter();
        let header = records
            .next()
            .ok_or_else(|| IoError::validation("missing header row"))?;
        let mut table = Self {
            header,
            rows: Vec::new(),
        };
        for (line, record) in records.enumerate() {
            table
                .push_row(record)
                .map_err(|e| e.with_context(format!("data row {}", line + 1)))?;
        }
        Ok(table)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| IoError::from(e).with_context(format!("reading {}", path.display())))?;
        Self::parse(&text).map_err(|e| e.with_context(path.display().to_string()))
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_csv())?;
        Ok(())
    }
}
