//! Generic tabular source.
//!
//! Spreadsheet parsing proper is an external collaborator; this crate only
//! depends on the tabular contract: a named sheet of string cells. CSV is
//! the concrete source wired up here.

use std::collections::HashMap;
use std::path::Path;

use facp_core::{ConfigError, ConfigResult};

/// A sheet of string cells.
#[derive(Debug, Clone, Default)]
pub struct SheetData {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

/// One data row keyed by the header row's column names.
#[derive(Debug, Clone, Default)]
pub struct SheetRecord {
    cells: HashMap<String, String>,
}

impl SheetRecord {
    /// Cell value for a column, empty string when the column is absent.
    pub fn get(&self, column: &str) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.cells.values().all(|value| value.trim().is_empty())
    }
}

impl SheetData {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Interpret the first row as headers and return the remaining rows as
    /// header-keyed records. Columns with empty header names are dropped,
    /// and fully empty rows are skipped.
    pub fn records(&self) -> Vec<SheetRecord> {
        let Some(header_row) = self.rows.first() else {
            return Vec::new();
        };
        let headers: Vec<String> = header_row.iter().map(|cell| cell.trim().to_string()).collect();

        self.rows[1..]
            .iter()
            .filter_map(|row| {
                let mut cells = HashMap::new();
                for (idx, header) in headers.iter().enumerate() {
                    if header.is_empty() {
                        continue;
                    }
                    let value = row.get(idx).cloned().unwrap_or_default();
                    cells.insert(header.clone(), value);
                }
                let record = SheetRecord { cells };
                if record.is_empty() {
                    None
                } else {
                    Some(record)
                }
            })
            .collect()
    }
}

/// Read a CSV file into a [`SheetData`].
///
/// Ragged rows are accepted; cells keep their raw string form. Failures
/// surface as [`ConfigError::UnreadableCatalog`].
pub fn read_csv_sheet(path: impl AsRef<Path>) -> ConfigResult<SheetData> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|err| ConfigError::UnreadableCatalog(format!("{}: {err}", path.display())))?;

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result
            .map_err(|err| ConfigError::UnreadableCatalog(format!("{}: {err}", path.display())))?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sheet".to_string());
    Ok(SheetData::new(name, rows))
}
