//! Tabular rate sources: spreadsheet workbooks and CSV exports.

mod csv_dir;
mod xlsx;

pub use csv_dir::CsvSource;
pub use xlsx::XlsxSource;

use crate::core::{normalize_column_name, Cell, RateError};
use std::path::Path;

/// Header row plus data rows of one sheet, as read.
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawSheet {
    /// Build a sheet from rows where the first row is the header.
    /// Fully empty data rows are dropped.
    pub fn from_rows<I>(name: &str, rows: I) -> RawSheet
    where
        I: IntoIterator<Item = Vec<Cell>>,
    {
        let mut rows = rows.into_iter();
        let headers = rows
            .next()
            .map(|header| {
                header
                    .iter()
                    .map(|cell| cell.text().unwrap_or_default())
                    .collect()
            })
            .unwrap_or_default();
        let rows = rows
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .collect();
        RawSheet {
            name: name.to_string(),
            headers,
            rows,
        }
    }

    /// Position of a column, comparing normalized names.
    pub fn column_index(&self, name: &str) -> Result<usize, RateError> {
        let wanted = normalize_column_name(name);
        self.headers
            .iter()
            .position(|header| normalize_column_name(header) == wanted)
            .ok_or_else(|| RateError::ColumnNotFound {
                sheet: self.name.clone(),
                column: name.to_string(),
            })
    }
}

/// Something that can hand out sheets by name.
pub trait TabularSource {
    fn sheet_names(&self) -> Vec<String>;

    fn read_sheet(&mut self, name: &str) -> Result<RawSheet, RateError>;
}

/// Open a workbook (xlsx/xls/ods), a CSV file, or a directory of CSV files.
pub fn open_source(path: &Path) -> Result<Box<dyn TabularSource>, RateError> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if path.is_dir() || is_csv {
        Ok(Box::new(CsvSource::open(path)?))
    } else {
        Ok(Box::new(XlsxSource::open(path)?))
    }
}
