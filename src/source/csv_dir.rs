use super::{RawSheet, TabularSource};
use crate::core::{Cell, RateError};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CSV export of a workbook: one `<sheet>.csv` per sheet in a directory,
/// or a single CSV file standing in for one sheet.
pub struct CsvSource {
    sheets: BTreeMap<String, PathBuf>,
}

impl CsvSource {
    pub fn open(path: &Path) -> Result<CsvSource, RateError> {
        let unavailable = |reason: String| RateError::SourceUnavailable {
            source_name: path.display().to_string(),
            reason,
        };

        let mut sheets = BTreeMap::new();
        if path.is_dir() {
            let entries = fs::read_dir(path).map_err(|e| unavailable(e.to_string()))?;
            for entry in entries {
                let file = entry.map_err(|e| unavailable(e.to_string()))?.path();
                if is_csv(&file) {
                    if let Some(stem) = sheet_name(&file) {
                        sheets.insert(stem, file);
                    }
                }
            }
        } else if path.is_file() {
            let stem = sheet_name(path).ok_or_else(|| unavailable("no file name".to_string()))?;
            sheets.insert(stem, path.to_path_buf());
        } else {
            return Err(unavailable("no such file or directory".to_string()));
        }

        log::info!("Found {} CSV sheet(s) in {}", sheets.len(), path.display());
        Ok(CsvSource { sheets })
    }
}

impl TabularSource for CsvSource {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    fn read_sheet(&mut self, name: &str) -> Result<RawSheet, RateError> {
        let path = self.sheets.get(name).ok_or_else(|| RateError::SheetNotFound {
            sheet: name.to_string(),
        })?;
        let unavailable = |reason: String| RateError::SourceUnavailable {
            source_name: path.display().to_string(),
            reason,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| unavailable(e.to_string()))?;

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| unavailable(e.to_string()))?;
            rows.push(record.iter().map(Cell::from).collect::<Vec<_>>());
        }
        log::debug!("Read {} csv records from {}", rows.len(), path.display());
        Ok(RawSheet::from_rows(name, rows))
    }
}

fn is_csv(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

fn sheet_name(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(|stem| stem.to_string())
}
