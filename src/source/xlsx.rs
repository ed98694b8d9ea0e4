use super::{RawSheet, TabularSource};
use crate::core::{Cell, RateError};
use calamine::{open_workbook_auto, Data, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Spreadsheet workbook read with calamine.
pub struct XlsxSource {
    name: String,
    workbook: Sheets<BufReader<File>>,
}

impl XlsxSource {
    pub fn open(path: &Path) -> Result<XlsxSource, RateError> {
        let workbook = open_workbook_auto(path).map_err(|e| RateError::SourceUnavailable {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        log::info!("Opened workbook {}", path.display());
        Ok(XlsxSource {
            name: path.display().to_string(),
            workbook,
        })
    }
}

impl TabularSource for XlsxSource {
    fn sheet_names(&self) -> Vec<String> {
        self.workbook.sheet_names()
    }

    fn read_sheet(&mut self, name: &str) -> Result<RawSheet, RateError> {
        if !self.workbook.sheet_names().iter().any(|s| s == name) {
            return Err(RateError::SheetNotFound {
                sheet: name.to_string(),
            });
        }
        let range = self
            .workbook
            .worksheet_range(name)
            .map_err(|e| RateError::SourceUnavailable {
                source_name: format!("{}#{}", self.name, name),
                reason: e.to_string(),
            })?;
        let (height, width) = range.get_size();
        log::debug!("Sheet '{}': {} rows x {} columns", name, height, width);

        let rows = range
            .rows()
            .map(|row| row.iter().map(to_cell).collect::<Vec<_>>());
        Ok(RawSheet::from_rows(name, rows))
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Empty,
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::core::load_rate_table;
    use rust_decimal_macros::dec;
    use rust_xlsxwriter::Workbook;

    fn write_workbook(path: &Path) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Земельный налог").unwrap();
        let headers = [
            "Категория сельхозугодий",
            " Кадастровая оценка земель (общий балл)",
            "Ставки_2025",
            "Ставки_2026 ",
        ];
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        sheet.write_string(1, 0, "Пахотные").unwrap();
        sheet.write_number(1, 1, 1.0).unwrap();
        sheet.write_number(1, 2, 10.5).unwrap();
        sheet.write_number(1, 3, 12.0).unwrap();
        sheet.write_string(2, 0, "Пахотные").unwrap();
        sheet.write_number(2, 1, 2.0).unwrap();
        sheet.write_string(2, 2, "8,25").unwrap();
        sheet.write_string(2, 3, "9,5").unwrap();
        sheet.write_string(3, 0, "Луговые").unwrap();
        sheet.write_number(3, 1, 1.0).unwrap();
        sheet.write_string(3, 2, "н/д").unwrap();
        sheet.write_number(3, 3, 3.0).unwrap();
        workbook.save(path).unwrap();
    }

    #[test]
    fn loads_land_rates_from_xlsx() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.xlsx");
        write_workbook(&path);

        let mut source = XlsxSource::open(&path).unwrap();
        assert_eq!(source.sheet_names(), vec!["Земельный налог".to_string()]);

        let catalog = Catalog::builtin();
        let land = catalog.category("land").unwrap();
        let table = load_rate_table(&mut source, land).unwrap();

        assert_eq!(table.len(), 2);
        let row = table.resolve(&["Пахотные", "2"]).unwrap();
        assert_eq!(row.rate_prior, dec!(8.25));
        assert_eq!(row.rate_current, dec!(9.5));
        assert_eq!(row.unit.as_deref(), Some("га"));
        assert!(table.resolve(&["Луговые", "1"]).is_err());
    }

    #[test]
    fn missing_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.xlsx");
        write_workbook(&path);

        let mut source = XlsxSource::open(&path).unwrap();
        let err = source.read_sheet("Акцизы").unwrap_err();
        assert_eq!(
            err,
            RateError::SheetNotFound {
                sheet: "Акцизы".to_string()
            }
        );
    }

    #[test]
    fn unreadable_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        let err = XlsxSource::open(&path).err().unwrap();
        assert!(matches!(err, RateError::SourceUnavailable { .. }));
    }
}
