use super::cell::{build_display_label, parse_rate, Cell};
use super::error::RateError;
use super::rates::{RateRow, RateTable};
use crate::catalog::{CategoryConfig, Dimension, UnitSpec};
use crate::source::{RawSheet, TabularSource};

/// Column positions resolved against a sheet's header row.
enum KeyColumns {
    Single(usize),
    Labelled { category: usize, specific: usize },
}

static EMPTY: Cell = Cell::Empty;

enum UnitColumn {
    None,
    Fixed(String),
    Column { index: usize, fallback: Option<String> },
}

/// Load and clean the rate table of one category.
///
/// Rows with a missing key or an unparseable rate are skipped. Fails if the
/// sheet or a configured column is missing, or if no usable row remains.
pub fn load_rate_table<S>(source: &mut S, config: &CategoryConfig) -> Result<RateTable, RateError>
where
    S: TabularSource + ?Sized,
{
    let sheet = source.read_sheet(&config.sheet)?;
    table_from_sheet(&sheet, config)
}

pub fn table_from_sheet(sheet: &RawSheet, config: &CategoryConfig) -> Result<RateTable, RateError> {
    let keys = config
        .dimensions
        .iter()
        .map(|dimension| -> Result<KeyColumns, RateError> {
            Ok(match dimension {
                Dimension::Column { column } => KeyColumns::Single(sheet.column_index(column)?),
                Dimension::Labelled { category, specific } => KeyColumns::Labelled {
                    category: sheet.column_index(category)?,
                    specific: sheet.column_index(specific)?,
                },
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    let prior = sheet.column_index(&config.rate_prior)?;
    let current = sheet.column_index(&config.rate_current)?;
    let unit = match &config.unit {
        None => UnitColumn::None,
        Some(UnitSpec::Fixed { value }) => UnitColumn::Fixed(value.clone()),
        Some(UnitSpec::Column { column, fallback }) => UnitColumn::Column {
            index: sheet.column_index(column)?,
            fallback: fallback.clone(),
        },
    };

    let mut rows = Vec::new();
    let mut skipped = 0;
    for (line, cells) in sheet.rows.iter().enumerate() {
        let cell = |index: usize| cells.get(index).unwrap_or(&EMPTY);

        let row_keys: Option<Vec<String>> = keys
            .iter()
            .map(|key| match key {
                KeyColumns::Single(index) => cell(*index).text(),
                KeyColumns::Labelled { category, specific } => {
                    build_display_label(cell(*category), cell(*specific))
                }
            })
            .collect();
        let Some(row_keys) = row_keys else {
            log::debug!("{}: row {} skipped, missing key", sheet.name, line + 2);
            skipped += 1;
            continue;
        };

        let rates = (parse_rate(cell(prior)), parse_rate(cell(current)));
        let (Some(rate_prior), Some(rate_current)) = rates else {
            log::debug!(
                "{}: row {} ({}) skipped, rate is not a number: {:?} / {:?}",
                sheet.name,
                line + 2,
                row_keys.join(" / "),
                cell(prior),
                cell(current)
            );
            skipped += 1;
            continue;
        };

        let unit = match &unit {
            UnitColumn::None => None,
            UnitColumn::Fixed(value) => Some(value.clone()),
            UnitColumn::Column { index, fallback } => {
                cell(*index).text().or_else(|| fallback.clone())
            }
        };

        rows.push(RateRow {
            keys: row_keys,
            rate_prior,
            rate_current,
            unit,
        });
    }

    if rows.is_empty() {
        return Err(RateError::NoUsableRows {
            sheet: sheet.name.clone(),
        });
    }

    let table = RateTable::new(config.id.clone(), config.dimension_names(), rows);
    for key in table.duplicate_keys() {
        log::warn!("{}: duplicate key {}, first row wins", sheet.name, key);
    }
    log::info!(
        "Loaded {} rate rows for '{}' from sheet '{}' ({} skipped)",
        table.len(),
        config.id,
        sheet.name,
        skipped
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use rust_decimal_macros::dec;

    fn text(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn sheet(name: &str, rows: Vec<Vec<Cell>>) -> RawSheet {
        RawSheet::from_rows(name, rows)
    }

    fn waste_row(method: &str, category: &str, specific: Cell, prior: Cell, current: Cell) -> Vec<Cell> {
        vec![Cell::from(method), Cell::from(category), specific, prior, current]
    }

    fn waste_sheet() -> RawSheet {
        sheet(
            "Эконалог_захоронение",
            vec![
                vec![
                    text("Способ обращения с отходами "),
                    text("Категории отходов"),
                    text("Конкретный вид отхода"),
                    text("Ставка_2025"),
                    text("Ставка_2026"),
                ],
                waste_row("Захоронение", "Solvents", Cell::Empty, Cell::Float(10.0), Cell::Float(12.0)),
                waste_row("Захоронение", "Solvents", text("Acetone"), Cell::Float(20.0), Cell::Float(21.0)),
                waste_row("Хранение", "Solvents", Cell::Float(f64::NAN), text("1,5"), text("2")),
                waste_row("Хранение", "Ash", Cell::Empty, text("—"), text("2")),
                waste_row("", "Ash", Cell::Empty, text("3"), text("4")),
            ],
        )
    }

    #[test]
    fn waste_labels_and_skips() {
        let catalog = Catalog::builtin();
        let config = catalog.category("eco-waste").unwrap();
        let table = table_from_sheet(&waste_sheet(), config).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(
            table.options(&["Захоронение"]),
            vec!["Solvents", "Acetone (Solvents)"]
        );
        let row = table.resolve(&["Хранение", "Solvents"]).unwrap();
        assert_eq!(row.rate_prior, dec!(1.5));
        assert_eq!(row.unit.as_deref(), Some("тонн"));
    }

    #[test]
    fn missing_column_is_named() {
        let catalog = Catalog::builtin();
        let config = catalog.category("eco-air").unwrap();
        let err = table_from_sheet(&waste_sheet(), config).unwrap_err();
        assert_eq!(
            err,
            RateError::ColumnNotFound {
                sheet: "Эконалог_захоронение".to_string(),
                column: "Классы опасности выбросов".to_string(),
            }
        );
    }

    #[test]
    fn no_usable_rows() {
        let catalog = Catalog::builtin();
        let config = catalog.category("transport").unwrap();
        let raw = sheet(
            "Транспортный",
            vec![
                vec![text("Тип транспортных средств"), text("Налог_2025"), text("Налог_2026")],
                vec![text("Легковые"), text("н/д"), text("100")],
                vec![text("Грузовые"), text("200"), Cell::Empty],
            ],
        );
        assert_eq!(
            table_from_sheet(&raw, config).unwrap_err(),
            RateError::NoUsableRows {
                sheet: "Транспортный".to_string()
            }
        );
    }

    #[test]
    fn unit_column_with_fallback() {
        let catalog = Catalog::builtin();
        let config = catalog.category("mining").unwrap();
        let raw = sheet(
            "Добыча_ресурсов",
            vec![
                vec![
                    text("Природные ресурсы"),
                    text("Единица налогообложения"),
                    text("Ставка_2025"),
                    text("Ставка_2026"),
                ],
                vec![text("Песок"), text("м³"), text("0,5"), text("0,6")],
                vec![text("Торф"), Cell::Empty, text("1"), text("1,1")],
                // short row: trailing cells missing
                vec![text("Глина")],
            ],
        );
        let table = table_from_sheet(&raw, config).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve(&["Песок"]).unwrap().unit.as_deref(), Some("м³"));
        assert_eq!(table.resolve(&["Торф"]).unwrap().unit.as_deref(), Some("единица"));
    }

    #[test]
    fn numeric_keys_match_their_text() {
        let catalog = Catalog::builtin();
        let config = catalog.category("land").unwrap();
        let raw = sheet(
            "Земельный налог",
            vec![
                vec![
                    text("Категория сельхозугодий"),
                    text("Кадастровая оценка земель (общий балл)"),
                    text("Ставки_2025"),
                    text("Ставки_2026"),
                ],
                vec![text("Пахотные"), Cell::Float(3.0), Cell::Float(4.5), Cell::Float(5.0)],
                vec![text("Пахотные"), Cell::Int(4), Cell::Float(5.5), Cell::Float(6.0)],
            ],
        );
        let table = table_from_sheet(&raw, config).unwrap();
        assert_eq!(table.resolve(&["Пахотные", "3"]).unwrap().rate_prior, dec!(4.5));
        assert_eq!(table.resolve(&["Пахотные", "4"]).unwrap().rate_current, dec!(6));
    }
}
