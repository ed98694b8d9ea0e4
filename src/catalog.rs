//! Per-category description of where rates live in the workbook.

use crate::core::RateError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Root of the catalog JSON
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    /// Year the prior rates apply to
    pub prior_year: i32,
    /// Year the current rates apply to
    pub current_year: i32,
    /// Currency suffix for amounts
    #[serde(default = "default_currency")]
    pub currency: String,
    pub categories: Vec<CategoryConfig>,
}

fn default_currency() -> String {
    "BYN".to_string()
}

/// One tax category: a sheet and the exact columns to read from it
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryConfig {
    /// Short identifier used on the command line (e.g. "land")
    pub id: String,
    /// Human readable title
    pub title: String,
    /// Sheet (or CSV file stem) holding the rates
    pub sheet: String,
    /// Selectable key columns, outermost first
    pub dimensions: Vec<Dimension>,
    /// Column with the prior-year rate
    pub rate_prior: String,
    /// Column with the current-year rate
    pub rate_current: String,
    /// Unit of the taxed quantity
    #[serde(default)]
    pub unit: Option<UnitSpec>,
    /// Quantity is a count of whole items
    #[serde(default)]
    pub whole_units: bool,
}

/// How a dimension key is taken from a row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Dimension {
    /// The value of a single column
    Column { column: String },
    /// "specific (category)" built from two columns, or just the category
    /// when the specific column is blank
    Labelled { category: String, specific: String },
}

impl Dimension {
    /// Header shown for this dimension
    pub fn name(&self) -> &str {
        match self {
            Dimension::Column { column } => column.as_str(),
            Dimension::Labelled { category, .. } => category.as_str(),
        }
    }

    /// Columns this dimension reads
    pub fn columns(&self) -> Vec<&str> {
        match self {
            Dimension::Column { column } => vec![column.as_str()],
            Dimension::Labelled { category, specific } => {
                vec![category.as_str(), specific.as_str()]
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitSpec {
    /// Same unit for every row
    Fixed { value: String },
    /// Per-row unit column, with a fallback for blank cells
    Column {
        column: String,
        #[serde(default)]
        fallback: Option<String>,
    },
}

impl Catalog {
    /// Read a catalog from JSON and validate it
    pub fn read_json<R: Read>(reader: R) -> anyhow::Result<Catalog> {
        let catalog: Catalog = serde_json::from_reader(reader)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: &Path) -> anyhow::Result<Catalog> {
        let file = File::open(path)?;
        Catalog::read_json(BufReader::new(file))
    }

    /// The catalog file given, or the built-in one
    pub fn load(path: Option<&Path>) -> anyhow::Result<Catalog> {
        match path {
            Some(path) => {
                log::info!("Reading catalog from {}", path.display());
                Catalog::from_path(path)
            }
            None => Ok(Catalog::builtin()),
        }
    }

    pub fn category(&self, id: &str) -> Result<&CategoryConfig, RateError> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| {
                let known: Vec<&str> = self.categories.iter().map(|c| c.id.as_str()).collect();
                RateError::InvalidConfig(format!(
                    "unknown category '{}' (known: {})",
                    id,
                    known.join(", ")
                ))
            })
    }

    pub fn validate(&self) -> Result<(), RateError> {
        if self.categories.is_empty() {
            return Err(RateError::InvalidConfig("no categories".to_string()));
        }
        let mut ids: Vec<&str> = Vec::new();
        for category in &self.categories {
            if ids.contains(&category.id.as_str()) {
                return Err(RateError::InvalidConfig(format!(
                    "duplicate category id '{}'",
                    category.id
                )));
            }
            ids.push(&category.id);
            category.validate()?;
        }
        Ok(())
    }

    /// Rate tables of the Belarusian tax workbook ("Налоги_таблицы.xlsx").
    pub fn builtin() -> Catalog {
        let per = |value: &str| Some(UnitSpec::Fixed { value: value.to_string() });
        let rate = |year: &str| format!("Ставка_{}", year);
        Catalog {
            prior_year: 2025,
            current_year: 2026,
            currency: default_currency(),
            categories: vec![
                CategoryConfig {
                    id: "land".to_string(),
                    title: "Земельный налог".to_string(),
                    sheet: "Земельный налог".to_string(),
                    dimensions: vec![
                        column("Категория сельхозугодий"),
                        column("Кадастровая оценка земель (общий балл)"),
                    ],
                    rate_prior: "Ставки_2025".to_string(),
                    rate_current: "Ставки_2026".to_string(),
                    unit: per("га"),
                    whole_units: false,
                },
                CategoryConfig {
                    id: "eco-air".to_string(),
                    title: "Экологический налог: выбросы в атмосферу".to_string(),
                    sheet: "Эконалог_воздух".to_string(),
                    dimensions: vec![column("Классы опасности выбросов")],
                    rate_prior: rate("2025"),
                    rate_current: rate("2026"),
                    unit: per("тонн"),
                    whole_units: false,
                },
                CategoryConfig {
                    id: "eco-water".to_string(),
                    title: "Экологический налог: сброс сточных вод".to_string(),
                    sheet: "Эконалог_сточные".to_string(),
                    dimensions: vec![column("Куда сбрасываются сточные воды")],
                    rate_prior: rate("2025"),
                    rate_current: rate("2026"),
                    unit: per("м³"),
                    whole_units: false,
                },
                CategoryConfig {
                    id: "eco-waste".to_string(),
                    title: "Экологический налог: обращение с отходами".to_string(),
                    sheet: "Эконалог_захоронение".to_string(),
                    dimensions: vec![
                        column("Способ обращения с отходами"),
                        Dimension::Labelled {
                            category: "Категории отходов".to_string(),
                            specific: "Конкретный вид отхода".to_string(),
                        },
                    ],
                    rate_prior: rate("2025"),
                    rate_current: rate("2026"),
                    unit: per("тонн"),
                    whole_units: false,
                },
                CategoryConfig {
                    id: "excise".to_string(),
                    title: "Акцизы".to_string(),
                    sheet: "Акцизы".to_string(),
                    dimensions: vec![column("Подакцизный_товар")],
                    rate_prior: rate("2025"),
                    rate_current: rate("2026"),
                    unit: Some(UnitSpec::Column {
                        column: "Единица налогообложения".to_string(),
                        fallback: None,
                    }),
                    whole_units: false,
                },
                CategoryConfig {
                    id: "mining".to_string(),
                    title: "Налог за добычу природных ресурсов".to_string(),
                    sheet: "Добыча_ресурсов".to_string(),
                    dimensions: vec![column("Природные ресурсы")],
                    rate_prior: rate("2025"),
                    rate_current: rate("2026"),
                    unit: Some(UnitSpec::Column {
                        column: "Единица налогообложения".to_string(),
                        fallback: Some("единица".to_string()),
                    }),
                    whole_units: false,
                },
                CategoryConfig {
                    id: "oil".to_string(),
                    title: "Налог за добычу нефти".to_string(),
                    sheet: "Ставки на нефть".to_string(),
                    dimensions: vec![column("Средняя цена за 1000 кг нефти, $")],
                    rate_prior: "Ставка_2025, BYN".to_string(),
                    rate_current: "Ставка_2026, BYN".to_string(),
                    unit: per("тонн"),
                    whole_units: false,
                },
                CategoryConfig {
                    id: "transport".to_string(),
                    title: "Транспортный налог".to_string(),
                    sheet: "Транспортный".to_string(),
                    dimensions: vec![column("Тип транспортных средств")],
                    rate_prior: "Налог_2025".to_string(),
                    rate_current: "Налог_2026".to_string(),
                    unit: per("ед."),
                    whole_units: true,
                },
            ],
        }
    }
}

fn column(name: &str) -> Dimension {
    Dimension::Column {
        column: name.to_string(),
    }
}

impl CategoryConfig {
    fn validate(&self) -> Result<(), RateError> {
        let invalid = |what: &str| {
            Err(RateError::InvalidConfig(format!(
                "category '{}': {}",
                self.id, what
            )))
        };
        if self.id.trim().is_empty() {
            return invalid("empty id");
        }
        if self.dimensions.is_empty() {
            return invalid("no dimensions");
        }
        let mut columns: Vec<&str> = self.dimensions.iter().flat_map(|d| d.columns()).collect();
        columns.push(&self.rate_prior);
        columns.push(&self.rate_current);
        if let Some(UnitSpec::Column { column, .. }) = &self.unit {
            columns.push(column);
        }
        if columns
            .iter()
            .any(|c| crate::core::normalize_column_name(c).is_empty())
        {
            return invalid("blank column name");
        }
        Ok(())
    }

    pub fn dimension_names(&self) -> Vec<String> {
        self.dimensions.iter().map(|d| d.name().to_string()).collect()
    }
}
