//! Categories command - what the catalog knows about

use crate::catalog::{Catalog, UnitSpec};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

#[derive(Args, Debug)]
pub struct CategoriesCommand {
    /// Catalog JSON naming sheets and columns (built-in catalog if omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Tabled, Serialize)]
struct CategoryRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Sheet")]
    sheet: String,
    #[tabled(rename = "Dimensions")]
    dimensions: String,
    #[tabled(rename = "Unit")]
    unit: String,
}

impl CategoriesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let catalog = Catalog::load(self.config.as_deref())?;
        let rows: Vec<CategoryRow> = catalog
            .categories
            .iter()
            .map(|c| CategoryRow {
                id: c.id.clone(),
                title: c.title.clone(),
                sheet: c.sheet.clone(),
                dimensions: c.dimension_names().join(" / "),
                unit: match &c.unit {
                    None => String::new(),
                    Some(UnitSpec::Fixed { value }) => value.clone(),
                    Some(UnitSpec::Column { column, .. }) => format!("[{}]", column),
                },
            })
            .collect();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        } else {
            println!("{}", Table::new(&rows).with(Style::rounded()));
        }
        Ok(())
    }
}
