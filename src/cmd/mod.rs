pub mod calc;
pub mod categories;
pub mod options;
pub mod rates;
pub mod schema;
pub mod validate;

use crate::catalog::{Catalog, CategoryConfig};
use crate::core::{load_rate_table, RateTable};
use crate::source;
use clap::Args;
use std::path::PathBuf;

pub const DEFAULT_WORKBOOK: &str = "Налоги_таблицы.xlsx";

/// Where rates come from and how to read them
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Rate workbook (xlsx/xls/ods), a CSV file, or a directory of CSV sheets
    #[arg(short, long, default_value = DEFAULT_WORKBOOK)]
    pub workbook: PathBuf,

    /// Catalog JSON naming sheets and columns (built-in catalog if omitted)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl SourceArgs {
    pub fn catalog(&self) -> anyhow::Result<Catalog> {
        Catalog::load(self.config.as_deref())
    }

    /// Load the catalog and the rate table of one category
    pub fn load_category(&self, id: &str) -> anyhow::Result<(Catalog, CategoryConfig, RateTable)> {
        let catalog = self.catalog()?;
        let config = catalog.category(id)?.clone();
        let mut source = source::open_source(&self.workbook)?;
        let table = load_rate_table(source.as_mut(), &config)?;
        Ok((catalog, config, table))
    }
}
