//! Rates command - the cleaned rate table of one category

use super::SourceArgs;
use crate::core::{format_growth_pct, RateTable};
use clap::Args;
use std::io;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RatesCommand {
    #[command(flatten)]
    source: SourceArgs,

    /// Category id (see `categories`)
    #[arg(short, long)]
    category: String,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

/// Row for the rates table output
#[derive(Debug, Clone, Tabled, serde::Serialize)]
pub struct RateLine {
    #[tabled(rename = "#")]
    #[serde(rename = "row_num")]
    pub row_num: usize,

    #[tabled(rename = "Key")]
    pub key: String,

    #[tabled(rename = "Unit")]
    pub unit: String,

    #[tabled(rename = "Prior rate")]
    pub rate_prior: String,

    #[tabled(rename = "Current rate")]
    pub rate_current: String,

    #[tabled(rename = "Growth")]
    pub growth_pct: String,
}

impl RatesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (catalog, config, table) = self.source.load_category(&self.category)?;
        let lines = rate_lines(&table);

        if self.csv {
            let mut wtr = csv::Writer::from_writer(io::stdout());
            for line in &lines {
                wtr.serialize(line)?;
            }
            wtr.flush()?;
        } else {
            println!();
            println!(
                "{} ({} vs {}, {} per unit)",
                config.title.to_uppercase(),
                catalog.prior_year,
                catalog.current_year,
                catalog.currency
            );
            println!("Key: {}", table.dimensions.join(" / "));
            let rendered = Table::new(&lines)
                .with(Style::rounded())
                .with(Modify::new(Columns::new(3..)).with(Alignment::right()))
                .to_string();
            println!("{}", rendered);
        }
        Ok(())
    }
}

pub fn rate_lines(table: &RateTable) -> Vec<RateLine> {
    table
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| RateLine {
            row_num: i + 1,
            key: row.keys.join(" / "),
            unit: row.unit.clone().unwrap_or_default(),
            rate_prior: row.rate_prior.to_string(),
            rate_current: row.rate_current.to_string(),
            growth_pct: format_growth_pct(row.rate_growth_pct()),
        })
        .collect()
}
