//! Calc command - tax for a selected rate row and quantity, prior vs current year

use super::SourceArgs;
use crate::catalog::Catalog;
use crate::core::{
    format_growth_pct, format_money, format_quantity, normalize_key, Quotation, RateError,
    RateTable,
};
use clap::Args;
use rust_decimal::Decimal;
use std::io;

#[derive(Args, Debug)]
pub struct CalcCommand {
    #[command(flatten)]
    source: SourceArgs,

    /// Category id (see `categories`)
    #[arg(short, long)]
    category: String,

    /// Dimension key value, once per dimension, outermost first
    #[arg(short, long = "key")]
    keys: Vec<String>,

    /// Taxed quantity (area, volume, mass or count)
    #[arg(short, long, default_value = "1")]
    quantity: Decimal,

    /// Output as CSV instead of formatted text
    #[arg(long, conflicts_with = "json")]
    csv: bool,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

impl CalcCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (catalog, config, table) = self.source.load_category(&self.category)?;

        let row = match table.resolve(self.keys.as_slice()) {
            Ok(row) => row,
            Err(err) if !err.is_fatal() => {
                log::warn!("{}", err);
                self.print_no_match(&table, &err);
                std::process::exit(1);
            }
            Err(err) => return Err(err.into()),
        };

        let quotation = Quotation::new(&config, row, self.quantity)?;

        if self.csv {
            let mut wtr = csv::Writer::from_writer(io::stdout());
            wtr.serialize(quotation.to_record(&catalog))?;
            wtr.flush()?;
        } else if self.json {
            let record = quotation.to_record(&catalog);
            println!("{}", serde_json::to_string_pretty(&record)?);
        } else {
            print_quotation(&catalog, &config.title, &quotation);
        }
        Ok(())
    }

    fn print_no_match(&self, table: &RateTable, err: &RateError) {
        eprintln!("\u{26A0} {}", err);
        // Point at the first dimension where the selection went wrong.
        let valid = (0..self.keys.len())
            .take_while(|&depth| {
                let wanted = normalize_key(&self.keys[depth]);
                table
                    .options(&self.keys[..depth])
                    .iter()
                    .any(|option| normalize_key(option) == wanted)
            })
            .count();
        let options = table.options(&self.keys[..valid]);
        if let Some(dimension) = table.dimensions.get(valid) {
            eprintln!("Choices for '{}':", dimension);
            for option in options {
                eprintln!("  {}", option);
            }
        }
    }
}

fn print_quotation(catalog: &Catalog, title: &str, quotation: &Quotation) {
    let currency = &catalog.currency;
    let unit = quotation.unit.as_deref().unwrap_or("");
    let result = &quotation.result;

    println!();
    println!("{}: {}", title.to_uppercase(), quotation.keys.join(" / "));
    println!(
        "  Quantity: {} {}",
        format_quantity(quotation.quantity),
        unit
    );
    println!();
    println!(
        "  Tax {}: {}",
        catalog.prior_year,
        format_money(result.tax_prior, currency)
    );
    println!(
        "  Tax {}: {}",
        catalog.current_year,
        format_money(result.tax_current, currency)
    );
    println!(
        "  Growth:   {} ({})",
        format_money(result.growth_abs, currency),
        format_growth_pct(result.growth_pct)
    );
    println!();
    println!(
        "  Rate {}: {} {}/{}",
        catalog.prior_year, quotation.rate_prior, currency, unit
    );
    println!(
        "  Rate {}: {} {}/{}",
        catalog.current_year, quotation.rate_current, currency, unit
    );
    println!();
}
