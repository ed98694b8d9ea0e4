//! Schema command - print the catalog format and the quotation CSV columns

use crate::catalog::Catalog;
use crate::core::QuotationRecord;
use clap::Args;
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// Output format: json-schema, csv-header or csv-fields
    #[arg(value_enum, default_value = "json-schema")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for the catalog config
    JsonSchema,
    /// The built-in catalog as JSON, a starting point for --config
    Catalog,
    /// CSV header row of `calc --csv`
    CsvHeader,
    /// CSV column descriptions of `calc --csv`
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::JsonSchema => {
                let schema = schema_for!(Catalog);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::Catalog => {
                println!("{}", serde_json::to_string_pretty(&Catalog::builtin())?);
            }
            SchemaFormat::CsvHeader => {
                let names: Vec<&str> = QuotationRecord::csv_columns()
                    .iter()
                    .map(|c| c.name)
                    .collect();
                println!("{}", names.join(","));
            }
            SchemaFormat::CsvFields => {
                println!("Quotation CSV Format");
                println!("====================");
                println!();
                for column in QuotationRecord::csv_columns() {
                    let req = if column.required { "required" } else { "optional" };
                    println!("{:14} ({:8})  {}", column.name, req, column.description);
                }
            }
        }
        Ok(())
    }
}
