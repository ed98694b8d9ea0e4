//! Validate command - load every category and report schema or data problems

use super::SourceArgs;
use crate::core::load_rate_table;
use crate::source;
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct ValidateCommand {
    #[command(flatten)]
    source: SourceArgs,

    /// Output as JSON instead of formatted text
    #[arg(long)]
    json: bool,
}

/// Outcome of loading one category
#[derive(Debug, Clone, Serialize)]
struct CategoryStatus {
    id: String,
    sheet: String,
    ok: bool,
    rows: usize,
    duplicates: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct ValidationOutput {
    workbook: String,
    sheets: Vec<String>,
    failed: usize,
    categories: Vec<CategoryStatus>,
}

impl ValidateCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let catalog = self.source.catalog()?;
        let mut source = source::open_source(&self.source.workbook)?;
        let sheets = source.sheet_names();

        let statuses: Vec<CategoryStatus> = catalog
            .categories
            .iter()
            .map(|config| match load_rate_table(source.as_mut(), config) {
                Ok(table) => CategoryStatus {
                    id: config.id.clone(),
                    sheet: config.sheet.clone(),
                    ok: true,
                    rows: table.len(),
                    duplicates: table.duplicate_keys(),
                    error: None,
                },
                Err(err) => CategoryStatus {
                    id: config.id.clone(),
                    sheet: config.sheet.clone(),
                    ok: false,
                    rows: 0,
                    duplicates: Vec::new(),
                    error: Some(err.to_string()),
                },
            })
            .collect();
        let failed = statuses.iter().filter(|s| !s.ok).count();

        if self.json {
            let output = ValidationOutput {
                workbook: self.source.workbook.display().to_string(),
                sheets,
                failed,
                categories: statuses,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            self.print_text(&statuses, &sheets, failed);
        }

        // Exit with code 1 if any category failed to load
        if failed > 0 {
            std::process::exit(1);
        }
        Ok(())
    }

    fn print_text(&self, statuses: &[CategoryStatus], sheets: &[String], failed: usize) {
        println!();
        println!("VALIDATION RESULTS ({})", self.source.workbook.display());
        println!();

        for status in statuses {
            match &status.error {
                None => {
                    println!(
                        "  \u{2713} {} [{}]: {} rate rows",
                        status.id, status.sheet, status.rows
                    );
                    for key in &status.duplicates {
                        println!("      duplicate key, first row wins: {}", key);
                    }
                }
                Some(error) => {
                    println!("  \u{2717} {} [{}]: {}", status.id, status.sheet, error);
                }
            }
        }

        println!();
        if failed == 0 {
            println!("\u{2713} All categories loaded.");
        } else {
            println!("\u{26A0} {} categor(ies) failed to load.", failed);
            println!("Sheets in workbook: {}", sheets.join(", "));
        }
    }
}
