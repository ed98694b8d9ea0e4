//! Options command - choices for the next dimension of a category

use super::SourceArgs;
use clap::Args;

#[derive(Args, Debug)]
pub struct OptionsCommand {
    #[command(flatten)]
    source: SourceArgs,

    /// Category id (see `categories`)
    #[arg(short, long)]
    category: String,

    /// Already selected key values, outermost first
    #[arg(short, long = "key")]
    keys: Vec<String>,

    /// Output as JSON array
    #[arg(long)]
    json: bool,
}

impl OptionsCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let (_, _, table) = self.source.load_category(&self.category)?;
        let options = table.options(self.keys.as_slice());

        if self.json {
            println!("{}", serde_json::to_string_pretty(&options)?);
            return Ok(());
        }

        match table.dimensions.get(self.keys.len()) {
            None => println!("All dimensions selected"),
            Some(_) if options.is_empty() => {
                println!("No rates for [{}]", self.keys.join(" / "));
            }
            Some(dimension) => {
                println!("{}:", dimension);
                for option in options {
                    println!("  {}", option);
                }
            }
        }
        Ok(())
    }
}
