use clap::{Parser, Subcommand};

mod catalog;
mod cmd;
mod core;
mod source;

/// Belarusian tax calculator: prior vs current year tax from a rate workbook
#[derive(Parser, Debug)]
#[command(name = "bytax", version, author, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the configured tax categories
    Categories(cmd::categories::CategoriesCommand),
    /// List the choices for the next dimension of a category
    Options(cmd::options::OptionsCommand),
    /// Print the rate table of a category
    Rates(cmd::rates::RatesCommand),
    /// Compute the tax for a selection and quantity
    Calc(cmd::calc::CalcCommand),
    /// Load every category and report problems
    Validate(cmd::validate::ValidateCommand),
    /// Print the catalog schema or the quotation CSV columns
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Categories(c) => c.exec(),
        Command::Options(c) => c.exec(),
        Command::Rates(c) => c.exec(),
        Command::Calc(c) => c.exec(),
        Command::Validate(c) => c.exec(),
        Command::Schema(c) => c.exec(),
    }
}
