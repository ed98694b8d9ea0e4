pub mod calculator;
pub mod cell;
pub mod error;
pub mod format;
pub mod loader;
pub mod quotation;
pub mod rates;

// Flat public surface for domain types and functions.
#[allow(unused_imports)]
pub use calculator::{compute, TaxResult};
#[allow(unused_imports)]
pub use cell::{build_display_label, normalize_column_name, normalize_key, parse_rate, Cell};
pub use error::RateError;
#[allow(unused_imports)]
pub use format::{format_amount, format_growth_pct, format_money, format_pct, format_quantity};
#[allow(unused_imports)]
pub use loader::{load_rate_table, table_from_sheet};
pub use quotation::{Quotation, QuotationRecord};
pub use rates::RateTable;
