/// Errors raised while loading rate tables or computing a quotation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RateError {
    #[error("cannot open rate source '{source_name}': {reason}")]
    SourceUnavailable { source_name: String, reason: String },
    #[error("sheet '{sheet}' not found in rate source")]
    SheetNotFound { sheet: String },
    #[error("column '{column}' not found in sheet '{sheet}'")]
    ColumnNotFound { sheet: String, column: String },
    #[error("sheet '{sheet}' has no rows with valid rates")]
    NoUsableRows { sheet: String },
    #[error("no rate for {key} in category '{category}'")]
    NoMatchingRate { category: String, key: String },
    #[error("rate is missing or not a number")]
    InvalidRate,
    #[error("invalid quantity {quantity}: {reason}")]
    InvalidQuantity { quantity: String, reason: String },
    #[error("tax amount overflows decimal range")]
    Overflow,
    #[error("invalid catalog: {0}")]
    InvalidConfig(String),
}

impl RateError {
    /// Fatal errors end the session; the only recoverable one is a selection
    /// with no matching rate row.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RateError::NoMatchingRate { .. })
    }
}
