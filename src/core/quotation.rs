use super::calculator::TaxResult;
use super::error::RateError;
use super::format::{format_amount, format_pct, format_quantity};
use super::rates::RateRow;
use crate::catalog::{Catalog, CategoryConfig};
use bytax_derive::CsvColumns;
use rust_decimal::Decimal;
use serde::Serialize;

/// Column description produced by `#[derive(CsvColumns)]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvColumn {
    pub name: &'static str,
    pub required: bool,
    pub description: &'static str,
}

/// A computed result together with what it was computed from.
#[derive(Debug, Clone)]
pub struct Quotation {
    pub category: String,
    pub keys: Vec<String>,
    pub quantity: Decimal,
    pub unit: Option<String>,
    pub rate_prior: Decimal,
    pub rate_current: Decimal,
    pub result: TaxResult,
}

impl Quotation {
    pub fn new(
        config: &CategoryConfig,
        row: &RateRow,
        quantity: Decimal,
    ) -> Result<Quotation, RateError> {
        if config.whole_units && !quantity.fract().is_zero() {
            return Err(RateError::InvalidQuantity {
                quantity: quantity.to_string(),
                reason: format!("'{}' is counted in whole units", config.id),
            });
        }
        let result = TaxResult::for_row(row, quantity)?;
        Ok(Quotation {
            category: config.id.clone(),
            keys: row.keys.clone(),
            quantity,
            unit: row.unit.clone(),
            rate_prior: row.rate_prior,
            rate_current: row.rate_current,
            result,
        })
    }

    pub fn to_record(&self, catalog: &Catalog) -> QuotationRecord {
        QuotationRecord {
            category: self.category.clone(),
            key: self.keys.join(" / "),
            quantity: format_quantity(self.quantity),
            unit: self.unit.clone(),
            prior_year: catalog.prior_year,
            current_year: catalog.current_year,
            rate_prior: self.rate_prior.to_string(),
            rate_current: self.rate_current.to_string(),
            tax_prior: format_amount(self.result.tax_prior),
            tax_current: format_amount(self.result.tax_current),
            growth_abs: format_amount(self.result.growth_abs),
            growth_pct: format_pct(self.result.growth_pct),
            currency: catalog.currency.clone(),
        }
    }
}

/// Flat CSV/JSON form of a quotation
#[derive(Debug, Clone, Serialize, CsvColumns)]
pub struct QuotationRecord {
    /// Category id from the catalog
    pub category: String,
    /// Selected dimension keys joined with " / "
    pub key: String,
    /// Taxed quantity
    pub quantity: String,
    /// Unit of the quantity
    pub unit: Option<String>,
    /// Year of the prior rate
    pub prior_year: i32,
    /// Year of the current rate
    pub current_year: i32,
    /// Prior-year rate per unit
    pub rate_prior: String,
    /// Current-year rate per unit
    pub rate_current: String,
    /// Prior-year tax, two decimals
    pub tax_prior: String,
    /// Current-year tax, two decimals
    pub tax_current: String,
    /// Current minus prior tax, two decimals
    pub growth_abs: String,
    /// Percentage growth, one decimal (0 when prior tax is 0)
    pub growth_pct: String,
    /// Currency of the amounts
    pub currency: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn transport_row() -> RateRow {
        RateRow {
            keys: vec!["Легковые автомобили".to_string()],
            rate_prior: dec!(93.5),
            rate_current: dec!(107),
            unit: Some("ед.".to_string()),
        }
    }

    #[test]
    fn whole_units_reject_fractions() {
        let catalog = Catalog::builtin();
        let transport = catalog.category("transport").unwrap();
        let err = Quotation::new(transport, &transport_row(), dec!(1.5)).unwrap_err();
        assert!(matches!(err, RateError::InvalidQuantity { .. }));
        assert!(Quotation::new(transport, &transport_row(), dec!(2.0)).is_ok());
    }

    #[test]
    fn record_is_formatted() {
        let catalog = Catalog::builtin();
        let transport = catalog.category("transport").unwrap();
        let quotation = Quotation::new(transport, &transport_row(), dec!(3)).unwrap();
        let record = quotation.to_record(&catalog);
        assert_eq!(record.tax_prior, "280.50");
        assert_eq!(record.tax_current, "321.00");
        assert_eq!(record.growth_abs, "40.50");
        assert_eq!(record.growth_pct, "14.4");
        assert_eq!(record.currency, "BYN");
        assert_eq!(record.prior_year, 2025);
    }

    #[test]
    fn record_columns() {
        let columns = QuotationRecord::csv_columns();
        assert_eq!(columns.len(), 13);
        assert_eq!(columns[0].name, "category");
        assert!(columns[0].required);
        let unit = columns.iter().find(|c| c.name == "unit").unwrap();
        assert!(!unit.required);
        assert_eq!(unit.description, "Unit of the quantity");
    }
}
