use super::error::RateError;
use super::rates::RateRow;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Tax for both years and the growth between them. Not rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaxResult {
    pub tax_prior: Decimal,
    pub tax_current: Decimal,
    pub growth_abs: Decimal,
    pub growth_pct: Decimal,
}

impl TaxResult {
    /// Compute the quotation for a resolved rate row.
    pub fn for_row(row: &RateRow, quantity: Decimal) -> Result<TaxResult, RateError> {
        compute(Some(row.rate_prior), Some(row.rate_current), quantity)
    }
}

/// Multiply both rates by the quantity and derive the growth.
///
/// A missing rate is a caller bug and fails with `InvalidRate` instead of
/// being read as zero. Percentage growth is zero when the prior-year tax is
/// zero or negative.
pub fn compute(
    rate_prior: Option<Decimal>,
    rate_current: Option<Decimal>,
    quantity: Decimal,
) -> Result<TaxResult, RateError> {
    let (rate_prior, rate_current) = match (rate_prior, rate_current) {
        (Some(prior), Some(current)) => (prior, current),
        _ => return Err(RateError::InvalidRate),
    };
    if quantity.is_sign_negative() && !quantity.is_zero() {
        return Err(RateError::InvalidQuantity {
            quantity: quantity.to_string(),
            reason: "must not be negative".to_string(),
        });
    }

    let tax_prior = rate_prior.checked_mul(quantity).ok_or(RateError::Overflow)?;
    let tax_current = rate_current
        .checked_mul(quantity)
        .ok_or(RateError::Overflow)?;
    let growth_abs = tax_current
        .checked_sub(tax_prior)
        .ok_or(RateError::Overflow)?;

    log::debug!(
        "compute: qty={}, rates={}/{}, tax={}/{}",
        quantity,
        rate_prior,
        rate_current,
        tax_prior,
        tax_current
    );

    let growth_pct = growth_pct(growth_abs, tax_prior).ok_or(RateError::Overflow)?;

    Ok(TaxResult {
        tax_prior,
        tax_current,
        growth_abs,
        growth_pct,
    })
}

/// `change / baseline * 100`, or zero when the baseline is not positive.
/// `None` when the division overflows.
pub(crate) fn growth_pct(change: Decimal, baseline: Decimal) -> Option<Decimal> {
    if baseline > Decimal::ZERO {
        change
            .checked_div(baseline)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
    } else {
        Some(Decimal::ZERO)
    }
}
