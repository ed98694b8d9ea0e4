use rust_decimal::{Decimal, RoundingStrategy};

/// Amount with two decimals, halves rounded away from zero.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded)
}

/// Amount with a currency suffix, e.g. "50.00 BYN".
pub fn format_money(amount: Decimal, currency: &str) -> String {
    format!("{} {}", format_amount(amount), currency)
}

pub fn format_pct(pct: Decimal) -> String {
    format!("{:.1}", round_pct(pct))
}

/// Percentage with an explicit sign for non-negative values, e.g. "+20.0%".
/// The sign follows the rounded value.
pub fn format_growth_pct(pct: Decimal) -> String {
    let rounded = round_pct(pct);
    let sign = if rounded.is_sign_negative() { "-" } else { "+" };
    format!("{}{:.1}%", sign, rounded.abs())
}

fn round_pct(pct: Decimal) -> Decimal {
    let rounded = pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    // No negative zero
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Quantity without trailing zeros.
pub fn format_quantity(quantity: Decimal) -> String {
    quantity.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(format_money(dec!(50), "BYN"), "50.00 BYN");
        assert_eq!(format_money(dec!(12.345), "BYN"), "12.35 BYN");
        assert_eq!(format_money(dec!(-3.1), "BYN"), "-3.10 BYN");
    }

    #[test]
    fn growth_sign() {
        assert_eq!(format_growth_pct(dec!(20)), "+20.0%");
        assert_eq!(format_growth_pct(Decimal::ZERO), "+0.0%");
        assert_eq!(format_growth_pct(dec!(-25)), "-25.0%");
        assert_eq!(format_growth_pct(dec!(14.4385)), "+14.4%");
        assert_eq!(format_growth_pct(dec!(0.05)), "+0.1%");
    }

    #[test]
    fn tiny_decline_rounds_to_unsigned_zero() {
        assert_eq!(format_growth_pct(dec!(-0.00004)), "+0.0%");
        assert_eq!(format_growth_pct(dec!(-0.04)), "+0.0%");
        assert_eq!(format_growth_pct(dec!(-0.05)), "-0.1%");
        assert_eq!(format_pct(dec!(-0.00004)), "0.0");
    }

    #[test]
    fn quantity_trims_zeros() {
        assert_eq!(format_quantity(dec!(2.500)), "2.5");
        assert_eq!(format_quantity(dec!(3.0)), "3");
    }
}
