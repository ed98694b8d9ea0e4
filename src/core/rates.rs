use super::calculator::growth_pct;
use super::cell::normalize_key;
use super::error::RateError;
use rust_decimal::Decimal;
use serde::Serialize;

/// One category combination with its rates for both years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateRow {
    /// Dimension key values, in the order of the table's dimensions
    pub keys: Vec<String>,
    pub rate_prior: Decimal,
    pub rate_current: Decimal,
    pub unit: Option<String>,
}

impl RateRow {
    fn matches(&self, selection: &[String]) -> bool {
        selection.len() <= self.keys.len()
            && self
                .keys
                .iter()
                .zip(selection)
                .all(|(key, selected)| normalize_key(key) == *selected)
    }

    /// Year-over-year change of the rate itself, in percent. Zero when the
    /// change cannot be represented.
    pub fn rate_growth_pct(&self) -> Decimal {
        self.rate_current
            .checked_sub(self.rate_prior)
            .and_then(|change| growth_pct(change, self.rate_prior))
            .unwrap_or(Decimal::ZERO)
    }
}

/// Rate rows of one tax category. Immutable once loaded.
#[derive(Debug, Clone, Serialize)]
pub struct RateTable {
    pub category: String,
    /// Display names of the dimension key columns
    pub dimensions: Vec<String>,
    rows: Vec<RateRow>,
}

impl RateTable {
    pub fn new(category: String, dimensions: Vec<String>, rows: Vec<RateRow>) -> Self {
        RateTable {
            category,
            dimensions,
            rows,
        }
    }

    pub fn rows(&self) -> &[RateRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Find the row for a full key selection. Duplicates resolve to the
    /// first row in sheet order.
    pub fn resolve<S: AsRef<str>>(&self, selection: &[S]) -> Result<&RateRow, RateError> {
        let selection = normalized(selection);
        let found = if selection.len() == self.dimensions.len() {
            self.rows.iter().find(|row| row.matches(&selection))
        } else {
            None
        };
        found.ok_or_else(|| RateError::NoMatchingRate {
            category: self.category.clone(),
            key: format!("[{}]", selection.join(" / ")),
        })
    }

    /// Distinct values of the next unselected dimension among rows matching
    /// `selected`, in first-seen order. Empty once every dimension is chosen.
    pub fn options<S: AsRef<str>>(&self, selected: &[S]) -> Vec<&str> {
        let selection = normalized(selected);
        let depth = selection.len();
        if depth >= self.dimensions.len() {
            return Vec::new();
        }
        let mut seen = Vec::new();
        let mut out = Vec::new();
        let matching = self.rows.iter().filter(|row| row.matches(&selection));
        for value in matching.filter_map(|row| row.keys.get(depth)) {
            let key = normalize_key(value);
            if !seen.contains(&key) {
                seen.push(key);
                out.push(value.as_str());
            }
        }
        out
    }

    /// Key combinations that appear more than once.
    pub fn duplicate_keys(&self) -> Vec<String> {
        let mut seen: Vec<Vec<String>> = Vec::new();
        let mut dups = Vec::new();
        for row in &self.rows {
            let key: Vec<String> = row.keys.iter().map(|k| normalize_key(k)).collect();
            if seen.contains(&key) {
                let label = key.join(" / ");
                if !dups.contains(&label) {
                    dups.push(label);
                }
            } else {
                seen.push(key);
            }
        }
        dups
    }
}

fn normalized<S: AsRef<str>>(selection: &[S]) -> Vec<String> {
    selection.iter().map(|s| normalize_key(s.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(keys: &[&str], prior: Decimal, current: Decimal) -> RateRow {
        RateRow {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            rate_prior: prior,
            rate_current: current,
            unit: Some("тонн".to_string()),
        }
    }

    fn waste_table() -> RateTable {
        RateTable::new(
            "eco_waste".to_string(),
            vec![
                "Способ обращения с отходами".to_string(),
                "Категории отходов".to_string(),
            ],
            vec![
                row(&["Захоронение", "Acetone (Solvents)"], dec!(10), dec!(12)),
                row(&["Захоронение", "Solvents"], dec!(8), dec!(9)),
                row(&["Хранение", "Solvents"], dec!(2), dec!(3)),
                row(&["Захоронение", "Solvents"], dec!(99), dec!(99)),
            ],
        )
    }

    #[test]
    fn resolve_exact_match() {
        let table = waste_table();
        let found = table.resolve(&["Хранение", "Solvents"]).unwrap();
        assert_eq!(found.rate_prior, dec!(2));
    }

    #[test]
    fn resolve_ignores_whitespace_differences() {
        let table = waste_table();
        let found = table.resolve(&["  Захоронение ", "Acetone  (Solvents)"]).unwrap();
        assert_eq!(found.rate_current, dec!(12));
    }

    #[test]
    fn resolve_first_match_wins() {
        let table = waste_table();
        let found = table.resolve(&["Захоронение", "Solvents"]).unwrap();
        assert_eq!(found.rate_prior, dec!(8));
        assert_eq!(table.duplicate_keys(), vec!["Захоронение / Solvents".to_string()]);
    }

    #[test]
    fn resolve_missing_combination() {
        let table = waste_table();
        let err = table.resolve(&["Хранение", "Acetone (Solvents)"]).unwrap_err();
        assert!(matches!(err, RateError::NoMatchingRate { .. }));
    }

    #[test]
    fn resolve_partial_selection_is_no_match() {
        let table = waste_table();
        let err = table.resolve(&["Хранение"]).unwrap_err();
        assert_eq!(
            err,
            RateError::NoMatchingRate {
                category: "eco_waste".to_string(),
                key: "[Хранение]".to_string(),
            }
        );
    }

    #[test]
    fn options_cascade_in_sheet_order() {
        let table = waste_table();
        let none: [&str; 0] = [];
        assert_eq!(table.options(&none), vec!["Захоронение", "Хранение"]);
        assert_eq!(
            table.options(&["Захоронение"]),
            vec!["Acetone (Solvents)", "Solvents"]
        );
        assert!(table.options(&["Хранение", "Solvents"]).is_empty());
    }

    #[test]
    fn rate_growth_uses_zero_baseline_policy() {
        assert_eq!(row(&["a"], dec!(10), dec!(12)).rate_growth_pct(), dec!(20));
        assert_eq!(row(&["a"], dec!(0), dec!(5)).rate_growth_pct(), Decimal::ZERO);
        let huge = Decimal::from_i128_with_scale(10i128.pow(28), 0);
        assert_eq!(row(&["a"], Decimal::new(1, 28), huge).rate_growth_pct(), Decimal::ZERO);
    }

    #[test]
    fn options_skip_rows_with_short_keys() {
        let table = RateTable::new(
            "eco-waste".to_string(),
            vec!["Вид".to_string(), "Отход".to_string()],
            vec![
                row(&["Захоронение"], dec!(1), dec!(2)),
                row(&["Захоронение", "Solvents"], dec!(3), dec!(4)),
            ],
        );
        assert_eq!(table.options(&["Захоронение"]), vec!["Solvents"]);
        assert!(table.resolve(&["Захоронение", "Solvents"]).is_ok());
    }
}
