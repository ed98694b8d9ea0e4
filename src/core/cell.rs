//! Raw cell values and the cleanup applied to them before lookup.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// A single cell as read from a tabular source.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    /// Text form of the cell. Empty cells, NaN and blank strings have none.
    pub fn text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Int(i) => Some(i.to_string()),
            Cell::Float(f) if f.is_nan() => None,
            Cell::Float(f) => Some(f.to_string()),
            Cell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_none()
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

/// Stable lookup key for a column header.
///
/// Keeps letters of any script, digits and whitespace; whitespace runs
/// (including non-breaking spaces) collapse to a single space. Idempotent.
pub fn normalize_column_name(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Dimension key values only get their whitespace collapsed, punctuation is
/// significant ("1-2" and "12" are different soil classes).
pub fn normalize_key(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a rate cell. Never fails: anything unparseable is `None`, which
/// callers treat as "rate unavailable", never as zero.
pub fn parse_rate(cell: &Cell) -> Option<Decimal> {
    match cell {
        Cell::Empty => None,
        Cell::Int(i) => Some(Decimal::from(*i)),
        Cell::Float(f) if f.is_finite() => Decimal::from_f64(*f),
        Cell::Float(_) => None,
        Cell::Text(s) => parse_rate_text(s),
    }
}

fn parse_rate_text(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
        .collect();
    if matches!(cleaned.as_str(), "" | "." | "-" | ".-" | "-.") {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Label for a category that may have a more specific sub-type,
/// e.g. "Acetone (Solvents)". A blank or NaN specific value means none.
pub fn build_display_label(category: &Cell, specific: &Cell) -> Option<String> {
    let category = category.text()?;
    Some(match specific.text() {
        Some(specific) => format!("{} ({})", specific, category),
        None => category,
    })
}
