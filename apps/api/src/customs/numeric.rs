//! Fixed-point quantities used on customs paperwork.
//!
//! Money is held as integer cents and weight as integer grams, so sums across
//! an item list never pick up floating-point drift. Rounding to two decimal
//! places happens only when a value is formatted for display.

use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// A non-negative amount of money in cents of the order currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

/// A non-negative weight in grams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(i64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("{field} is empty")]
    Empty { field: &'static str },

    #[error("{field} could not be parsed: '{raw}'")]
    Invalid { field: &'static str, raw: String },

    #[error("{field} has more than {max} decimal places: '{raw}'")]
    TooPrecise {
        field: &'static str,
        max: usize,
        raw: String,
    },

    #[error("{field} must be >= 0, got '{raw}'")]
    Negative { field: &'static str, raw: String },

    #[error("{field} overflowed")]
    Overflow { field: &'static str },
}

// ────────────────────────────────────────────────────────────────────────────
// Money
// ────────────────────────────────────────────────────────────────────────────

impl Money {
    pub const ZERO: Money = Money(0);

    /// Builds an amount from cents. Negative input is rejected.
    pub fn from_cents(cents: i64) -> Result<Self, QuantityError> {
        if cents < 0 {
            return Err(QuantityError::Negative {
                field: "money",
                raw: cents.to_string(),
            });
        }
        Ok(Money(cents))
    }

    /// Parses a decimal string such as `"19.90"` (at most 2 fractional digits).
    pub fn parse(s: &str, field: &'static str) -> Result<Self, QuantityError> {
        parse_fixed(s, field, 2).map(Money)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    /// `self × quantity`, or `None` on overflow.
    pub fn checked_times(self, quantity: u32) -> Option<Money> {
        self.0.checked_mul(i64::from(quantity)).map(Money)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Weight
// ────────────────────────────────────────────────────────────────────────────

impl Weight {
    pub const ZERO: Weight = Weight(0);

    pub fn from_grams(grams: i64) -> Result<Self, QuantityError> {
        if grams < 0 {
            return Err(QuantityError::Negative {
                field: "weight",
                raw: grams.to_string(),
            });
        }
        Ok(Weight(grams))
    }

    /// Parses a kilogram string such as `"0.5"` (at most 3 fractional digits).
    pub fn parse_kg(s: &str, field: &'static str) -> Result<Self, QuantityError> {
        parse_fixed(s, field, 3).map(Weight)
    }

    pub fn grams(self) -> i64 {
        self.0
    }

    pub fn checked_times(self, quantity: u32) -> Option<Weight> {
        self.0.checked_mul(i64::from(quantity)).map(Weight)
    }

    /// Weight in hundredths of a kilogram, rounded half-up. Used for display.
    pub fn centi_kg(self) -> i64 {
        (self.0 + 5) / 10
    }
}

impl Add for Weight {
    type Output = Weight;

    fn add(self, rhs: Weight) -> Weight {
        Weight(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Weight {
    fn sum<I: Iterator<Item = Weight>>(iter: I) -> Weight {
        iter.fold(Weight::ZERO, Add::add)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing
// ────────────────────────────────────────────────────────────────────────────

/// Converts a non-negative decimal string into an integer scaled by
/// `10^places`, without floating point. Accepts `,` as the decimal separator
/// as well as `.`.
fn parse_fixed(s: &str, field: &'static str, places: usize) -> Result<i64, QuantityError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(QuantityError::Empty { field });
    }
    if s.starts_with('-') {
        return Err(QuantityError::Negative {
            field,
            raw: s.to_string(),
        });
    }

    let digits = s.strip_prefix('+').unwrap_or(s);
    let normalized = digits.replace(',', ".");
    let (int_part, frac_part) = normalized
        .split_once('.')
        .unwrap_or((normalized.as_str(), ""));

    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part)
    {
        return Err(QuantityError::Invalid {
            field,
            raw: s.to_string(),
        });
    }
    if frac_part.len() > places {
        return Err(QuantityError::TooPrecise {
            field,
            max: places,
            raw: s.to_string(),
        });
    }

    let invalid = || QuantityError::Invalid {
        field,
        raw: s.to_string(),
    };
    let int_val: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| invalid())?
    };
    let frac_val: i64 = format!("{frac_part:0<places$}").parse().map_err(|_| invalid())?;

    let scale = 10_i64.pow(places as u32);
    int_val
        .checked_mul(scale)
        .and_then(|v| v.checked_add(frac_val))
        .ok_or(QuantityError::Overflow { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_parses_plain_and_fractional() {
        assert_eq!(Money::parse("20", "m").unwrap().cents(), 2000);
        assert_eq!(Money::parse("20.5", "m").unwrap().cents(), 2050);
        assert_eq!(Money::parse("0.07", "m").unwrap().cents(), 7);
        assert_eq!(Money::parse(".99", "m").unwrap().cents(), 99);
    }

    #[test]
    fn test_money_accepts_decimal_comma() {
        assert_eq!(Money::parse("12,34", "m").unwrap().cents(), 1234);
    }

    #[test]
    fn test_money_rejects_three_places() {
        let err = Money::parse("1.234", "price").unwrap_err();
        assert!(matches!(err, QuantityError::TooPrecise { max: 2, .. }));
    }

    #[test]
    fn test_negative_and_garbage_are_rejected() {
        assert!(matches!(
            Money::parse("-1", "m"),
            Err(QuantityError::Negative { .. })
        ));
        assert!(matches!(
            Money::parse("abc", "m"),
            Err(QuantityError::Invalid { .. })
        ));
        assert!(matches!(Money::parse("  ", "m"), Err(QuantityError::Empty { .. })));
        assert!(Money::from_cents(-5).is_err());
        assert!(Weight::from_grams(-1).is_err());
    }

    #[test]
    fn test_weight_parses_kilograms_to_grams() {
        assert_eq!(Weight::parse_kg("0.5", "w").unwrap().grams(), 500);
        assert_eq!(Weight::parse_kg("1.125", "w").unwrap().grams(), 1125);
    }

    #[test]
    fn test_centi_kg_rounds_half_up() {
        assert_eq!(Weight::from_grams(1125).unwrap().centi_kg(), 113);
        assert_eq!(Weight::from_grams(1124).unwrap().centi_kg(), 112);
        assert_eq!(Weight::from_grams(500).unwrap().centi_kg(), 50);
    }

    #[test]
    fn test_sums_fold_exactly() {
        let total: Money = [10, 20, 30]
            .into_iter()
            .map(|c| Money::from_cents(c).unwrap())
            .sum();
        assert_eq!(total.cents(), 60);
    }
}
