//! Display formatting for paperwork and the order table.
//!
//! Numbers use the Brazilian convention (decimal comma, dot thousands
//! separator). Dates are rendered in the fixed layouts the printed forms use.

use chrono::{DateTime, Datelike, Utc};

use crate::customs::numeric::{Money, Weight};

/// `1234` (hundredths) → `"12,34"`; no thousands separator, as on the forms.
pub fn decimal_comma(scaled: i64) -> String {
    let sign = if scaled < 0 { "-" } else { "" };
    let abs = scaled.unsigned_abs();
    format!("{sign}{},{:02}", abs / 100, abs % 100)
}

/// `"12.34"`, the dotted two-place form used on the English-language sheets.
pub fn decimal_point(scaled: i64) -> String {
    let sign = if scaled < 0 { "-" } else { "" };
    let abs = scaled.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

pub fn money_comma(value: Money) -> String {
    decimal_comma(value.cents())
}

pub fn money_point(value: Money) -> String {
    decimal_point(value.cents())
}

/// Kilograms to two places with a decimal comma, e.g. `"1,50"`.
pub fn weight_comma(value: Weight) -> String {
    decimal_comma(value.centi_kg())
}

pub fn weight_point(value: Weight) -> String {
    decimal_point(value.centi_kg())
}

/// pt-BR currency display: `R$ 1.234,56`, `US$ 10,00`, `€ 2,50`, otherwise the code itself: `GBP 3,00`.
pub fn currency_br(value: Money, currency: &str) -> String {
    let symbol = match currency.to_ascii_uppercase().as_str() {
        "BRL" => "R$".to_string(),
        "USD" => "US$".to_string(),
        "EUR" => "€".to_string(),
        other => other.to_string(),
    };

    let cents = value.cents();
    let units = (cents / 100).to_string();
    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{symbol}\u{a0}{grouped},{:02}", cents % 100)
}

/// `dd/mm/yyyy`
pub fn date_br(ts: &DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y").to_string()
}

/// `dd/mm/yy`
pub fn date_br_short(ts: &DateTime<Utc>) -> String {
    ts.format("%d/%m/%y").to_string()
}

/// `dd/mm/yyyy HH:MM`
pub fn datetime_br(ts: &DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y %H:%M").to_string()
}

/// `October 14, 2026`
pub fn date_long_en(ts: &DateTime<Utc>) -> String {
    format!("{} {}, {}", ts.format("%B"), ts.day(), ts.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 4, 9, 5, 0).unwrap()
    }

    #[test]
    fn test_decimal_forms() {
        assert_eq!(decimal_comma(1250), "12,50");
        assert_eq!(decimal_comma(7), "0,07");
        assert_eq!(decimal_point(123456), "1234.56");
        assert_eq!(decimal_comma(-50), "-0,50");
    }

    #[test]
    fn test_weight_display_rounds_to_two_places() {
        assert_eq!(weight_comma(Weight::from_grams(1505).unwrap()), "1,51");
        assert_eq!(weight_point(Weight::from_grams(500).unwrap()), "0.50");
    }

    #[test]
    fn test_currency_grouping() {
        let v = Money::from_cents(123456789).unwrap();
        assert_eq!(currency_br(v, "BRL"), "R$\u{a0}1.234.567,89");
        assert_eq!(currency_br(Money::from_cents(1000).unwrap(), "usd"), "US$\u{a0}10,00");
        assert_eq!(currency_br(Money::from_cents(5).unwrap(), "GBP"), "GBP\u{a0}0,05");
        assert_eq!(currency_br(Money::from_cents(250).unwrap(), "EUR"), "€\u{a0}2,50");
        assert_eq!(currency_br(Money::from_cents(100000).unwrap(), "BRL"), "R$\u{a0}1.000,00");
    }

    #[test]
    fn test_date_layouts() {
        assert_eq!(date_br(&ts()), "04/03/2026");
        assert_eq!(date_br_short(&ts()), "04/03/26");
        assert_eq!(datetime_br(&ts()), "04/03/2026 09:05");
        assert_eq!(date_long_en(&ts()), "March 4, 2026");
    }
}
