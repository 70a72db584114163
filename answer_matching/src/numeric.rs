use std::fmt::Display;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::NumericParts;
use crate::normalize::normalize_key;

// One or two numbers, each optionally followed by a percent sign, joined by a dash.
// ("1%", "1000€", "14 pounds", "$1", "About 10", "$1 billion", "30-40%" etc)
static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(-?\d[\d.,]*)(%)?(?:-(\d[\d.,]*)(%)?)?").expect("invalid NUMERIC_RE")
});

fn parse_number(text: &str) -> Option<f64> {
    // Commas are thousands separators. A trailing comma ("1,") is dropped as well.
    let sanitized: String = text.chars().filter(|c| *c != ',').collect();
    sanitized
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
}

/// True if the text is a plain number, once the thousands separators are removed.
///
/// Percentages are not numbers in this sense: they are only understood by
/// [extract_numeric_parts].
pub fn is_numeric(text: &str) -> bool {
    parse_number(text).is_some()
}

/// Returns the parts of the answer option that are numerical in nature
/// (integers, floats, percentages or ranges of such).
///
/// Only the first number, or the first two numbers joined by a dash, are
/// considered. Qualifiers such as "more than" or "between" are ignored.
///
/// ```
/// use answer_matching::{extract_numeric_parts, NumericParts};
///
/// assert_eq!(extract_numeric_parts("14 pounds"), NumericParts::Single(14.0));
/// assert_eq!(extract_numeric_parts("12-15%"), NumericParts::Range(0.12, 0.15));
/// assert_eq!(extract_numeric_parts("Yes"), NumericParts::Empty);
/// ```
pub fn extract_numeric_parts(answer_option: impl Display) -> NumericParts {
    let key = normalize_key(answer_option);

    if let Some(x) = parse_number(&key) {
        return NumericParts::Single(x);
    }

    let caps = match NUMERIC_RE.captures(&key) {
        Some(caps) => caps,
        None => return NumericParts::Empty,
    };

    let first = match caps.get(1).and_then(|m| parse_number(m.as_str())) {
        Some(x) => x,
        None => return NumericParts::Empty,
    };
    let first_is_percent = caps.get(2).is_some();
    let second = caps.get(3).and_then(|m| parse_number(m.as_str()));
    // A trailing percent sign applies to both sides of the range ("12-15%").
    let second_is_percent = caps.get(4).is_some();

    match second {
        Some(y) if second_is_percent => NumericParts::Range(first / 100.0, y / 100.0),
        Some(y) if first_is_percent => NumericParts::Range(first / 100.0, y),
        Some(y) => NumericParts::Range(first, y),
        None if first_is_percent => NumericParts::Single(first / 100.0),
        None => NumericParts::Single(first),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NumericParts::*;

    #[test]
    fn numeric_strings() {
        let cases = [
            ("1", true),
            ("1.0", true),
            ("1.", true),
            ("1,0", true),
            ("1,", true),
            ("-2.5", true),
            ("150,000", true),
            ("150,000.00", true),
            ("150,000.00%", false),
            ("abc%", false),
            ("", false),
            ("nan", false),
            ("inf", false),
            ("1 2", false),
        ];
        for (s, expected) in cases {
            assert_eq!(is_numeric(s), expected, "input {:?}", s);
        }
    }

    #[test]
    fn numeric_agrees_with_float_parsing() {
        for s in ["0", "12", "12.5", "-3", "1e3", "1000000", "7,", "3,141.5"] {
            let without_commas = s.replace(',', "");
            assert_eq!(
                is_numeric(s),
                without_commas.parse::<f64>().is_ok(),
                "input {:?}",
                s
            );
        }
    }

    #[test]
    fn extract_parts() {
        let cases = [
            ("", Empty),
            ("true", Empty),
            ("false", Empty),
            ("1", Single(1.0)),
            ("1.1", Single(1.1)),
            ("1%", Single(0.01)),
            ("14%", Single(0.14)),
            ("-1.1", Single(-1.1)),
            ("-1%", Single(-0.01)),
            ("1-1.1", Range(1.0, 1.1)),
            ("1-2%", Range(0.01, 0.02)),
            ("12-15%", Range(0.12, 0.15)),
            ("Abc", Empty),
            ("14 pounds", Single(14.0)),
            ("1000€", Single(1000.0)),
            ("$1", Single(1.0)),
            ("$14", Single(14.0)),
            ("$14 billion", Single(14.0)),
            ("About 10", Single(10.0)),
            ("Around 150,000", Single(150000.0)),
            ("Yes", Empty),
            ("30-40%", Range(0.3, 0.4)),
            ("20-30%", Range(0.2, 0.3)),
            ("More than 500", Single(500.0)),
            ("Less than 500", Single(500.0)),
            ("Between 300 and 700", Single(300.0)),
        ];
        for (s, expected) in cases {
            assert_eq!(extract_numeric_parts(s), expected, "input {:?}", s);
        }
    }

    #[test]
    fn extract_from_numbers() {
        assert_eq!(extract_numeric_parts(1), Single(1.0));
        assert_eq!(extract_numeric_parts(1.1), Single(1.1));
        assert_eq!(extract_numeric_parts(true), Empty);
    }

    #[test]
    fn malformed_numbers() {
        assert_eq!(extract_numeric_parts("1.2.3 apples"), Empty);
        // The second side of the range cannot be read, keep the first one.
        assert_eq!(extract_numeric_parts("10-1.2.3"), Single(10.0));
    }

    #[test]
    fn reextract_single_part() {
        for s in ["14%", "About 10", "$1,500", "-3.25", "0.1"] {
            let parts = extract_numeric_parts(s);
            let x = parts.first().unwrap();
            assert_eq!(extract_numeric_parts(x.to_string()), Single(x), "input {:?}", s);
        }
    }

    #[test]
    fn helpers() {
        assert_eq!(Range(0.4, 0.3).min(), Some(0.3));
        assert_eq!(Range(0.4, 0.3).first(), Some(0.4));
        assert_eq!(Single(2.0).min(), Some(2.0));
        assert_eq!(Empty.first(), None);
        assert_eq!(Empty.min(), None);
    }
}
