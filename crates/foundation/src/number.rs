//! Permissive number parsing and display formatting for user-facing fields.
//!
//! Form inputs arrive as loosely-typed text. Everything numeric the catalog
//! accepts goes through [`parse_optional_number`] so the empty / null /
//! garbage cases behave identically across create and edit flows.

/// Parse a free-form numeric field.
///
/// - `None` (no value supplied) and `""` yield `None`.
/// - Leading whitespace is skipped and the longest decimal prefix is taken,
///   so `"12.5 km"` parses as `12.5`.
/// - Text without a leading number (`"abc"`) yields `None`.
/// - Non-finite results (`"Infinity"`, overflow such as `"1e400"`) yield
///   `None`; they have no JSON representation.
pub fn parse_optional_number(input: Option<&str>) -> Option<f64> {
    let raw = input?;
    if raw.is_empty() {
        return None;
    }
    let literal = decimal_prefix(raw.trim_start())?;
    let value = literal.parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Longest prefix of `s` shaped like `[+-]digits[.digits][e[+-]digits]`.
fn decimal_prefix(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut i = 0usize;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut mantissa_digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        mantissa_digits += j - frac_start;
        // A lone "." is not a number; "5." is.
        if mantissa_digits > 0 {
            i = j;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    let mut end = i;
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    let literal = &s[..end];
    Some(literal.strip_suffix('.').unwrap_or(literal))
}

/// Locale-style grouping: thousands separated by `,`, at most three
/// fraction digits, trailing zeros dropped.
pub fn format_grouped(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let text = if value.fract() == 0.0 || value.abs() >= 1e15 {
        format!("{value}")
    } else {
        let fixed = format!("{value:.3}");
        fixed
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    };

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Scientific notation with an explicit exponent sign, e.g. `5.97e+24`.
pub fn format_exponential(value: f64, fraction_digits: usize) -> String {
    let text = format!("{value:.fraction_digits$e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn absent_and_empty_inputs_are_none() {
        assert_eq!(parse_optional_number(None), None);
        assert_eq!(parse_optional_number(Some("")), None);
        assert_eq!(parse_optional_number(Some("   ")), None);
    }

    #[test]
    fn non_numeric_input_is_none() {
        assert_eq!(parse_optional_number(Some("abc")), None);
        assert_eq!(parse_optional_number(Some(".")), None);
        assert_eq!(parse_optional_number(Some("-")), None);
        assert_eq!(parse_optional_number(Some("e5")), None);
    }

    #[test]
    fn valid_numbers_parse() {
        assert_relative_eq!(parse_optional_number(Some("12.5")).unwrap(), 12.5);
        assert_relative_eq!(parse_optional_number(Some("-3")).unwrap(), -3.0);
        assert_relative_eq!(parse_optional_number(Some(".5")).unwrap(), 0.5);
        assert_relative_eq!(parse_optional_number(Some("5.")).unwrap(), 5.0);
        assert_relative_eq!(parse_optional_number(Some("5.97e24")).unwrap(), 5.97e24);
        assert_relative_eq!(parse_optional_number(Some("  42")).unwrap(), 42.0);
    }

    #[test]
    fn trailing_garbage_is_ignored() {
        assert_relative_eq!(parse_optional_number(Some("12.5 km")).unwrap(), 12.5);
        assert_relative_eq!(parse_optional_number(Some("7e")).unwrap(), 7.0);
        assert_relative_eq!(parse_optional_number(Some("7e+")).unwrap(), 7.0);
    }

    #[test]
    fn non_finite_values_are_none() {
        assert_eq!(parse_optional_number(Some("Infinity")), None);
        assert_eq!(parse_optional_number(Some("1e400")), None);
        assert_eq!(parse_optional_number(Some("NaN")), None);
    }

    #[test]
    fn grouping_matches_locale_style() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(149_600_000.0), "149,600,000");
        assert_eq!(format_grouped(6371.0), "6,371");
        assert_eq!(format_grouped(29.78), "29.78");
        assert_eq!(format_grouped(1234.56789), "1,234.568");
        assert_eq!(format_grouped(-1500.5), "-1,500.5");
        assert_eq!(format_grouped(999.0), "999");
    }

    #[test]
    fn exponential_has_signed_exponent() {
        assert_eq!(format_exponential(5.97e24, 2), "5.97e+24");
        assert_eq!(format_exponential(0.00123, 2), "1.23e-3");
    }
}
