//! Tolerant parsing of locale-formatted numeric text
//!
//! Form values arrive as Danish-style text (`1.234,56`). Anything that does not
//! start with a number parses as 0.

use crate::config::MonteCarloLimits;

/// Parse a number written with `.` thousands separators and a `,` decimal mark
pub fn parse_locale_number(text: &str) -> f64 {
    let normalized = text.replace('.', "").replacen(',', ".", 1);
    leading_number(&normalized)
}

/// Parse a percentage written with either `,` or `.` as the decimal mark
pub fn parse_percent(text: &str) -> f64 {
    leading_number(&text.replacen(',', ".", 1))
}

/// Replace NaN and infinities with 0
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Clamp a requested Monte Carlo path count into the configured range
pub fn clamp_path_count(requested: Option<u32>, limits: &MonteCarloLimits) -> u32 {
    requested
        .unwrap_or(limits.default_paths)
        .clamp(limits.min_paths, limits.max_paths.max(limits.min_paths))
}

/// Parse the longest numeric prefix of `text`, ignoring leading whitespace
fn leading_number(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().map(finite_or_zero).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_numbers() {
        assert_eq!(parse_locale_number("1.234,56"), 1234.56);
        assert_eq!(parse_locale_number("250.000"), 250_000.0);
        assert_eq!(parse_locale_number("  42 kr"), 42.0);
        assert_eq!(parse_locale_number("-3,5"), -3.5);
        assert_eq!(parse_locale_number(",5"), 0.5);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(parse_locale_number(""), 0.0);
        assert_eq!(parse_locale_number("abc"), 0.0);
        assert_eq!(parse_locale_number("-"), 0.0);
        assert_eq!(parse_locale_number("1e999"), 0.0);
    }

    #[test]
    fn test_percent_keeps_dot_decimal() {
        assert_eq!(parse_percent("7,5"), 7.5);
        assert_eq!(parse_percent("0.35"), 0.35);
        assert_eq!(parse_percent("2e"), 2.0);
        assert_eq!(parse_percent("1.5e2%"), 150.0);
    }

    #[test]
    fn test_finite_or_zero() {
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
        assert_eq!(finite_or_zero(-2.5), -2.5);
    }

    #[test]
    fn test_clamp_path_count() {
        let limits = MonteCarloLimits::default();
        assert_eq!(clamp_path_count(Some(10), &limits), 50);
        assert_eq!(clamp_path_count(Some(10_000), &limits), 3000);
        assert_eq!(clamp_path_count(None, &limits), 350);
        assert_eq!(clamp_path_count(Some(999), &limits), 999);
    }
}
