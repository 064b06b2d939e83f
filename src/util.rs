// Utility helpers for lenient numeric parsing and display formatting.
//
// Ad platform exports are hand-edited often enough that thousands
// separators and stray whitespace show up in numeric columns; everything
// here turns those into typed values or `None`.
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64`.
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters (`"NaN"`, `"inf"`, `"12k"`).
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok()
}

/// Parse a count. Integral decimals such as `"12.0"` are accepted because
/// spreadsheet round-trips tend to produce them; `"12.5"` is not.
pub fn parse_i64_safe(s: Option<&str>) -> Option<i64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    let cleaned = s.replace(',', "");
    if let Ok(v) = cleaned.parse::<i64>() {
        return Some(v);
    }
    let f = parse_f64_safe(Some(&cleaned))?;
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus locale-aware thousands separators (`1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

pub fn format_currency(symbol: &str, n: f64) -> String {
    format!("{} {}", symbol, format_number(n, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_thousands_separators() {
        assert_eq!(parse_f64_safe(Some(" 1,234.50 ")), Some(1234.5));
        assert_eq!(parse_i64_safe(Some("12,000")), Some(12_000));
    }

    #[test]
    fn rejects_text_and_blanks() {
        assert_eq!(parse_f64_safe(Some("abc")), None);
        assert_eq!(parse_f64_safe(Some("NaN")), None);
        assert_eq!(parse_f64_safe(Some("   ")), None);
        assert_eq!(parse_f64_safe(None), None);
        assert_eq!(parse_i64_safe(Some("n/a")), None);
    }

    #[test]
    fn counts_accept_integral_decimals_only() {
        assert_eq!(parse_i64_safe(Some("12.0")), Some(12));
        assert_eq!(parse_i64_safe(Some("12.5")), None);
        assert_eq!(parse_i64_safe(Some("-3")), Some(-3));
    }

    #[test]
    fn formats_with_separators() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-1500.0, 2), "-1,500.00");
        assert_eq!(format_number(0.0, 2), "0.00");
        assert_eq!(format_int(9855_i64), "9,855");
        assert_eq!(format_currency("R", 100.0), "R 100.00");
    }
}
