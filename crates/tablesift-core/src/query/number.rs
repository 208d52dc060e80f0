/// Lenient numeric parsing for cell text
///
/// Cells are always text. A cell counts as numeric when its longest leading
/// decimal literal parses, so `"21"`, `" 3.5kg"` and `"1e3"` are numbers while
/// `""`, `"abc"` and `"."` are not.

/// Parses the longest decimal prefix of `text` after leading whitespace and
/// byte order marks.
///
/// Accepts an optional sign followed by `Infinity` or by digits with an
/// optional fraction and exponent. An exponent marker with no digits after it
/// is not consumed. Returns `None` when no digits (or `Infinity`) are found.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let text = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    if text[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_float_prefix("21"), Some(21.0));
        assert_eq!(parse_float_prefix("-3.5"), Some(-3.5));
        assert_eq!(parse_float_prefix("+7"), Some(7.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
    }

    #[test]
    fn test_prefix_and_whitespace() {
        assert_eq!(parse_float_prefix("  42 apples"), Some(42.0));
        assert_eq!(parse_float_prefix("3.5kg"), Some(3.5));
        assert_eq!(parse_float_prefix("1.2.3"), Some(1.2));
    }

    #[test]
    fn test_leading_byte_order_mark() {
        assert_eq!(parse_float_prefix("\u{feff}42"), Some(42.0));
        assert_eq!(parse_float_prefix(" \u{feff}\u{a0}-1.5"), Some(-1.5));
        assert_eq!(parse_float_prefix("\u{feff}"), None);
    }

    #[test]
    fn test_exponent() {
        assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_float_prefix("2E-2"), Some(0.02));
        assert_eq!(parse_float_prefix("4e"), Some(4.0));
        assert_eq!(parse_float_prefix("4e+x"), Some(4.0));
    }

    #[test]
    fn test_infinity() {
        assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_float_prefix("-Infinity and beyond"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("inf"), None);
    }

    #[test]
    fn test_not_numbers() {
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("   "), None);
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("NaN"), None);
    }
}
