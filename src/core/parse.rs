//! Permissive value parsers.
//!
//! Console input never fails to parse: malformed text degrades to the zero
//! value of the target type instead of rejecting the line. A deliberate `0`
//! and garbage are indistinguishable to the caller.

use super::tokenizer::DEFAULT_DELIMITERS;

/// Parse a boolean.
///
/// `true`/`false` in any case, otherwise the integer value of the text is
/// tested against zero (`"1"`, `"42"` and `"-3"` are all true).
pub fn parse_bool(text: &str) -> bool {
    if text.eq_ignore_ascii_case("true") {
        true
    } else if text.eq_ignore_ascii_case("false") {
        false
    } else {
        parse_int(text) != 0
    }
}

/// Parse a leading decimal integer, `atoi` style.
///
/// Leading delimiters are skipped and parsing stops at the first non-digit.
/// Values outside the `i32` range saturate.
pub fn parse_int(text: &str) -> i32 {
    let bytes = text.trim_start_matches(DEFAULT_DELIMITERS).as_bytes();
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, bytes),
    };

    let limit = i64::from(i32::MAX) + 1;
    let mut value: i64 = 0;
    for &b in digits.iter().take_while(|b| b.is_ascii_digit()) {
        value = (value * 10 + i64::from(b - b'0')).min(limit);
    }
    let value = if negative { -value } else { value };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Parse a leading floating point number, `atof` style.
///
/// Accepts an optional sign, decimal digits with an optional fraction and
/// exponent, or `inf`/`infinity`/`nan`. Anything else yields `0.0`.
pub fn parse_float(text: &str) -> f32 {
    let text = text.trim_start_matches(DEFAULT_DELIMITERS);
    let len = float_prefix_len(text.as_bytes());
    text[..len].parse::<f64>().map_or(0.0, |value| value as f32)
}

/// Length of the longest prefix of `bytes` that reads as a float.
fn float_prefix_len(bytes: &[u8]) -> usize {
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let rest = &bytes[i..];
    for word in ["infinity", "inf", "nan"] {
        if rest.len() >= word.len() && rest[..word.len()].eq_ignore_ascii_case(word.as_bytes()) {
            return i + word.len();
        }
    }

    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let int_digits = digits(i);
    i += int_digits;
    let mut frac_digits = 0;
    if bytes.get(i) == Some(&b'.') {
        frac_digits = digits(i + 1);
        if int_digits + frac_digits > 0 {
            i += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return 0;
    }

    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_digits = digits(j);
        if exp_digits > 0 {
            i = j + exp_digits;
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_words() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(!parse_bool("False"));
    }

    #[test]
    fn test_parse_bool_numbers() {
        assert!(parse_bool("1"));
        assert!(parse_bool("42"));
        assert!(parse_bool("-3"));
        assert!(!parse_bool("0"));
    }

    #[test]
    fn test_parse_bool_garbage_is_false() {
        assert!(!parse_bool("yes"));
        assert!(!parse_bool(""));
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("42"), 42);
        assert_eq!(parse_int("  -17"), -17);
        assert_eq!(parse_int("+8"), 8);
        assert_eq!(parse_int("12abc"), 12);
        assert_eq!(parse_int("3.9"), 3);
    }

    #[test]
    fn test_parse_int_garbage_is_zero() {
        assert_eq!(parse_int("abc"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_int("-"), 0);
    }

    #[test]
    fn test_parse_int_saturates() {
        assert_eq!(parse_int("99999999999"), i32::MAX);
        assert_eq!(parse_int("-99999999999"), i32::MIN);
        assert_eq!(parse_int("-2147483648"), i32::MIN);
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float("3.5"), 3.5);
        assert_eq!(parse_float("\t-0.25"), -0.25);
        assert_eq!(parse_float("2"), 2.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("1e3"), 1000.0);
        assert_eq!(parse_float("1.25e-1x"), 0.125);
    }

    #[test]
    fn test_parse_float_partial_exponent() {
        assert_eq!(parse_float("2e"), 2.0);
        assert_eq!(parse_float("2e+"), 2.0);
    }

    #[test]
    fn test_parse_float_special() {
        assert!(parse_float("inf").is_infinite());
        assert!(parse_float("-Infinity").is_sign_negative());
        assert!(parse_float("NaN").is_nan());
    }

    #[test]
    fn test_parse_float_garbage_is_zero() {
        assert_eq!(parse_float("abc"), 0.0);
        assert_eq!(parse_float("."), 0.0);
        assert_eq!(parse_float("-"), 0.0);
        assert_eq!(parse_float(""), 0.0);
    }
}
