//! Lexical coercion of XML text into JSON scalars.
//!
//! Text that spells a boolean or a JSON-style number becomes that type;
//! everything else stays a string. The number grammar is the one JSON
//! itself uses, so `007`, `+1`, `.5`, `1.` and `NaN` all stay strings.

use serde_json::{Number, Value};

/// Coerce `text` into the most specific JSON scalar it spells.
pub fn coerce(text: &str) -> Value {
    if text.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    match parse_number(text) {
        Some(number) => Value::Number(number),
        None => Value::String(text.to_string()),
    }
}

/// Parse `text` as a JSON number, if it is one.
///
/// Integers outside the 64-bit range and fractions that overflow `f64`
/// return `None` so the caller keeps the exact digits as a string.
pub fn parse_number(text: &str) -> Option<Number> {
    let shape = scan_number(text)?;

    if shape == NumberShape::Integer {
        // Integers have no negative zero; keep the sign as a float.
        if text == "-0" {
            return Number::from_f64(-0.0);
        }
        if let Ok(n) = text.parse::<i64>() {
            return Some(Number::from(n));
        }
        if let Ok(n) = text.parse::<u64>() {
            return Some(Number::from(n));
        }
        return None;
    }

    text.parse::<f64>().ok().and_then(Number::from_f64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberShape {
    Integer,
    Decimal,
}

/// Match `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
fn scan_number(text: &str) -> Option<NumberShape> {
    let bytes = text.as_bytes();
    let mut pos = 0;
    let mut shape = NumberShape::Integer;

    if bytes.first() == Some(&b'-') {
        pos += 1;
    }

    match bytes.get(pos) {
        Some(b'0') => pos += 1,
        Some(b'1'..=b'9') => pos += count_digits(&bytes[pos..]),
        _ => return None,
    }

    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        let digits = count_digits(bytes.get(pos..).unwrap_or_default());
        if digits == 0 {
            return None;
        }
        pos += digits;
        shape = NumberShape::Decimal;
    }

    if matches!(bytes.get(pos), Some(b'e' | b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+' | b'-')) {
            pos += 1;
        }
        let digits = count_digits(bytes.get(pos..).unwrap_or_default());
        if digits == 0 {
            return None;
        }
        pos += digits;
        shape = NumberShape::Decimal;
    }

    (pos == bytes.len()).then_some(shape)
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_booleans_any_case() {
        assert_eq!(coerce("true"), json!(true));
        assert_eq!(coerce("FALSE"), json!(false));
        assert_eq!(coerce("True"), json!(true));
        assert_eq!(coerce("yes"), json!("yes"));
    }

    #[test]
    fn test_integers() {
        assert_eq!(coerce("0"), json!(0));
        assert_eq!(coerce("123"), json!(123));
        assert_eq!(coerce("-42"), json!(-42));
        assert_eq!(coerce("18446744073709551615"), json!(u64::MAX));
    }

    #[test]
    fn test_decimals_and_exponents() {
        assert_eq!(coerce("3.25"), json!(3.25));
        assert_eq!(coerce("-0.5"), json!(-0.5));
        assert_eq!(coerce("1e3"), json!(1000.0));
        assert_eq!(coerce("2.5E-1"), json!(0.25));
    }

    #[test]
    fn test_non_numbers_stay_strings() {
        for text in [
            "007", "+1", ".5", "1.", "1e", "1e+", "--1", "-", "NaN", "Infinity", "0x1F", " 1",
            "1 ", "1,000", "12abc", "",
        ] {
            assert_eq!(coerce(text), json!(text), "input {:?}", text);
        }
    }

    #[test]
    fn test_huge_values_keep_their_digits() {
        let big = "123456789012345678901234567890";
        assert_eq!(coerce(big), json!(big));
        assert_eq!(coerce("1e400"), json!("1e400"));
    }

    #[test]
    fn test_negative_zero_keeps_its_sign() {
        let value = coerce("-0");
        let number = value.as_f64().unwrap();
        assert_eq!(number, 0.0);
        assert!(number.is_sign_negative());
        assert_eq!(value.to_string(), "-0.0");
        assert_eq!(coerce("0"), json!(0));
    }

    #[test]
    fn test_null_is_not_coerced() {
        assert_eq!(coerce("null"), json!("null"));
    }
}
