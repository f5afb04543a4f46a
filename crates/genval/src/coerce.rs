//! Soft coercion used by the typed getters when the stored kind differs from
//! the requested one. Each parser reads the value's display string.

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;

use crate::constants::BASE64_PREFIX;
use crate::number::Number;
use crate::string::Str;

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`; anything
/// else is false.
pub fn parse_bool(s: &str) -> bool {
    matches!(s, "1" | "t" | "T" | "TRUE" | "true" | "True")
}

/// Empty input is `Long(0)`. Integers parse as Long, other numerals as
/// Double, and anything unparseable is NaN.
pub fn parse_number(s: &str) -> Number {
    if s.is_empty() {
        return Number::Long(0);
    }
    if let Ok(l) = s.parse::<i64>() {
        return Number::Long(l);
    }
    match s.parse::<f64>() {
        Ok(d) => Number::Double(d),
        Err(_) => Number::nan(),
    }
}

/// A `base64,` prefixed string with a valid payload decodes to raw bytes;
/// everything else stays text.
pub fn parse_string(s: &str) -> Str {
    if let Some(encoded) = s.strip_prefix(BASE64_PREFIX) {
        if let Ok(raw) = STANDARD_NO_PAD.decode(encoded) {
            return Str::Raw(raw);
        }
    }
    Str::Utf8(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        for s in ["1", "t", "T", "TRUE", "true", "True"] {
            assert!(parse_bool(s), "{s}");
        }
        for s in ["0", "f", "false", "yes", "", "tRUE"] {
            assert!(!parse_bool(s), "{s}");
        }
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(""), Number::Long(0));
        assert_eq!(parse_number("-42"), Number::Long(-42));
        assert_eq!(parse_number("1.5"), Number::Double(1.5));
        assert_eq!(parse_number("1e3"), Number::Double(1000.0));
        assert!(parse_number("abc").is_nan());
        assert!(parse_number("true").is_nan());
    }

    #[test]
    fn test_parse_string() {
        assert_eq!(parse_string("base64,AAEC"), Str::Raw(vec![0, 1, 2]));
        assert_eq!(parse_string("base64,!!"), Str::from("base64,!!"));
        assert_eq!(parse_string("plain"), Str::from("plain"));
    }
}
