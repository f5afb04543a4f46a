use std::fmt;
use std::ops::{Add, Sub};

use genval_pack::Packer;

use crate::constants::PRECISION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberType {
    Long,
    Double,
}

/// A numeric value: a 64-bit integer or a double.
///
/// Equality never mixes subtypes: `Long(1)` and `Double(1.0)` differ.
/// Doubles compare within [`PRECISION`], and NaN equals NaN.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Long(i64),
    Double(f64),
}

impl Number {
    /// The NaN double, produced by failed numeric parses.
    pub fn nan() -> Self {
        Number::Double(f64::NAN)
    }

    pub fn number_type(&self) -> NumberType {
        match self {
            Number::Long(_) => NumberType::Long,
            Number::Double(_) => NumberType::Double,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Number::Double(d) if d.is_nan())
    }

    /// Truncates doubles toward zero; NaN reads as 0.
    pub fn as_long(&self) -> i64 {
        match *self {
            Number::Long(l) => l,
            Number::Double(d) if d.is_nan() => 0,
            Number::Double(d) => d as i64,
        }
    }

    pub fn as_double(&self) -> f64 {
        match *self {
            Number::Long(l) => l as f64,
            Number::Double(d) => d,
        }
    }

    pub fn pack<P: Packer + ?Sized>(&self, p: &mut P) {
        match *self {
            Number::Long(l) => p.pack_long(l),
            Number::Double(d) => p.pack_double(d),
        }
    }

    /// Non-finite doubles have no JSON form and render `null`.
    pub fn print_json(&self, out: &mut String) {
        match *self {
            Number::Long(l) => out.push_str(&l.to_string()),
            Number::Double(d) if !d.is_finite() => out.push_str("null"),
            Number::Double(d) => out.push_str(&format_double(d)),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::Long(a), Number::Long(b)) => a == b,
            (Number::Double(a), Number::Double(b)) => {
                if a.is_nan() || b.is_nan() {
                    a.is_nan() && b.is_nan()
                } else {
                    a == b || (a - b).abs() < PRECISION
                }
            }
            _ => false,
        }
    }
}

/// The result takes the left operand's subtype. Long arithmetic wraps; a NaN
/// on either side of a double operation yields NaN.
impl Add for Number {
    type Output = Number;

    fn add(self, other: Number) -> Number {
        match self {
            Number::Long(l) => Number::Long(l.wrapping_add(other.as_long())),
            Number::Double(d) => {
                let right = other.as_double();
                if d.is_nan() || right.is_nan() {
                    Number::nan()
                } else {
                    Number::Double(d + right)
                }
            }
        }
    }
}

impl Sub for Number {
    type Output = Number;

    fn sub(self, other: Number) -> Number {
        match self {
            Number::Long(l) => Number::Long(l.wrapping_sub(other.as_long())),
            Number::Double(d) => {
                let right = other.as_double();
                if d.is_nan() || right.is_nan() {
                    Number::nan()
                } else {
                    Number::Double(d - right)
                }
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Number::Long(l) => write!(f, "{l}"),
            Number::Double(d) => f.write_str(&format_double(d)),
        }
    }
}

impl From<i64> for Number {
    fn from(val: i64) -> Self {
        Number::Long(val)
    }
}

impl From<i32> for Number {
    fn from(val: i32) -> Self {
        Number::Long(val as i64)
    }
}

impl From<f64> for Number {
    fn from(val: f64) -> Self {
        Number::Double(val)
    }
}

/// Formats a double with the fewest digits that round-trip, switching to
/// exponent form (`1.5e+08`, `1e-05`) when the decimal exponent is below -4
/// or at least 6.
pub fn format_double(val: f64) -> String {
    if val.is_nan() {
        return "NaN".to_string();
    }
    if val.is_infinite() {
        let inf = if val > 0.0 { "+Inf" } else { "-Inf" };
        return inf.to_string();
    }
    let sci = format!("{val:e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if (-4..6).contains(&exp) {
        return format!("{val}");
    }
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_double() {
        assert_eq!(format_double(0.0), "0");
        assert_eq!(format_double(1.0), "1");
        assert_eq!(format_double(-12.34), "-12.34");
        assert_eq!(format_double(123.45), "123.45");
        assert_eq!(format_double(123456.0), "123456");
        assert_eq!(format_double(1000000.0), "1e+06");
        assert_eq!(format_double(123456789.0), "1.23456789e+08");
        assert_eq!(format_double(0.0001), "0.0001");
        assert_eq!(format_double(0.00001), "1e-05");
        assert_eq!(format_double(-2.5e-10), "-2.5e-10");
        assert_eq!(format_double(1e300), "1e+300");
        assert_eq!(format_double(f64::NAN), "NaN");
        assert_eq!(format_double(f64::NEG_INFINITY), "-Inf");
    }

    #[test]
    fn test_equality() {
        assert_eq!(Number::Long(5), Number::Long(5));
        assert_ne!(Number::Long(1), Number::Double(1.0));
        assert_eq!(Number::Double(1.0), Number::Double(1.000001));
        assert_ne!(Number::Double(1.0), Number::Double(1.0001));
        assert_eq!(Number::nan(), Number::nan());
        assert_ne!(Number::nan(), Number::Double(0.0));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(Number::Long(5) + Number::Double(2.9), Number::Long(7));
        assert_eq!(Number::Double(0.5) + Number::Long(2), Number::Double(2.5));
        assert_eq!(Number::Long(5) - Number::Long(7), Number::Long(-2));
        assert!((Number::nan() - Number::Double(1.0)).is_nan());
        assert!((Number::Double(1.0) + Number::nan()).is_nan());
        assert_eq!(Number::Long(1) + Number::nan(), Number::Long(1));
        assert_eq!(Number::Long(i64::MAX) + Number::Long(1), Number::Long(i64::MIN));
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Number::nan().as_long(), 0);
        assert_eq!(Number::Double(-3.7).as_long(), -3);
        assert_eq!(Number::Long(3).as_double(), 3.0);
        assert_eq!(Number::Long(3).number_type(), NumberType::Long);
        let mut out = String::new();
        Number::Double(f64::INFINITY).print_json(&mut out);
        assert_eq!(out, "null");
    }
}
