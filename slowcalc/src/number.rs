//! Operands, operators and result formatting

use crate::engine::CalcError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Operator::Add, Operator::Subtract, Operator::Multiply, Operator::Divide];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == c)
    }

    /// Apply `lhs op rhs`.
    ///
    /// Integer add/subtract/multiply are exact and fall back to floating
    /// point on overflow. Division is always true division.
    pub fn apply(self, lhs: Number, rhs: Number) -> Result<Number, CalcError> {
        use Number::{Float, Int};

        let exact = match (self, lhs, rhs) {
            (Operator::Add, Int(a), Int(b)) => a.checked_add(b),
            (Operator::Subtract, Int(a), Int(b)) => a.checked_sub(b),
            (Operator::Multiply, Int(a), Int(b)) => a.checked_mul(b),
            _ => None,
        };
        if let Some(value) = exact {
            return Ok(Int(value));
        }

        let (a, b) = (lhs.as_f64(), rhs.as_f64());
        Ok(Float(match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => {
                if rhs.is_zero() {
                    return Err(if lhs.is_zero() {
                        CalcError::UndefinedResult
                    } else {
                        CalcError::DivisionByZero
                    });
                }
                a / b
            }
        }))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A parsed operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Parse display text into an operand.
    ///
    /// Leading and trailing points are ignored, so `"5."` is the integer 5.
    /// Text with a point or an exponent is floating point; plain digits are
    /// an integer unless they overflow `i64`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim_matches('.');
        if text.is_empty() {
            return None;
        }
        if !text.contains(['.', 'e', 'E']) {
            if let Ok(value) = text.parse::<i64>() {
                return Some(Number::Int(value));
            }
        }
        text.parse::<f64>().ok().map(Number::Float)
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(v) => v as f64,
            Number::Float(v) => v,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(v) => v == 0,
            Number::Float(v) => v == 0.0,
        }
    }

    pub fn is_finite(self) -> bool {
        match self {
            Number::Int(_) => true,
            Number::Float(v) => v.is_finite(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(v) => write!(f, "{v}"),
            Number::Float(v) => f.write_str(&format_float(*v)),
        }
    }
}

/// Shortest round-trip text for `value`.
///
/// Fixed notation for decimal exponents in `[-4, 16)`, scientific
/// (`1.5e+16`, `2e-05`) otherwise. Integral values keep a `.0` suffix.
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    // `{:e}` yields the shortest round-trip digits as `d.ddde<exp>`
    let sci = format!("{value:e}");
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let fixed = format!("{value}");
        if fixed.contains('.') {
            fixed
        } else {
            fixed + ".0"
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exponent.abs())
    }
}

/// Normalise numeric text through floating point and drop a redundant
/// `.0` suffix: `"5."` → `"5"`, `"2.50"` → `"2.5"`, `"8"` → `"8"`.
///
/// Text that is not a number is returned unchanged.
pub fn remove_trailing_zeros(num: &str) -> String {
    let Ok(value) = num.parse::<f64>() else {
        return num.to_string();
    };
    let text = format_float(value);
    match text.strip_suffix(".0") {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

/// Display text for a computed result.
pub fn format_result(value: Number) -> String {
    remove_trailing_zeros(&value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_and_float() {
        assert_eq!(Number::parse("42"), Some(Number::Int(42)));
        assert_eq!(Number::parse("-7"), Some(Number::Int(-7)));
        assert_eq!(Number::parse("2.5"), Some(Number::Float(2.5)));
        assert_eq!(Number::parse("1e+16"), Some(Number::Float(1e16)));
    }

    #[test]
    fn test_parse_ignores_dangling_point() {
        assert_eq!(Number::parse("5."), Some(Number::Int(5)));
        assert_eq!(Number::parse("-0."), Some(Number::Int(0)));
    }

    #[test]
    fn test_parse_huge_integer_becomes_float() {
        assert_eq!(Number::parse("99999999999999999999"), Some(Number::Float(1e20)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Number::parse(""), None);
        assert_eq!(Number::parse("1e+"), None);
        assert_eq!(Number::parse("Division by zero"), None);
    }

    #[test]
    fn test_integer_arithmetic_is_exact() {
        let r = Operator::Multiply.apply(Number::Int(123_456_789), Number::Int(1000)).unwrap();
        assert_eq!(r, Number::Int(123_456_789_000));
        let r = Operator::Subtract.apply(Number::Int(3), Number::Int(5)).unwrap();
        assert_eq!(r, Number::Int(-2));
    }

    #[test]
    fn test_integer_overflow_falls_back_to_float() {
        let r = Operator::Add.apply(Number::Int(i64::MAX), Number::Int(1)).unwrap();
        assert!(matches!(r, Number::Float(_)));
    }

    #[test]
    fn test_division_is_true_division() {
        let r = Operator::Divide.apply(Number::Int(7), Number::Int(2)).unwrap();
        assert_eq!(r, Number::Float(3.5));
        let r = Operator::Divide.apply(Number::Int(6), Number::Int(3)).unwrap();
        assert_eq!(format_result(r), "2");
    }

    #[test]
    fn test_division_by_zero_errors() {
        assert_eq!(
            Operator::Divide.apply(Number::Int(7), Number::Int(0)),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            Operator::Divide.apply(Number::Float(-0.5), Number::Float(0.0)),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(
            Operator::Divide.apply(Number::Int(0), Number::Int(0)),
            Err(CalcError::UndefinedResult)
        );
        assert_eq!(
            Operator::Divide.apply(Number::Float(0.0), Number::Int(0)),
            Err(CalcError::UndefinedResult)
        );
    }

    #[test]
    fn test_format_float_fixed_range() {
        assert_eq!(format_float(8.0), "8.0");
        assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(1e15), "1000000000000000.0");
        assert_eq!(format_float(-2.5), "-2.5");
    }

    #[test]
    fn test_format_float_scientific_range() {
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1.5e17), "1.5e+17");
        assert_eq!(format_float(0.00001), "1e-05");
        assert_eq!(format_float(-2.5e-7), "-2.5e-07");
        assert_eq!(format_float(1e300), "1e+300");
    }

    #[test]
    fn test_format_float_special_values() {
        assert_eq!(format_float(f64::INFINITY), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_float(f64::NAN), "nan");
        assert_eq!(format_float(-0.0), "-0.0");
    }

    #[test]
    fn test_remove_trailing_zeros() {
        assert_eq!(remove_trailing_zeros("8"), "8");
        assert_eq!(remove_trailing_zeros("5."), "5");
        assert_eq!(remove_trailing_zeros("2.50"), "2.5");
        assert_eq!(remove_trailing_zeros("-3.0"), "-3");
        assert_eq!(remove_trailing_zeros("0.5"), "0.5");
        assert_eq!(remove_trailing_zeros("100000000000000000"), "1e+17");
    }

    #[test]
    fn test_remove_trailing_zeros_is_idempotent() {
        for input in ["8", "5.", "2.50", "-3.0", "0.1", "1e+16", "123456.789", "-0", "0.00001", "inf", "oops"] {
            let once = remove_trailing_zeros(input);
            assert_eq!(remove_trailing_zeros(&once), once, "input {input}");
        }
    }

    #[test]
    fn test_operator_symbols() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_symbol('='), None);
        assert_eq!(Operator::Multiply.to_string(), "*");
    }
}
