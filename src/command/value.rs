//! Parameter values
//!
//! Every parameter token is classified independently: integer first,
//! then float, otherwise the original text is kept.

use std::fmt;

/// A coerced command parameter
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Token parsed as a signed integer
    Integer(i64),
    /// Token parsed as a floating point number
    Float(f64),
    /// Token kept verbatim
    Text(String),
}

impl Value {
    /// Coerce a raw token. The first successful parse wins.
    pub fn coerce(token: &str) -> Self {
        if let Ok(i) = token.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(f) = token.parse::<f64>() {
            return Value::Float(f);
        }
        Value::Text(token.to_string())
    }

    /// Returns true if this is the text token `literal`
    pub fn is_text(&self, literal: &str) -> bool {
        matches!(self, Value::Text(t) if t == literal)
    }

    /// Returns the text content, if this value was not coerced to a number
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(t) => Some(t),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => f.write_str(&format_float(*v)),
            Value::Text(t) => f.write_str(t),
        }
    }
}

/// Render a float the way a scripting language's `str()` would: `nan`,
/// `inf`, `2.0`, `0.0001`, `1e+16`, `1.5e-05`.
///
/// Whole values keep their decimal point so `2.0` does not read back as
/// an integer. Exponent form is used below `1e-4` and from `1e16` up.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".into();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.into();
    }

    let scientific = format!("{:e}", v);
    let parts = scientific
        .split_once('e')
        .and_then(|(mantissa, exp)| exp.parse::<i32>().ok().map(|exp| (mantissa, exp)));
    if let Some((mantissa, exp)) = parts {
        if !(-4..16).contains(&exp) {
            let sign = if exp < 0 { '-' } else { '+' };
            return format!("{}e{}{:02}", mantissa, sign, exp.unsigned_abs());
        }
    }

    let plain = v.to_string();
    if plain.contains('.') {
        plain
    } else {
        plain + ".0"
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::coerce(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_wins_over_float() {
        assert_eq!(Value::coerce("42"), Value::Integer(42));
        assert_eq!(Value::coerce("-7"), Value::Integer(-7));
    }

    #[test]
    fn test_float_coercion() {
        assert_eq!(Value::coerce("2.5"), Value::Float(2.5));
        assert_eq!(Value::coerce("1e3"), Value::Float(1000.0));
    }

    #[test]
    fn test_text_fallback() {
        assert_eq!(Value::coerce("a.sql"), Value::Text("a.sql".into()));
        assert_eq!(Value::coerce(""), Value::Text(String::new()));
        assert_eq!(Value::coerce("?"), Value::Text("?".into()));
    }

    #[test]
    fn test_integer_out_of_range_becomes_float() {
        assert!(matches!(
            Value::coerce("99999999999999999999"),
            Value::Float(_)
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Integer(3).to_string(), "3");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Text("foo".into()).to_string(), "foo");
    }

    #[test]
    fn test_float_special_values() {
        assert_eq!(Value::coerce("nan").to_string(), "nan");
        assert_eq!(Value::coerce("inf").to_string(), "inf");
        assert_eq!(Value::coerce("-inf").to_string(), "-inf");
    }

    #[test]
    fn test_float_exponent_form() {
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1.5e-5), "1.5e-05");
        assert_eq!(format_float(-2.5e100), "-2.5e+100");
        assert_eq!(format_float(1e15), "1000000000000000.0");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(-0.0), "-0.0");
    }

    #[test]
    fn test_is_text() {
        assert!(Value::coerce("?").is_text("?"));
        assert!(!Value::coerce("1").is_text("1"));
    }
}
