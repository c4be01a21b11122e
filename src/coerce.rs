use serde_json::Value;

/// Finite number carried by a JSON value, if any.
///
/// Numbers pass through; strings are trimmed and parsed as plain decimals.
/// Null, booleans, arrays and objects are never numbers.
pub fn to_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Text form of a join key: trimmed strings, numbers as written with whole
/// floats losing their fraction (`7.0` -> `"7"`). Other values have no key.
pub fn to_key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
                Some(format!("{}", f as i64))
            }
            _ => Some(n.to_string()),
        },
        _ => None,
    }
}

pub fn to_number_or_default(value: Option<&Value>, fallback: f64) -> f64 {
    value.and_then(to_number).unwrap_or(fallback)
}

pub fn to_display_fixed(value: Option<&Value>, decimals: usize) -> String {
    match value.and_then(to_number) {
        Some(n) => fixed(n, decimals),
        None => "N/A".to_string(),
    }
}

pub fn to_display_int(value: Option<&Value>) -> String {
    match value.and_then(to_number) {
        Some(n) => fixed(n.round(), 0),
        None => "N/A".to_string(),
    }
}

pub fn fixed(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let out = format!("{value:.decimals$}");
    // Avoid "-0.0" for values that round to zero.
    if out.starts_with('-') && out[1..].chars().all(|c| c == '0' || c == '.') {
        out[1..].to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        fixed, to_display_fixed, to_display_int, to_key_text, to_number, to_number_or_default,
    };

    #[test]
    fn numbers_and_numeric_strings_coerce() {
        assert_eq!(to_number(&json!(3)), Some(3.0));
        assert_eq!(to_number(&json!(2.5)), Some(2.5));
        assert_eq!(to_number(&json!(" 7.25 ")), Some(7.25));
        assert_eq!(to_number(&json!("-1")), Some(-1.0));
    }

    #[test]
    fn non_numbers_fall_back() {
        assert_eq!(to_number(&json!(null)), None);
        assert_eq!(to_number(&json!("")), None);
        assert_eq!(to_number(&json!("abc")), None);
        assert_eq!(to_number(&json!("NaN")), None);
        assert_eq!(to_number(&json!("inf")), None);
        assert_eq!(to_number(&json!(true)), None);
        assert_eq!(to_number(&json!([1])), None);
        assert_eq!(to_number_or_default(None, 4.0), 4.0);
        assert_eq!(to_number_or_default(Some(&json!("x")), 0.0), 0.0);
    }

    #[test]
    fn display_uses_plain_decimal_point() {
        assert_eq!(to_display_fixed(Some(&json!(1.26)), 1), "1.3");
        assert_eq!(to_display_fixed(Some(&json!("12")), 2), "12.00");
        assert_eq!(to_display_fixed(Some(&json!(null)), 1), "N/A");
        assert_eq!(to_display_fixed(None, 1), "N/A");
        assert_eq!(to_display_int(Some(&json!(2.5))), "3");
        assert_eq!(to_display_int(Some(&json!("41.4"))), "41");
        assert_eq!(to_display_int(Some(&json!("n/a"))), "N/A");
    }

    #[test]
    fn negative_zero_is_printed_as_zero() {
        assert_eq!(fixed(-0.01, 1), "0.0");
        assert_eq!(fixed(-0.4, 0), "0");
        assert_eq!(fixed(-1.26, 1), "-1.3");
    }

    #[test]
    fn key_text_drops_whole_float_fraction() {
        assert_eq!(to_key_text(&json!(7.0)).as_deref(), Some("7"));
        assert_eq!(to_key_text(&json!(-12)).as_deref(), Some("-12"));
        assert_eq!(to_key_text(&json!(7.5)).as_deref(), Some("7.5"));
        assert_eq!(to_key_text(&json!("  k7 ")).as_deref(), Some("k7"));
        assert_eq!(to_key_text(&json!(null)), None);
        assert_eq!(to_key_text(&json!(true)), None);
    }
}
