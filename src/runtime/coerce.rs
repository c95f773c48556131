//! Loose value semantics for the simulated list operations.
//!
//! Test inputs are authored in a browser, so arithmetic and comparisons over
//! decoded JSON follow browser coercion rules (`"4" % 2 == 0`, `0 + "a" ==
//! "0a"`) and numbers serialize the way `JSON.stringify` prints them.

use itertools::Itertools;
use serde_json::{Map, Number, Value};

/// Converts a float into a JSON number, printing integral values without a
/// fractional part. Non-finite values become `null`.
pub fn number(n: f64) -> Value {
    if !n.is_finite() {
        return Value::Null;
    }
    if n.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(&n) {
        return Value::from(n as i64);
    }
    Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
}

/// Rewrites integral floats (`1.0`, `1e2`) as integers throughout a decoded
/// value and puts object keys in browser property order.
pub fn normalize(value: Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => n.as_f64().map(number).unwrap_or(Value::Null),
        Value::Array(items) => Value::Array(items.into_iter().map(normalize).collect()),
        Value::Object(map) => Value::Object(
            order_keys(map)
                .map(|(k, v)| (k, normalize(v)))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

/// Array-index keys first in ascending numeric order, then the rest in
/// insertion order.
fn order_keys(map: Map<String, Value>) -> impl Iterator<Item = (String, Value)> {
    let (indexed, named): (Vec<_>, Vec<_>) = map
        .into_iter()
        .partition(|(k, _)| array_index(k).is_some());
    indexed
        .into_iter()
        .sorted_by_key(|(k, _)| array_index(k))
        .chain(named)
}

/// Canonical array index: decimal digits without a leading zero, below `2^32 - 1`.
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|&n| n != u32::MAX)
}

/// Numeric value of `value` under browser `Number(...)` rules.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => string_to_number(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [single] => string_to_number(&to_js_string(single)),
            _ => f64::NAN,
        },
        Value::Object(_) => f64::NAN,
    }
}

fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        if let Some(digits) = s
            .strip_prefix(prefix)
            .or_else(|| s.strip_prefix(&prefix.to_uppercase()))
        {
            if digits.starts_with(['+', '-']) {
                return f64::NAN;
            }
            return u64::from_str_radix(digits, radix)
                .map(|v| v as f64)
                .unwrap_or(f64::NAN);
        }
    }
    // Rust accepts "inf"/"nan" spellings that the browser does not.
    if s.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

/// String form of `value` under browser `String(...)` rules.
pub fn to_js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i128)
    } else {
        format!("{}", n)
    }
}

/// Browser truthiness.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// `parseInt` over the string form of `value`: a leading, optionally signed
/// run of digits; `NaN` when there is none.
pub fn parse_int(value: &Value) -> f64 {
    let text = to_js_string(value);
    let s = text.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let run: String = digits.chars().take_while(|c| c.is_digit(radix)).collect();
    if run.is_empty() {
        return f64::NAN;
    }
    let magnitude = run
        .chars()
        .filter_map(|c| c.to_digit(radix))
        .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d));
    sign * magnitude
}

/// Accumulator for a `+` fold: stays numeric until a string operand appears.
#[derive(Debug, Clone)]
pub enum Sum {
    Number(f64),
    Text(String),
}

impl Sum {
    pub fn add(self, operand: &Value) -> Sum {
        let concatenates = matches!(
            operand,
            Value::String(_) | Value::Array(_) | Value::Object(_)
        );
        match self {
            Sum::Text(mut text) => {
                text.push_str(&to_js_string(operand));
                Sum::Text(text)
            }
            Sum::Number(n) if concatenates => {
                Sum::Text(format!("{}{}", number_to_string(n), to_js_string(operand)))
            }
            Sum::Number(n) => Sum::Number(n + to_number(operand)),
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            Sum::Number(n) => number(n),
            Sum::Text(text) => Value::String(text),
        }
    }
}
