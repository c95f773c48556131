use super::Executor;
use super::coerce::{self, Sum};
use crate::error::ExecutionError;
use serde_json::Value;
use tracing::trace;

/// Minimum `age` a row needs to pass `filter_by_age`.
const MIN_AGE: f64 = 18.0;

/// Outcome of one table entry: `None` when the decoded input does not have the
/// shape the operation expects, so the next marker gets a chance.
type Outcome = Option<Result<Value, ExecutionError>>;

struct Behavior {
    marker: &'static str,
    apply: fn(&Value) -> Outcome,
}

/// Checked in order against the code text.
const BEHAVIORS: &[Behavior] = &[
    Behavior { marker: "filter_odd_numbers", apply: filter_even },
    Behavior { marker: "square_numbers", apply: square },
    Behavior { marker: "sum_numbers", apply: sum },
    Behavior { marker: "filter_positive_numbers", apply: filter_positive },
    Behavior { marker: "double_numbers", apply: double },
    Behavior { marker: "sort_numbers", apply: sort },
    Behavior { marker: "reverse_list", apply: reverse },
    Behavior { marker: "filter_by_age", apply: filter_by_age },
    Behavior { marker: "filter_by_column", apply: passthrough },
    Behavior { marker: "extract_column", apply: extract_column },
    Behavior { marker: "count_rows", apply: count },
];

/// Stands in for running generated code: recognises the snippet by its
/// function name and applies the equivalent transformation to the JSON input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simulator;

impl Simulator {
    pub fn new() -> Self {
        Self
    }

    /// Function names the simulator knows how to run.
    pub fn markers() -> impl Iterator<Item = &'static str> {
        BEHAVIORS.iter().map(|b| b.marker)
    }
}

impl Executor for Simulator {
    fn run(&self, code: &str, input: &str) -> Result<String, ExecutionError> {
        let value: Value =
            serde_json::from_str(input).map_err(|_| ExecutionError::InvalidInput)?;
        let value = coerce::normalize(value);

        for behavior in BEHAVIORS.iter().filter(|b| code.contains(b.marker)) {
            if let Some(outcome) = (behavior.apply)(&value) {
                trace!(marker = behavior.marker, "simulated");
                return outcome.map(|result| result.to_string());
            }
        }

        Ok(input.to_string())
    }
}

fn map_array(value: &Value, f: impl Fn(&Value) -> Value) -> Outcome {
    let items = value.as_array()?;
    Some(Ok(Value::Array(items.iter().map(f).collect())))
}

fn filter_array(value: &Value, keep: impl Fn(&Value) -> bool) -> Outcome {
    let items = value.as_array()?;
    Some(Ok(Value::Array(
        items.iter().filter(|x| keep(*x)).cloned().collect(),
    )))
}

fn filter_even(value: &Value) -> Outcome {
    filter_array(value, |x| coerce::to_number(x) % 2.0 == 0.0)
}

fn square(value: &Value) -> Outcome {
    map_array(value, |x| coerce::number(coerce::to_number(x).powi(2)))
}

fn sum(value: &Value) -> Outcome {
    let items = value.as_array()?;
    let total = items.iter().fold(Sum::Number(0.0), Sum::add);
    Some(Ok(total.into_value()))
}

fn filter_positive(value: &Value) -> Outcome {
    filter_array(value, |x| coerce::to_number(x) > 0.0)
}

fn double(value: &Value) -> Outcome {
    map_array(value, |x| coerce::number(coerce::to_number(x) * 2.0))
}

fn sort(value: &Value) -> Outcome {
    let mut items = value.as_array()?.clone();
    items.sort_by(|a, b| coerce::to_number(a).total_cmp(&coerce::to_number(b)));
    Some(Ok(Value::Array(items)))
}

fn reverse(value: &Value) -> Outcome {
    let items = value.as_array()?;
    Some(Ok(Value::Array(items.iter().rev().cloned().collect())))
}

fn passthrough(value: &Value) -> Outcome {
    value.as_array()?;
    Some(Ok(value.clone()))
}

fn count(value: &Value) -> Outcome {
    let items = value.as_array()?;
    Some(Ok(Value::from(items.len())))
}

/// Rows must be a non-empty array whose first element is object-like
/// (an object, an array, or `null`).
fn rows(value: &Value) -> Option<&Vec<Value>> {
    let items = value.as_array()?;
    match items.first()? {
        Value::Object(_) | Value::Array(_) | Value::Null => Some(items),
        _ => None,
    }
}

/// Reads `row[key]`; property access on a `null` row fails.
fn property<'a>(row: &'a Value, key: &str) -> Result<Option<&'a Value>, ExecutionError> {
    match row {
        Value::Null => Err(ExecutionError::InvalidInput),
        Value::Object(map) => Ok(map.get(key)),
        Value::Array(items) => Ok(key.parse::<usize>().ok().and_then(|i| items.get(i))),
        _ => Ok(None),
    }
}

fn filter_by_age(value: &Value) -> Outcome {
    let rows = rows(value)?;
    let mut kept = Vec::new();
    for row in rows {
        let age = match property(row, "age") {
            Ok(age) => age,
            Err(e) => return Some(Err(e)),
        };
        let age = age
            .filter(|a| coerce::is_truthy(a))
            .cloned()
            .unwrap_or_else(|| Value::from("0"));
        if coerce::parse_int(&age) >= MIN_AGE {
            kept.push(row.clone());
        }
    }
    Some(Ok(Value::Array(kept)))
}

/// Extracts the first column of the first row from every row.
fn extract_column(value: &Value) -> Outcome {
    let rows = rows(value)?;
    let key = match &rows[0] {
        Value::Object(map) => map.keys().next().cloned(),
        Value::Array(items) if !items.is_empty() => Some("0".to_string()),
        Value::Array(_) => None,
        _ => return Some(Err(ExecutionError::InvalidInput)),
    };

    let mut column = Vec::with_capacity(rows.len());
    for row in rows {
        let cell = match &key {
            Some(key) => match property(row, key) {
                Ok(cell) => cell.cloned(),
                Err(e) => return Some(Err(e)),
            },
            None if row.is_null() => return Some(Err(ExecutionError::InvalidInput)),
            None => None,
        };
        column.push(cell.unwrap_or(Value::Null));
    }
    Some(Ok(Value::Array(column)))
}
