use calamine::Data;
use chrono::NaiveDateTime;
use serde_json::{Number, Value};

/// Largest float that still converts to an integer without losing precision.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Raw value of one cell as JSON. Formatting is ignored.
pub(crate) fn cell_to_json(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::Int(i) => Value::from(*i),
        Data::Float(f) => float_to_json(*f),
        Data::String(s) => Value::String(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) if dt.is_datetime() => Value::String(format_datetime(naive)),
            // Durations and out-of-range serials keep their numeric value.
            _ => float_to_json(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(e) => Value::String(e.to_string()),
    }
}

/// Spreadsheets store every number as a float; whole values become integers.
fn float_to_json(f: f64) -> Value {
    if f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER {
        Value::from(f as i64)
    } else {
        Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
    }
}

fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}
