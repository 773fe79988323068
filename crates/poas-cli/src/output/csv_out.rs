use serde_json::Value;
use std::io;

use super::scalar_text;

/// Write output as CSV to stdout.
///
/// Sweep output becomes one row per point; anything else becomes a
/// two-column field/value listing of the result.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            if let Some(Value::Array(points)) = map.get("points") {
                write_array_csv(&mut wtr, points);
            } else {
                let _ = wtr.write_record(["field", "value"]);
                write_fields(&mut wtr, "", map);
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([scalar_text(result, "")]);
        }
    }

    let _ = wtr.flush();
}

fn write_fields<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    prefix: &str,
    map: &serde_json::Map<String, Value>,
) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) if super::ratio_text(val).is_none() => {
                write_fields(wtr, &name, inner)
            }
            _ => {
                let _ = wtr.write_record([name, scalar_text(val, "")]);
            }
        }
    }
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(|v| scalar_text(v, "")).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([scalar_text(item, "")]);
        }
    }
}
