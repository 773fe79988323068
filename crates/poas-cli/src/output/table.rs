use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{ratio_text, scalar_text, status_label};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_object(map);
                print_status(map);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    if let Value::Object(res_map) = result {
        print_object(res_map);
        print_status(res_map);
    } else {
        print_object(envelope);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Coloured tier line under the table. Cells stay plain so tabled
/// measures column widths correctly.
fn print_status(map: &Map<String, Value>) {
    if let Some(tier) = map.get("status").and_then(Value::as_str) {
        println!("\nStatus: {}", status_label(tier));
    }
}

/// One Field/Value table, with nested records flattened to dotted keys.
/// Arrays of records (sweep points) follow as their own tables.
fn print_object(map: &Map<String, Value>) {
    let mut rows = Vec::new();
    let mut sub_tables = Vec::new();
    flatten("", map, &mut rows, &mut sub_tables);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in rows {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));

    for (key, arr) in sub_tables {
        println!("\n{}:", key);
        print_array_table(arr);
    }
}

fn flatten<'a>(
    prefix: &str,
    map: &'a Map<String, Value>,
    rows: &mut Vec<(String, String)>,
    sub_tables: &mut Vec<(String, &'a [Value])>,
) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) if ratio_text(val).is_none() => {
                flatten(&name, inner, rows, sub_tables)
            }
            Value::Array(arr) if arr.first().is_some_and(Value::is_object) => {
                sub_tables.push((name, arr.as_slice()))
            }
            _ => rows.push((name, scalar_text(val, "-"))),
        }
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| {
                        map.get(h.as_str())
                            .map(|v| scalar_text(v, "-"))
                            .unwrap_or_default()
                    })
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", scalar_text(item, "-"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flatten_nested_analysis() {
        let v = json!({
            "outputs": {"poas": {"kind": "finite", "value": "1.75"}, "net_profit": null},
            "status": "good",
            "points": [{"ad_spend": "1000"}]
        });
        let map = v.as_object().unwrap();
        let mut rows = Vec::new();
        let mut subs = Vec::new();
        flatten("", map, &mut rows, &mut subs);

        assert!(rows.contains(&("outputs.poas".to_string(), "1.75".to_string())));
        assert!(rows.contains(&("outputs.net_profit".to_string(), "-".to_string())));
        assert!(rows.contains(&("status".to_string(), "good".to_string())));
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].0, "points");
    }
}
