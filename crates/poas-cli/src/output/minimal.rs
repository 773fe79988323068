use serde_json::Value;

use super::{scalar_text, status_label};

/// Key fields tried in order when printing a single answer.
const PRIORITY_KEYS: [&str; 6] = [
    "poas",
    "status",
    "max_ad_spend",
    "breakeven_roas",
    "breakeven_ad_spend",
    "cogs",
];

/// Print just the key answer value from the output.
///
/// Looks through the result envelope (and one level of nesting, for the
/// campaign analysis) for the priority fields, then falls back to the
/// first field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Some((key, found)) = find_priority(result_obj) {
        let text = scalar_text(found, "null");
        if key == "status" {
            println!("{}", status_label(&text));
        } else {
            println!("{}", text);
        }
        return;
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, scalar_text(val, "null"));
            return;
        }
    }

    println!("{}", scalar_text(result_obj, "null"));
}

fn find_priority(value: &Value) -> Option<(&'static str, &Value)> {
    let map = value.as_object()?;
    let nested = map.get("outputs").and_then(Value::as_object);
    PRIORITY_KEYS.iter().find_map(|key| {
        map.get(*key)
            .or_else(|| nested.and_then(|n| n.get(*key)))
            .filter(|v| !v.is_null())
            .map(|v| (*key, v))
    })
}
