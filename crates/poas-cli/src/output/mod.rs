pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use colored::{Color, Colorize};
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Serialized `Ratio` (`{"kind": ..., "value": ...}`) as display text.
pub fn ratio_text(value: &Value) -> Option<String> {
    let map = value.as_object()?;
    match map.get("kind")?.as_str()? {
        "infinite" => Some("∞".to_string()),
        "finite" => map.get("value").map(|v| scalar_text(v, "")),
        _ => None,
    }
}

/// Render a JSON value as a single cell. `null_text` is what an absent
/// value prints as, since formats disagree on it.
pub fn scalar_text(value: &Value, null_text: &str) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => null_text.to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(|v| scalar_text(v, null_text)).collect();
            items.join(", ")
        }
        Value::Object(_) => {
            ratio_text(value).unwrap_or_else(|| serde_json::to_string(value).unwrap_or_default())
        }
    }
}

/// Terminal colour for a serialized `PoasStatus` tier.
pub fn status_color(tier: &str) -> Option<Color> {
    match tier {
        "excellent" => Some(Color::BrightGreen),
        "good" => Some(Color::Green),
        "warning" => Some(Color::Yellow),
        "critical" => Some(Color::Red),
        _ => None,
    }
}

/// Tier name coloured for the terminal; unknown text passes through.
pub fn status_label(tier: &str) -> String {
    match status_color(tier) {
        Some(color) => tier.color(color).bold().to_string(),
        None => tier.to_string(),
    }
}
