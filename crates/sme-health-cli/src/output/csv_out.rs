use serde_json::{Map, Value};
use std::io;

use super::{flatten, is_object_array};

type StdoutWriter<'a> = csv::Writer<io::StdoutLock<'a>>;

/// Write output as CSV to stdout.
///
/// Object results become `field,value` rows with nested keys dotted; list
/// results (recommendations) become one row per item.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => write_object_csv(&mut wtr, map),
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_csv_value(result)]);
        }
    }

    let _ = wtr.flush();
}

fn write_object_csv(wtr: &mut StdoutWriter<'_>, map: &Map<String, Value>) {
    let mut rows = Vec::new();
    flatten("", map, &mut rows);

    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in &rows {
        match val {
            Value::Array(items) if is_object_array(val) => {
                for (i, item) in items.iter().enumerate() {
                    if let Value::Object(inner) = item {
                        let mut item_rows = Vec::new();
                        flatten(&format!("{key}.{i}"), inner, &mut item_rows);
                        for (k, v) in &item_rows {
                            let _ = wtr.write_record([k.as_str(), &format_csv_value(v)]);
                        }
                    }
                }
            }
            _ => {
                let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
            }
        }
    }
}

fn write_array_csv(wtr: &mut StdoutWriter<'_>, arr: &[Value]) {
    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
        return;
    };

    let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&row);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
