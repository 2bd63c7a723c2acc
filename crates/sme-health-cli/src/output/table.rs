use rust_decimal::Decimal;
use serde_json::{Map, Value};
use sme_health_core::formatting::format_inr;
use tabled::{builder::Builder, Table};

use super::{flatten, is_object_array};

/// Result fields holding ₹ Lakh amounts, shown in Cr/L/K form.
const MONEY_FIELDS: &[&str] = &["working_capital", "net_debt", "total_debt", "fcf"];

/// Columns shown for arrays of findings; long description text stays in JSON output.
const FINDING_COLUMNS: &[&str] = &["priority", "category", "title", "action"];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result, map);
            } else {
                print_object(map);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(res_map) => {
            print_object(res_map);
            for (key, val) in res_map {
                if let Value::Array(items) = val {
                    if is_object_array(val) {
                        println!("\n{}:", key);
                        print_array_table(items);
                    }
                }
            }
        }
        Value::Array(items) => print_array_table(items),
        other => println!("{}", format_value("", other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Field/Value table of an object, nested objects flattened.
fn print_object(map: &Map<String, Value>) {
    let mut rows = Vec::new();
    flatten("", map, &mut rows);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in rows.iter().filter(|(_, v)| !is_object_array(v)) {
        builder.push_record([key.clone(), format_value(key, val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(none)");
        return;
    }

    let Some(Value::Object(first)) = arr.first() else {
        for item in arr {
            println!("{}", format_value("", item));
        }
        return;
    };

    let headers: Vec<String> = if first.contains_key("priority") {
        FINDING_COLUMNS.iter().map(|c| c.to_string()).collect()
    } else {
        first.keys().cloned().collect()
    };

    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| h.to_uppercase()));
    for map in arr.iter().filter_map(Value::as_object) {
        let row: Vec<String> = headers
            .iter()
            .map(|h| map.get(h).map(|v| format_value(h, v)).unwrap_or_default())
            .collect();
        builder.push_record(row);
    }
    println!("{}", Table::from(builder));
}

/// Render a cell. Money fields go through the INR formatter.
fn format_value(key: &str, value: &Value) -> String {
    let field = key.rsplit('.').next().unwrap_or(key);
    match value {
        Value::String(s) if MONEY_FIELDS.contains(&field) => s
            .parse::<Decimal>()
            .map(format_inr)
            .unwrap_or_else(|_| s.clone()),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "—".to_string(),
        Value::Array(arr) => arr
            .iter()
            .map(|v| format_value("", v))
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
