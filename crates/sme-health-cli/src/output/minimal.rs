use serde_json::Value;

/// Print just the headline answer.
///
/// Analyses and score breakdowns print `overall zone`; recommendation lists
/// print one `PRIORITY title` line each; anything else falls back to the
/// first field of the result.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    for line in minimal_lines(result) {
        println!("{}", line);
    }
}

fn minimal_lines(result: &Value) -> Vec<String> {
    let score = result.get("score").unwrap_or(result);
    if let (Some(overall), Some(zone)) = (score.get("overall"), score.get("zone")) {
        return vec![format!("{} {}", format_minimal(overall), format_minimal(zone))];
    }

    if let Value::Array(items) = result {
        return items
            .iter()
            .map(|item| match (item.get("priority"), item.get("title")) {
                (Some(p), Some(t)) => format!("{} {}", format_minimal(p), format_minimal(t)),
                _ => format_minimal(item),
            })
            .collect();
    }

    let priority_keys = ["current_ratio", "tds_deposited"];
    if let Value::Object(map) = result {
        for key in &priority_keys {
            if let Some(val) = map.get(*key).filter(|v| !v.is_null()) {
                return vec![format!("{}: {}", key, format_minimal(val))];
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return vec![format!("{}: {}", key, format_minimal(val))];
        }
    }

    vec![format_minimal(result)]
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
