use serde_json::Value;

/// Print just the key answer line from the output.
///
/// Entry outcomes reduce to their success message, dashboard views to the
/// alert status line; anything else falls back to the first result field.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        if let Some(Value::String(message)) = map.get("message") {
            println!("{}", message);
            return;
        }

        let report = map
            .get("dashboard")
            .and_then(|d| d.get("alert_report"))
            .or_else(|| map.get("alert_report"));
        if let Some(Value::String(status)) = report.and_then(|r| r.get("status")) {
            println!("{}", status);
            return;
        }

        // Fall back to first field
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
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
