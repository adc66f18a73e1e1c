//! Human-readable change summaries for audit entries

use serde_json::Value;

use crate::models::Money;

/// Fields stored as cents that read better as dollars
const MONEY_FIELDS: &[&str] = &["amount", "budget_for_month"];

/// Bookkeeping fields left out of summaries
const IGNORED_FIELDS: &[&str] = &["updated_at"];

/// Summarize top-level field changes between two records
///
/// Returns `None` when nothing worth mentioning changed.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let changes = match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            let mut changes = Vec::new();

            for (key, before_val) in before_obj {
                if IGNORED_FIELDS.contains(&key.as_str()) {
                    continue;
                }
                match after_obj.get(key) {
                    Some(after_val) if after_val != before_val => changes.push(format!(
                        "{}: {} -> {}",
                        key,
                        format_field(key, before_val),
                        format_field(key, after_val)
                    )),
                    Some(_) => {}
                    None => changes.push(format!(
                        "{}: {} -> (removed)",
                        key,
                        format_field(key, before_val)
                    )),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
                    changes.push(format!(
                        "{}: (added) -> {}",
                        key,
                        format_field(key, after_val)
                    ));
                }
            }

            changes
        }
        _ if before != after => vec![format!(
            "{} -> {}",
            format_value(before),
            format_value(after)
        )],
        _ => Vec::new(),
    };

    (!changes.is_empty()).then(|| changes.join(", "))
}

/// Summarize changes between two lists of records keyed by `"id"`
///
/// Reports added and removed entries by name, per-entry field changes, and
/// whether the order changed.
pub fn generate_list_diff(before: &Value, after: &Value) -> Option<String> {
    let (Some(before_items), Some(after_items)) = (before.as_array(), after.as_array()) else {
        return generate_diff(before, after);
    };
    let (before_items, after_items) = (before_items.as_slice(), after_items.as_slice());

    let id_of = |v: &Value| v.get("id").and_then(Value::as_str).map(str::to_string);
    let name_of = |v: &Value| {
        v.get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| id_of(v))
            .unwrap_or_else(|| "?".to_string())
    };
    let find = |items: &[Value], id: &str| {
        items
            .iter()
            .find(|v| id_of(v).as_deref() == Some(id))
            .cloned()
    };

    let mut changes = Vec::new();

    for item in after_items {
        let Some(id) = id_of(item) else { continue };
        match find(before_items, &id) {
            None => changes.push(format!("added {}", name_of(item))),
            Some(previous) => {
                if let Some(diff) = generate_diff(&previous, item) {
                    changes.push(format!("{}: {}", name_of(&previous), diff));
                }
            }
        }
    }

    for item in before_items {
        let Some(id) = id_of(item) else { continue };
        if find(after_items, &id).is_none() {
            changes.push(format!("removed {}", name_of(item)));
        }
    }

    let order = |items: &[Value]| -> Vec<String> { items.iter().filter_map(id_of).collect() };
    let kept_before: Vec<String> = order(before_items)
        .into_iter()
        .filter(|id| find(after_items, id).is_some())
        .collect();
    let kept_after: Vec<String> = order(after_items)
        .into_iter()
        .filter(|id| find(before_items, id).is_some())
        .collect();
    if kept_before != kept_after {
        changes.push("reordered".to_string());
    }

    (!changes.is_empty()).then(|| changes.join("; "))
}

fn format_field(key: &str, value: &Value) -> String {
    if MONEY_FIELDS.contains(&key) {
        if let Some(cents) = value.as_i64() {
            return Money::from_cents(cents).to_string();
        }
    }
    format_value(value)
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
