//! Class attribute flattening.

use crate::value::Value;

/// Flatten a class descriptor into a space-delimited class string.
///
/// - strings and numbers are used as-is when truthy
/// - lists contribute each element (nested to any depth), skipping empties
/// - maps contribute every key whose value is truthy, in key order
///
/// Anything else contributes nothing.
pub fn concat_class_names(value: &Value) -> String {
    let mut out = String::new();
    push_class_names(&mut out, value);
    out
}

fn push_class_names(out: &mut String, value: &Value) {
    match value {
        Value::String(_) | Value::Number(_) => {
            if value.is_truthy() {
                push_name(out, &value.to_string());
            }
        }
        Value::List(items) => {
            for item in items {
                push_class_names(out, item);
            }
        }
        Value::Map(entries) => {
            for (name, enabled) in entries {
                if enabled.is_truthy() {
                    push_name(out, name);
                }
            }
        }
        Value::Null | Value::Bool(_) | Value::Handler(_) => {}
    }
}

fn push_name(out: &mut String, name: &str) {
    if name.is_empty() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    out.push_str(name);
}
