// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `${name}` placeholder substitution.

use serde_json::Value;

/// Substitution values, keyed by placeholder name.
pub type Values = serde_json::Map<String, Value>;

/// Replaces every `${name}` in `template` with the matching entry of `values`.
///
/// Names match case-insensitively, with an exact match preferred. Placeholders
/// without a value, and unterminated `${`, are left in the output verbatim.
///
/// ```rust
/// use serde_json::json;
/// use understory_i18n::{Values, format_template};
///
/// let mut values = Values::new();
/// values.insert("Name".into(), json!("Ada"));
/// assert_eq!(format_template("Hello ${name}", &values), "Hello Ada");
/// assert_eq!(format_template("Bye ${who}", &values), "Bye ${who}");
/// ```
#[must_use]
pub fn format_template(template: &str, values: &Values) -> String {
    if values.is_empty() {
        return template.to_owned();
    }
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match lookup(values, name) {
            Some(value) => push_value(&mut out, value),
            None => out.push_str(&rest[start..start + 2 + end + 1]),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

fn lookup<'a>(values: &'a Values, name: &str) -> Option<&'a Value> {
    values.get(name).or_else(|| {
        let lower = name.to_lowercase();
        values
            .iter()
            .find(|(key, _)| key.to_lowercase() == lower)
            .map(|(_, value)| value)
    })
}

/// Appends the display form of `value`.
///
/// Strings are inserted raw, arrays are comma-joined, `null` is `"null"` at
/// the top level and empty inside arrays, and objects are written as JSON.
fn push_value(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => out.push_str(s),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                if !item.is_null() {
                    push_value(out, item);
                }
            }
        }
        // Null, numbers, booleans and objects all print as their JSON text.
        other => out.push_str(&other.to_string()),
    }
}
